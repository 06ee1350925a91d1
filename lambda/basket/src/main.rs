use lambda_http::{run, service_fn, tracing, Error};
use shop_common::config::table_name;
use shop_common::dynamo::DynamoTable;

mod basket;
mod checkout;
mod http_handler;

use checkout::LogOnlyCheckout;
use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let baskets = DynamoTable::new(client, table_name()?);
    let checkout = LogOnlyCheckout;

    run(service_fn(|event| {
        function_handler(&baskets, &checkout, event)
    }))
    .await
}
