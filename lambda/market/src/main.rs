use lambda_http::{run, service_fn, tracing, Error};
use shop_common::config::table_name;
use shop_common::dynamo::DynamoTable;

mod http_handler;
mod market;
mod product;

use http_handler::function_handler;
use product::PRODUCT_TABLE;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let markets = DynamoTable::new(client.clone(), table_name()?);
    let products = DynamoTable::new(client, PRODUCT_TABLE);

    run(service_fn(|event| {
        function_handler(&markets, &products, event)
    }))
    .await
}
