use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::Value;
use shop_common::request::{json_body, path_parameter, request_path};
use shop_common::response::{respond, Cors};
use shop_common::{HandlerError, Table};
use tracing::info;

use crate::market::{
    get_all_markets, get_market, is_truthy, listing_key, publish_listing, unpublish_listing,
    PUBLISH,
};

const CORS: Cors = Cors {
    allow_headers: "Origin, X-Requested-With, Content-Type, Accept",
    allow_methods: "POST,GET",
};

pub(crate) async fn function_handler(
    markets: &dyn Table,
    products: &dyn Table,
    event: Request,
) -> Result<Response<Body>, Error> {
    info!(method = %event.method(), path = request_path(&event), request = ?event, "request");

    let outcome = route(markets, products, &event).await;
    respond(&CORS, outcome)
}

/// Picks the operation and names it for the response message. Withdrawing a
/// listing arrives as a POST but reports itself as a DELETE.
async fn route(
    markets: &dyn Table,
    products: &dyn Table,
    event: &Request,
) -> Result<(String, Value), HandlerError> {
    let method = event.method();

    match *method {
        Method::GET => {
            let body = match path_parameter(event, "id") {
                Some(id) => get_market(markets, id).await?,
                None => get_all_markets(markets).await?,
            };
            Ok((method.to_string(), body))
        }
        Method::POST => {
            let listing = json_body(event)?;
            let Some(product_id) = listing_key(&listing)? else {
                info!("listing without id, nothing to do");
                return Ok((method.to_string(), Value::Null));
            };

            if is_truthy(listing.get(PUBLISH)) {
                let ack = publish_listing(markets, products, &product_id, listing).await?;
                Ok((Method::POST.to_string(), ack))
            } else {
                let ack = unpublish_listing(markets, products, &product_id, listing).await?;
                Ok((Method::DELETE.to_string(), ack))
            }
        }
        _ => Err(HandlerError::UnsupportedRoute(method.to_string())),
    }
}
