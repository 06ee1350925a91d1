use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::Value;
use shop_common::request::{json_body, path_parameter, request_path};
use shop_common::response::{respond, Cors};
use shop_common::{HandlerError, Table};
use tracing::info;

use crate::basket::{create_basket, delete_basket, get_all_baskets, get_basket, update_basket};
use crate::checkout::CheckoutPublisher;

const CHECKOUT_PATH: &str = "/basket/checkout";

const CORS: Cors = Cors {
    allow_headers: "Content-Type",
    allow_methods: "POST,GET,PUT,DELETE",
};

pub(crate) async fn function_handler(
    baskets: &dyn Table,
    checkout: &dyn CheckoutPublisher,
    event: Request,
) -> Result<Response<Body>, Error> {
    info!(method = %event.method(), path = request_path(&event), request = ?event, "request");

    let outcome = route(baskets, checkout, &event)
        .await
        .map(|body| (event.method().to_string(), body));
    respond(&CORS, outcome)
}

async fn route(
    baskets: &dyn Table,
    checkout: &dyn CheckoutPublisher,
    event: &Request,
) -> Result<Value, HandlerError> {
    let id = path_parameter(event, "id");

    match (event.method(), id) {
        (&Method::GET, Some(id)) => get_basket(baskets, id).await,
        (&Method::GET, None) => get_all_baskets(baskets).await,
        (&Method::POST, _) if request_path(event) == CHECKOUT_PATH => {
            checkout.publish(event).await?;
            Ok(Value::Null)
        }
        (&Method::POST, _) => create_basket(baskets, json_body(event)?).await,
        (&Method::PUT, Some(id)) => update_basket(baskets, id, json_body(event)?).await,
        (&Method::DELETE, Some(id)) => delete_basket(baskets, id).await,
        (&Method::PUT | &Method::DELETE, None) => Err(HandlerError::MissingPathParameter("id")),
        (method, _) => Err(HandlerError::UnsupportedRoute(method.to_string())),
    }
}
