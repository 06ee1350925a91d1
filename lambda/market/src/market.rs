use serde_json::Value;
use shop_common::{Acknowledgement, HandlerError, Record, Table, KEY_FIELD};
use tracing::{info, instrument};

use crate::product::update_product;

pub(crate) const PUBLISH: &str = "publish";

/// Whether a POSTed listing is published: null, false, 0, NaN and "" are false,
/// as is a missing field; every other value is true.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// The listing's `id`, or `None` when it is absent or null.
pub(crate) fn listing_key(listing: &Record) -> Result<Option<String>, HandlerError> {
    match listing.get(KEY_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(other) => Err(HandlerError::InvalidKey(other.clone())),
    }
}

#[instrument(skip(markets))]
pub(crate) async fn get_market(markets: &dyn Table, product_id: &str) -> Result<Value, HandlerError> {
    let item = markets.get(product_id).await?;
    info!(found = item.is_some(), "get_market");
    Ok(Value::Object(item.unwrap_or_default()))
}

/// Every listing in scan order. An empty table answers `{}`.
#[instrument(skip(markets))]
pub(crate) async fn get_all_markets(markets: &dyn Table) -> Result<Value, HandlerError> {
    let items = markets.scan().await?;
    info!(count = items.len(), "get_all_markets");
    if items.is_empty() {
        return Ok(Value::Object(Record::new()));
    }
    Ok(Value::Array(items.into_iter().map(Value::Object).collect()))
}

#[instrument(skip_all)]
async fn create_market(markets: &dyn Table, listing: Record) -> Result<Acknowledgement, HandlerError> {
    let ack = markets.put(listing).await?;
    info!(ack = ?ack, "create_market");
    Ok(ack)
}

#[instrument(skip(markets))]
async fn delete_market(markets: &dyn Table, product_id: &str) -> Result<Acknowledgement, HandlerError> {
    let ack = markets.delete(product_id).await?;
    info!(ack = ?ack, "delete_market");
    Ok(ack)
}

/// Writes the listing as sent, then marks the product published.
///
/// The two writes are independent: if the product update fails the listing
/// stays written and only the product failure is reported.
pub(crate) async fn publish_listing(
    markets: &dyn Table,
    products: &dyn Table,
    product_id: &str,
    listing: Record,
) -> Result<Value, HandlerError> {
    let ack = create_market(markets, listing.clone()).await?;
    let product_ack = update_product(products, product_id, listing, true).await?;
    info!(product_ack = ?product_ack, "product published");
    Ok(ack.to_value())
}

/// Removes the listing, then marks the product unpublished. Same failure window
/// as [`publish_listing`].
pub(crate) async fn unpublish_listing(
    markets: &dyn Table,
    products: &dyn Table,
    product_id: &str,
    listing: Record,
) -> Result<Value, HandlerError> {
    let ack = delete_market(markets, product_id).await?;
    let product_ack = update_product(products, product_id, listing, false).await?;
    info!(product_ack = ?product_ack, "product unpublished");
    Ok(ack.to_value())
}
