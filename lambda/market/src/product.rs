use serde_json::Value;
use shop_common::{
    timestamp, Acknowledgement, HandlerError, Record, Table, UpdateInstruction, KEY_FIELD,
};
use tracing::{info, instrument};

use crate::market::PUBLISH;

/// Product records live in their own table, whatever `DYNAMODB_TABLE_NAME` says.
// TODO: read this from the environment like the market table once the product stack exports its name.
pub(crate) const PRODUCT_TABLE: &str = "product";

const MODIFIED_DATE: &str = "modifiedDate";

/// The change set applied to a product when its listing is published or withdrawn:
/// the listing's fields minus `id`, with `publish` forced and `modifiedDate` stamped.
pub(crate) fn product_changes(
    mut listing: Record,
    publish: bool,
    modified_date: String,
) -> UpdateInstruction {
    listing.insert(PUBLISH.to_string(), Value::Bool(publish));
    listing.insert(MODIFIED_DATE.to_string(), Value::String(modified_date));
    UpdateInstruction::from_changes(listing, KEY_FIELD)
}

#[instrument(skip(products, listing))]
pub(crate) async fn update_product(
    products: &dyn Table,
    product_id: &str,
    listing: Record,
    publish: bool,
) -> Result<Acknowledgement, HandlerError> {
    let update = product_changes(listing, publish, timestamp::now());
    info!(expression = %update.expression(), "update_product");

    Ok(products.update(product_id, update).await?)
}
