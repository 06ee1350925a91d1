use serde_json::Value;
use shop_common::{timestamp, HandlerError, Record, Table, UpdateInstruction, KEY_FIELD};
use std::cmp::Reverse;
use tracing::{info, instrument};
use uuid::Uuid;

pub(crate) const CREATED_DATE: &str = "createdDate";
const STATUS: &str = "status";

/// Where an order stands. Baskets are only ever created unconfirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BasketStatus {
    NotConfirmed,
}

impl BasketStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            BasketStatus::NotConfirmed => "NC",
        }
    }
}

/// The stored basket, or `{}` when there is none.
#[instrument(skip(table))]
pub(crate) async fn get_basket(table: &dyn Table, order_id: &str) -> Result<Value, HandlerError> {
    let item = table.get(order_id).await?;
    info!(found = item.is_some(), "get_basket");
    Ok(Value::Object(item.unwrap_or_default()))
}

/// Every basket, newest first. An empty table answers `{}` rather than `[]`.
#[instrument(skip(table))]
pub(crate) async fn get_all_baskets(table: &dyn Table) -> Result<Value, HandlerError> {
    let mut items = table.scan().await?;
    info!(count = items.len(), "get_all_baskets");
    if items.is_empty() {
        return Ok(Value::Object(Record::new()));
    }

    sort_newest_first(&mut items);
    Ok(Value::Array(items.into_iter().map(Value::Object).collect()))
}

/// Orders by `createdDate` descending, comparing the raw strings.
// The stored format is day-first, so this is not calendar order across months.
pub(crate) fn sort_newest_first(items: &mut [Record]) {
    items.sort_by_key(|item| {
        Reverse(
            item.get(CREATED_DATE)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )
    });
}

/// Stores `body` as a new basket with a fresh id, creation time and status.
#[instrument(skip_all)]
pub(crate) async fn create_basket(table: &dyn Table, mut body: Record) -> Result<Value, HandlerError> {
    let order_id = Uuid::new_v4().to_string();
    body.insert(KEY_FIELD.to_string(), Value::String(order_id));
    body.insert(CREATED_DATE.to_string(), Value::String(timestamp::now()));
    body.insert(
        STATUS.to_string(),
        Value::String(BasketStatus::NotConfirmed.as_str().to_string()),
    );
    let record = Value::Object(body.clone());
    info!(basket = %record, "create_basket");

    let ack = table.put(body.clone()).await?;
    Ok(ack.with_item(body).to_value())
}

#[instrument(skip(table))]
pub(crate) async fn delete_basket(table: &dyn Table, order_id: &str) -> Result<Value, HandlerError> {
    let ack = table.delete(order_id).await?;
    info!(ack = ?ack, "delete_basket");
    Ok(ack.to_value())
}

/// Sets every field of `changes` on the basket stored under `order_id`.
#[instrument(skip(table, changes))]
pub(crate) async fn update_basket(
    table: &dyn Table,
    order_id: &str,
    changes: Record,
) -> Result<Value, HandlerError> {
    let update = UpdateInstruction::from_changes(changes, KEY_FIELD);
    info!(expression = %update.expression(), "update_basket");

    let ack = table.update(order_id, update).await?;
    Ok(ack.to_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;
    use shop_common::memory::MemoryTable;
    use shop_common::timestamp::TIMESTAMP_FORMAT;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_date_and_status() {
        let table = MemoryTable::new();
        let body = record(json!({ "id": "mine", "items": ["sku1"] }));

        let ack = create_basket(&table, body).await.unwrap();
        let item = &ack["Item"];
        let id = item["id"].as_str().unwrap();

        assert_ne!(id, "mine");
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(item["status"], "NC");
        assert_eq!(item["items"], json!(["sku1"]));
        let created = item["createdDate"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(created, TIMESTAMP_FORMAT).is_ok());

        assert_eq!(table.record(id).unwrap(), item.as_object().cloned().unwrap());
        assert!(table.record("mine").is_none());
    }

    #[tokio::test]
    async fn two_creates_never_share_an_id() {
        let table = MemoryTable::new();
        create_basket(&table, Record::new()).await.unwrap();
        create_basket(&table, Record::new()).await.unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn missing_basket_reads_as_empty_object() {
        let table = MemoryTable::new();
        assert_eq!(get_basket(&table, "unknown").await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn empty_table_reads_all_as_empty_object() {
        let table = MemoryTable::new();
        assert_eq!(get_all_baskets(&table).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn read_all_is_newest_first_by_string() {
        let table = MemoryTable::with_records([
            record(json!({ "id": "a", "createdDate": "01-02-2024 10:00:00" })),
            record(json!({ "id": "b", "createdDate": "15-01-2024 10:00:00" })),
            record(json!({ "id": "c", "createdDate": "03-01-2024 10:00:00" })),
        ]);

        let all = get_all_baskets(&table).await.unwrap();
        let dates: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["createdDate"].as_str().unwrap())
            .collect();

        assert_eq!(
            dates,
            vec!["15-01-2024 10:00:00", "03-01-2024 10:00:00", "01-02-2024 10:00:00"]
        );
        assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn records_without_date_sort_last() {
        let mut items = vec![
            record(json!({ "id": "x" })),
            record(json!({ "id": "y", "createdDate": "01-01-2024 00:00:00" })),
        ];
        sort_newest_first(&mut items);
        assert_eq!(items[0]["id"], "y");
    }

    #[tokio::test]
    async fn delete_of_missing_basket_succeeds() {
        let table = MemoryTable::new();
        let ack = delete_basket(&table, "unknown").await.unwrap();
        assert_eq!(ack["$metadata"]["httpStatusCode"], 200);
    }

    #[tokio::test]
    async fn update_never_touches_the_key() {
        let table = MemoryTable::with_records([record(json!({ "id": "b1", "status": "NC" }))]);
        let changes = record(json!({ "id": "other", "status": "C" }));

        update_basket(&table, "b1", changes).await.unwrap();

        let (key, update) = table.updates().pop().unwrap();
        assert_eq!(key, "b1");
        assert_eq!(update.fields().collect::<Vec<_>>(), vec!["status"]);
        assert_eq!(table.record("b1").unwrap()["status"], "C");
        assert!(table.record("other").is_none());
    }

    #[tokio::test]
    async fn empty_update_surfaces_as_storage_failure() {
        let table = MemoryTable::new();
        let err = update_basket(&table, "b1", Record::new()).await.unwrap_err();
        assert!(matches!(err, HandlerError::Storage(_)));
    }
}
