use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{StoreError, UpdateInstruction};

/// Primary key attribute of every table the functions touch.
pub const KEY_FIELD: &str = "id";

/// A schemaless item, as the caller sent it or as it came back from the table.
pub type Record = Map<String, Value>;

/// The single-table key-value store a function talks to.
///
/// Implementations must be safe to share between concurrent invocations; the
/// functions build one per process and borrow it for every request.
#[async_trait]
pub trait Table: Send + Sync {
    /// Point lookup by primary key. `None` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Record>, StoreError>;

    /// Every record in the table, in whatever order the engine returns them.
    async fn scan(&self) -> Result<Vec<Record>, StoreError>;

    /// Full upsert.
    async fn put(&self, record: Record) -> Result<Acknowledgement, StoreError>;

    /// Partial upsert. Fails when `update` carries no assignments.
    async fn update(
        &self,
        key: &str,
        update: UpdateInstruction,
    ) -> Result<Acknowledgement, StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<Acknowledgement, StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub http_status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// What the engine said about a write, shaped like the raw SDK output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Acknowledgement {
    #[serde(rename = "$metadata")]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Record>,
}

impl Acknowledgement {
    pub fn new(request_id: Option<String>) -> Self {
        Self {
            metadata: Metadata {
                http_status_code: 200,
                request_id,
            },
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: Option<Record>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attaches the record that was written.
    pub fn with_item(mut self, item: Record) -> Self {
        self.item = Some(item);
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acknowledgement_serializes_like_sdk_output() {
        let ack = Acknowledgement::new(Some("req-1".to_string()));
        assert_eq!(
            ack.to_value(),
            json!({ "$metadata": { "httpStatusCode": 200, "requestId": "req-1" } })
        );
    }

    #[test]
    fn acknowledgement_carries_written_item() {
        let item = json!({ "id": "a" }).as_object().cloned().unwrap();
        let ack = Acknowledgement::new(None).with_item(item);
        assert_eq!(
            ack.to_value(),
            json!({ "$metadata": { "httpStatusCode": 200 }, "Item": { "id": "a" } })
        );
    }
}
