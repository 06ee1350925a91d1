use async_trait::async_trait;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemFluentBuilder;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use tracing::{error, instrument};

use crate::{Acknowledgement, Record, StoreError, Table, UpdateInstruction, KEY_FIELD};

/// A [`Table`] backed by one DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn put_request(&self, record: &Record) -> Result<PutItemFluentBuilder, StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)?;
        Ok(self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item)))
    }

    /// An empty instruction goes out as-is; the engine rejects it.
    fn update_request(
        &self,
        key: &str,
        update: &UpdateInstruction,
    ) -> Result<UpdateItemFluentBuilder, StoreError> {
        Ok(self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_FIELD, key_attribute(key))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(update.attribute_names()))
            .set_expression_attribute_values(Some(expression_values(update)?)))
    }
}

fn key_attribute(key: &str) -> AttributeValue {
    AttributeValue::S(key.to_string())
}

/// `:valueN` placeholders of `update`, converted to attribute values.
fn expression_values(
    update: &UpdateInstruction,
) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let mut values = HashMap::new();
    for (placeholder, value) in update.attribute_values() {
        values.insert(placeholder, serde_dynamo::to_attribute_value(value)?);
    }
    Ok(values)
}

fn ack(
    request_id: Option<String>,
    attributes: Option<HashMap<String, AttributeValue>>,
) -> Result<Acknowledgement, StoreError> {
    let attributes: Option<Record> = attributes.map(serde_dynamo::from_item).transpose()?;
    Ok(Acknowledgement::new(request_id).with_attributes(attributes))
}

fn logged<E: std::fmt::Display>(table: &str, err: E) -> E {
    error!(table, error = %err, "dynamodb call failed");
    err
}

#[async_trait]
impl Table for DynamoTable {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_FIELD, key_attribute(key))
            .send()
            .await
            .map_err(|e| logged(&self.table_name, aws_sdk_dynamodb::Error::from(e)))?;

        Ok(output.item.map(serde_dynamo::from_item).transpose()?)
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| logged(&self.table_name, aws_sdk_dynamodb::Error::from(e)))?;

        let items = output.items.unwrap_or_default();
        Ok(serde_dynamo::from_items(items)?)
    }

    #[instrument(skip(self, record), fields(table = %self.table_name))]
    async fn put(&self, record: Record) -> Result<Acknowledgement, StoreError> {
        let output = self
            .put_request(&record)?
            .send()
            .await
            .map_err(|e| logged(&self.table_name, aws_sdk_dynamodb::Error::from(e)))?;

        let request_id = output.request_id().map(str::to_string);
        ack(request_id, output.attributes)
    }

    #[instrument(skip(self, update), fields(table = %self.table_name, expression = %update.expression()))]
    async fn update(
        &self,
        key: &str,
        update: UpdateInstruction,
    ) -> Result<Acknowledgement, StoreError> {
        let output = self
            .update_request(key, &update)?
            .send()
            .await
            .map_err(|e| logged(&self.table_name, aws_sdk_dynamodb::Error::from(e)))?;

        let request_id = output.request_id().map(str::to_string);
        ack(request_id, output.attributes)
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn delete(&self, key: &str) -> Result<Acknowledgement, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_FIELD, key_attribute(key))
            .send()
            .await
            .map_err(|e| logged(&self.table_name, aws_sdk_dynamodb::Error::from(e)))?;

        let request_id = output.request_id().map(str::to_string);
        ack(request_id, output.attributes)
    }
}
