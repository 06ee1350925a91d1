//! An in-process [`Table`] for tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Acknowledgement, Record, StoreError, Table, UpdateInstruction, KEY_FIELD};

/// One call made against a [`MemoryTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Scan,
    Put(Record),
    Update(String, UpdateInstruction),
    Delete(String),
}

/// Records live in key order, so `scan` is deterministic.
#[derive(Debug, Default)]
pub struct MemoryTable {
    records: Mutex<BTreeMap<String, Record>>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-filled with `records`. Records without a string `id` are skipped.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let table = Self::new();
        for record in records {
            table.insert(record);
        }
        table
    }

    pub fn insert(&self, record: Record) {
        if let Some(Value::String(key)) = record.get(KEY_FIELD) {
            lock(&self.records).insert(key.clone(), record);
        }
    }

    pub fn record(&self, key: &str) -> Option<Record> {
        lock(&self.records).get(key).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// The update instructions received so far, with their keys.
    pub fn updates(&self) -> Vec<(String, UpdateInstruction)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(key, update) => Some((key, update)),
                _ => None,
            })
            .collect()
    }

    /// Makes every later call fail with `message`, as an unreachable engine would.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    fn record_call(&self, call: Call) -> Result<(), StoreError> {
        lock(&self.calls).push(call);
        match lock(&self.failure).as_ref() {
            Some(message) => Err(StoreError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        self.record_call(Call::Get(key.to_string()))?;
        Ok(self.record(key))
    }

    async fn scan(&self) -> Result<Vec<Record>, StoreError> {
        self.record_call(Call::Scan)?;
        Ok(lock(&self.records).values().cloned().collect())
    }

    async fn put(&self, record: Record) -> Result<Acknowledgement, StoreError> {
        self.record_call(Call::Put(record.clone()))?;
        match record.get(KEY_FIELD) {
            Some(Value::String(_)) => {
                self.insert(record);
                Ok(Acknowledgement::new(None))
            }
            _ => Err(StoreError::Rejected(
                "One or more parameter values were invalid: Missing the key id in the item"
                    .to_string(),
            )),
        }
    }

    async fn update(
        &self,
        key: &str,
        update: UpdateInstruction,
    ) -> Result<Acknowledgement, StoreError> {
        self.record_call(Call::Update(key.to_string(), update.clone()))?;
        if update.is_empty() {
            return Err(StoreError::Rejected(
                "ExpressionAttributeNames must not be empty".to_string(),
            ));
        }

        let mut records = lock(&self.records);
        let record = records.entry(key.to_string()).or_insert_with(|| {
            let mut record = Record::new();
            record.insert(KEY_FIELD.to_string(), Value::String(key.to_string()));
            record
        });
        for (field, value) in update.assignments() {
            record.insert(field.clone(), value.clone());
        }
        Ok(Acknowledgement::new(None))
    }

    async fn delete(&self, key: &str) -> Result<Acknowledgement, StoreError> {
        self.record_call(Call::Delete(key.to_string()))?;
        lock(&self.records).remove(key);
        Ok(Acknowledgement::new(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn update_upserts_fields() {
        let table = MemoryTable::with_records([record(json!({ "id": "p1", "name": "lamp" }))]);
        let update = UpdateInstruction::from_changes(record(json!({ "publish": true })), KEY_FIELD);

        table.update("p1", update).await.unwrap();
        assert_eq!(
            table.record("p1").unwrap(),
            record(json!({ "id": "p1", "name": "lamp", "publish": true }))
        );
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let table = MemoryTable::new();
        let update = UpdateInstruction::from_changes(Record::new(), KEY_FIELD);

        let err = table.update("p1", update).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_key_succeeds() {
        let table = MemoryTable::new();
        table.delete("nope").await.unwrap();
        assert_eq!(table.calls(), vec![Call::Delete("nope".to_string())]);
    }

    #[tokio::test]
    async fn failure_applies_to_every_call() {
        let table = MemoryTable::new();
        table.fail_with("ProvisionedThroughputExceededException");

        let err = table.scan().await.unwrap_err();
        assert_eq!(err.to_string(), "ProvisionedThroughputExceededException");
    }
}
