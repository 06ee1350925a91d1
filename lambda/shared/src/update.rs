use serde_json::Value;
use std::collections::HashMap;

use crate::Record;

/// A `SET` update built from an arbitrary change set.
///
/// Field names and values travel through `#keyN` / `:valueN` placeholders so a
/// field may be called anything, reserved words included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateInstruction {
    assignments: Vec<(String, Value)>,
}

impl UpdateInstruction {
    /// Builds the instruction from `changes`, leaving `key_field` out.
    ///
    /// An empty change set gives an instruction the engine will refuse.
    pub fn from_changes(mut changes: Record, key_field: &str) -> Self {
        changes.remove(key_field);
        Self {
            assignments: changes.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Names of the fields being set, in placeholder order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|(field, _)| field.as_str())
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    pub fn expression(&self) -> String {
        let sets: Vec<String> = (0..self.assignments.len())
            .map(|index| format!("#key{index} = :value{index}"))
            .collect();
        format!("SET {}", sets.join(", "))
    }

    pub fn attribute_names(&self) -> HashMap<String, String> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(index, (field, _))| (format!("#key{index}"), field.clone()))
            .collect()
    }

    pub fn attribute_values(&self) -> Record {
        self.assignments
            .iter()
            .enumerate()
            .map(|(index, (_, value))| (format!(":value{index}"), value.clone()))
            .collect()
    }
}
