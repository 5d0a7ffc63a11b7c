use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;

use crate::types::RowId;

/// Receiver of property change notifications.
///
/// A column property holds a non-owning reference to its container and calls
/// `notify_changed` after every successful value change. Any type with this
/// capability can own properties, so tests can pass in a recording fake.
pub trait Container {
    fn notify_changed(&self, property_id: &str, old_value: &Value, new_value: &Value);

    /// Called instead of `notify_changed` when the property belongs to a row.
    /// Containers shared by several rows override this to tell them apart.
    fn notify_item_changed(
        &self,
        row_id: &RowId,
        property_id: &str,
        old_value: &Value,
        new_value: &Value,
    ) {
        let _ = row_id;
        self.notify_changed(property_id, old_value, new_value);
    }
}

/// A single recorded value change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowId>,
    pub property_id: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Container that keeps every notification it receives, in arrival order
#[derive(Debug, Default)]
pub struct ChangeLog {
    changes: RefCell<Vec<PropertyChange>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded changes, oldest first
    pub fn changes(&self) -> Vec<PropertyChange> {
        self.changes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    /// Changes recorded for one property
    pub fn changes_for(&self, property_id: &str) -> Vec<PropertyChange> {
        self.changes
            .borrow()
            .iter()
            .filter(|change| change.property_id == property_id)
            .cloned()
            .collect()
    }

    /// Changes recorded for one row
    pub fn changes_for_row(&self, row_id: &RowId) -> Vec<PropertyChange> {
        self.changes
            .borrow()
            .iter()
            .filter(|change| change.row_id.as_ref() == Some(row_id))
            .cloned()
            .collect()
    }

    /// Drop all recorded changes (after they have been persisted elsewhere)
    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(&*self.changes.borrow()).unwrap_or(Value::Array(Vec::new()))
    }
}

impl ChangeLog {
    fn record(&self, row_id: Option<&RowId>, property_id: &str, old_value: &Value, new_value: &Value) {
        tracing::debug!(
            row_id = ?row_id.map(ToString::to_string),
            property_id,
            old_value = %old_value,
            new_value = %new_value,
            "Recording property change"
        );

        self.changes.borrow_mut().push(PropertyChange {
            row_id: row_id.cloned(),
            property_id: property_id.to_string(),
            old_value: old_value.clone(),
            new_value: new_value.clone(),
        });
    }
}

impl Container for ChangeLog {
    fn notify_changed(&self, property_id: &str, old_value: &Value, new_value: &Value) {
        self.record(None, property_id, old_value, new_value);
    }

    fn notify_item_changed(
        &self,
        row_id: &RowId,
        property_id: &str,
        old_value: &Value,
        new_value: &Value,
    ) {
        self.record(Some(row_id), property_id, old_value, new_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_in_arrival_order() {
        let log = ChangeLog::new();
        log.notify_changed("age", &json!(30), &json!(31));
        log.notify_changed("name", &json!("Ville"), &json!("Kalle"));
        log.notify_changed("age", &json!(31), &json!(32));

        assert_eq!(log.len(), 3);
        assert_eq!(log.changes()[1].property_id, "name");

        let age = log.changes_for("age");
        assert_eq!(age.len(), 2);
        assert_eq!(age[1].new_value, json!(32));
    }

    #[test]
    fn to_json_and_clear() {
        let log = ChangeLog::new();
        log.notify_changed("age", &json!(30), &Value::Null);

        assert_eq!(
            log.to_json(),
            json!([{ "property_id": "age", "old_value": 30, "new_value": null }])
        );

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.to_json(), json!([]));
    }

    #[test]
    fn item_changes_carry_row_id() {
        let log = ChangeLog::new();
        let first = RowId::new(vec![json!(1)]);
        let second = RowId::new(vec![json!(2)]);
        log.notify_item_changed(&first, "name", &json!("Ville"), &json!("Kalle"));
        log.notify_item_changed(&second, "name", &json!("Ville"), &json!("Kalle"));

        let changes = log.changes();
        assert_ne!(changes[0], changes[1]);
        assert_eq!(log.changes_for_row(&second).len(), 1);
        assert_eq!(log.to_json()[0]["row_id"], json!([1]));
    }

    #[test]
    fn snapshot_survives_later_notifications() {
        let log = ChangeLog::new();
        log.notify_changed("age", &json!(30), &json!(31));

        let snapshot = log.changes();
        log.notify_changed("age", &json!(31), &json!(32));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
