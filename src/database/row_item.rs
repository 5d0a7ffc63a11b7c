use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::database::column_property::ColumnProperty;
use crate::database::container::Container;
use crate::error::ValidationError;
use crate::types::RowId;

/// Field change information for diff tracking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,    // Was null before
    Modified, // Non-null value replaced
    Removed,  // Set to null
}

/// A row of column properties sharing one container
#[derive(Debug)]
pub struct RowItem {
    row_id: RowId,
    /// Kept in column order
    properties: Vec<ColumnProperty>,
}

impl RowItem {
    /// Build a row and attach `owner` to every property
    pub fn new<C: Container + 'static>(
        row_id: RowId,
        properties: Vec<ColumnProperty>,
        owner: &Rc<C>,
    ) -> Result<Self, ValidationError> {
        let weak: Weak<C> = Rc::downgrade(owner);
        Self::with_owner(row_id, properties, weak)
    }

    /// Build a row from an already type-erased owner reference
    pub fn with_owner(
        row_id: RowId,
        properties: Vec<ColumnProperty>,
        owner: Weak<dyn Container>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for property in &properties {
            if !seen.insert(property.property_id()) {
                return Err(ValidationError::DuplicateProperty(property.property_id().to_string()));
            }
        }

        let mut properties = properties;
        for property in &mut properties {
            property.set_owner(owner.clone());
            property.set_row_id(row_id.clone());
        }

        tracing::debug!("Created row {} with {} properties", row_id, properties.len());

        Ok(Self { row_id, properties })
    }

    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property_ids(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.property_id())
    }

    pub fn properties(&self) -> &[ColumnProperty] {
        &self.properties
    }

    pub fn property(&self, property_id: &str) -> Option<&ColumnProperty> {
        self.properties.iter().find(|p| p.property_id() == property_id)
    }

    pub fn property_mut(&mut self, property_id: &str) -> Option<&mut ColumnProperty> {
        self.properties.iter_mut().find(|p| p.property_id() == property_id)
    }

    /// Get a property's current value
    pub fn value(&self, property_id: &str) -> Result<&Value, ValidationError> {
        self.property(property_id)
            .map(|p| p.value())
            .ok_or_else(|| ValidationError::UnknownProperty(property_id.to_string()))
    }

    /// Set a property's value; validation and notification happen in the property
    pub fn set_value(
        &mut self,
        property_id: &str,
        value: impl Into<Value>,
    ) -> Result<(), ValidationError> {
        self.property_mut(property_id)
            .ok_or_else(|| ValidationError::UnknownProperty(property_id.to_string()))?
            .set_value(value)
    }

    // ========================================
    // Change tracking
    // ========================================

    pub fn is_modified(&self) -> bool {
        self.properties.iter().any(|p| p.is_modified())
    }

    pub fn modified_properties(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.is_modified())
            .map(|p| p.property_id())
            .collect()
    }

    /// Changes since the last commit, in column order
    pub fn changes(&self) -> Vec<FieldChange> {
        self.properties
            .iter()
            .filter(|p| p.is_modified() && p.differs_from_original())
            .map(|p| {
                let change_type = match (p.original_value(), p.value()) {
                    (Value::Null, _) => ChangeType::Added,
                    (_, Value::Null) => ChangeType::Removed,
                    _ => ChangeType::Modified,
                };
                FieldChange {
                    field: p.property_id().to_string(),
                    old_value: p.original_value().clone(),
                    new_value: p.value().clone(),
                    change_type,
                }
            })
            .collect()
    }

    pub fn commit(&mut self) {
        for property in &mut self.properties {
            property.commit();
        }
    }

    pub fn rollback(&mut self) {
        for property in &mut self.properties {
            property.rollback();
        }
    }

    // ========================================
    // Serialization
    // ========================================

    /// Current values keyed by property ID
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|p| (p.property_id().to_string(), p.value().clone()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl std::fmt::Display for RowItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RowItem(id: {}, properties: {}, modified: {})",
            self.row_id,
            self.properties.len(),
            self.is_modified()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::container::ChangeLog;
    use crate::types::ValueType;
    use serde_json::json;

    fn row(log: &Rc<ChangeLog>) -> RowItem {
        let properties = vec![
            ColumnProperty::new("id", true, false, false, 1, ValueType::Integer).unwrap(),
            ColumnProperty::new("name", false, true, false, "Ville", ValueType::String).unwrap(),
            ColumnProperty::new("nickname", false, true, true, Value::Null, ValueType::String).unwrap(),
        ];
        RowItem::new(RowId::new(vec![json!(1)]), properties, log).unwrap()
    }

    #[test]
    fn duplicate_ids_rejected() {
        let log = Rc::new(ChangeLog::new());
        let properties = vec![
            ColumnProperty::new("name", false, true, true, "a", ValueType::String).unwrap(),
            ColumnProperty::new("name", false, true, true, "b", ValueType::String).unwrap(),
        ];
        let err = RowItem::new(RowId::new(vec![json!(1)]), properties, &log).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateProperty("name".into()));
    }

    #[test]
    fn unknown_property() {
        let log = Rc::new(ChangeLog::new());
        let mut row = row(&log);
        assert!(matches!(row.value("age"), Err(ValidationError::UnknownProperty(_))));
        assert!(matches!(row.set_value("age", 3), Err(ValidationError::UnknownProperty(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn set_value_routes_to_container() {
        let log = Rc::new(ChangeLog::new());
        let mut row = row(&log);

        row.set_value("name", "Kalle").unwrap();

        assert_eq!(row.value("name").unwrap(), &json!("Kalle"));
        assert_eq!(log.changes_for("name").len(), 1);
        assert_eq!(row.modified_properties(), vec!["name"]);
    }

    #[test]
    fn changes_classify_by_null_transitions() {
        let log = Rc::new(ChangeLog::new());
        let mut row = row(&log);

        row.set_value("name", "Kalle").unwrap();
        row.set_value("nickname", "Kalle-boy").unwrap();

        let changes = row.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].change_type, ChangeType::Modified);
        assert_eq!(changes[1].change_type, ChangeType::Added);

        row.commit();
        assert!(row.changes().is_empty());

        row.set_value("nickname", Value::Null).unwrap();
        assert_eq!(row.changes()[0].change_type, ChangeType::Removed);
    }

    #[test]
    fn set_back_to_original_reports_no_change() {
        let log = Rc::new(ChangeLog::new());
        let mut row = row(&log);

        row.set_value("name", "Kalle").unwrap();
        row.set_value("name", "Ville").unwrap();

        assert!(row.is_modified());
        assert!(row.changes().is_empty());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn rollback_restores_all() {
        let log = Rc::new(ChangeLog::new());
        let mut row = row(&log);

        row.set_value("name", "Kalle").unwrap();
        row.set_value("nickname", "K").unwrap();
        row.rollback();

        assert!(!row.is_modified());
        assert_eq!(row.to_json(), json!({ "id": 1, "name": "Ville", "nickname": null }));
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn shared_log_tells_rows_apart() {
        let log = Rc::new(ChangeLog::new());
        let mut first = row(&log);
        let properties =
            vec![ColumnProperty::new("name", false, true, false, "Ville", ValueType::String).unwrap()];
        let mut second = RowItem::new(RowId::new(vec![json!(2)]), properties, &log).unwrap();

        first.set_value("name", "Kalle").unwrap();
        second.set_value("name", "Kalle").unwrap();

        let changes = log.changes();
        assert_ne!(changes[0], changes[1]);
        assert_eq!(changes[0].row_id.as_ref(), Some(first.row_id()));
        assert_eq!(changes[1].row_id.as_ref(), Some(second.row_id()));
        assert_eq!(log.changes_for_row(second.row_id()).len(), 1);
    }

    #[test]
    fn with_owner_accepts_type_erased_container() {
        let log: Rc<dyn Container> = Rc::new(ChangeLog::new());
        let properties =
            vec![ColumnProperty::new("name", false, true, false, "Ville", ValueType::String).unwrap()];
        let mut row =
            RowItem::with_owner(RowId::new(vec![json!(1)]), properties, Rc::downgrade(&log)).unwrap();

        row.set_value("name", "Kalle").unwrap();
        assert!(row.is_modified());
    }

    #[test]
    fn display_summary() {
        let log = Rc::new(ChangeLog::new());
        let row = row(&log);
        assert_eq!(row.to_string(), "RowItem(id: [1], properties: 3, modified: false)");
        assert_eq!(row.property_ids().collect::<Vec<_>>(), vec!["id", "name", "nickname"]);
    }
}
