#![allow(dead_code)]

use column_property::{ColumnProperty, Container, RowId, RowItem, ValueType};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// One observed `notify_changed` call
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub property_id: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Fake container that records every notification for later assertions
#[derive(Debug, Default)]
pub struct RecordingContainer {
    calls: RefCell<Vec<Notification>>,
}

impl RecordingContainer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Notification> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn assert_not_called(&self) {
        assert!(self.calls.borrow().is_empty(), "unexpected notifications: {:?}", self.calls.borrow());
    }

    pub fn assert_called_once_with(&self, property_id: &str, old_value: Value, new_value: Value) {
        assert_eq!(
            self.calls(),
            vec![Notification { property_id: property_id.to_string(), old_value, new_value }]
        );
    }
}

impl Container for RecordingContainer {
    fn notify_changed(&self, property_id: &str, old_value: &Value, new_value: &Value) {
        self.calls.borrow_mut().push(Notification {
            property_id: property_id.to_string(),
            old_value: old_value.clone(),
            new_value: new_value.clone(),
        });
    }
}

/// Wrap a single property in a row owned by `container`
pub fn single_column_row(property: ColumnProperty, container: &Rc<RecordingContainer>) -> RowItem {
    RowItem::new(RowId::new(vec![json!(1)]), vec![property], container)
        .expect("single column row")
}

pub fn name_column(read_only: bool, read_only_change_allowed: bool, nullable: bool) -> ColumnProperty {
    ColumnProperty::new("NAME", read_only, read_only_change_allowed, nullable, "Ville", ValueType::String)
        .expect("NAME column")
}

pub fn age_column() -> ColumnProperty {
    ColumnProperty::new("age", false, true, false, 30, ValueType::Integer).expect("age column")
}
