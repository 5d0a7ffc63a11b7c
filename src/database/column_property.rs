use serde_json::Value;
use std::rc::Weak;

use crate::database::container::Container;
use crate::error::ValidationError;
use crate::types::{json_kind, RowId, ValueType};

/// A single typed, validated column of a row with change tracking.
///
/// The value is replaced only through `set_value`, which validates the
/// input and then notifies the owning container.
pub struct ColumnProperty {
    property_id: String,
    value_type: ValueType,
    /// Value as last loaded or committed
    original: Value,
    value: Value,
    read_only: bool,
    read_only_change_allowed: bool,
    nullable: bool,
    modified: bool,
    owner: Option<Weak<dyn Container>>,
    /// Set when the property belongs to a row
    row_id: Option<RowId>,
}

impl ColumnProperty {
    pub fn new(
        property_id: impl Into<String>,
        read_only: bool,
        read_only_change_allowed: bool,
        nullable: bool,
        default_value: impl Into<Value>,
        value_type: ValueType,
    ) -> Result<Self, ValidationError> {
        let property_id = property_id.into();
        if property_id.trim().is_empty() {
            return Err(ValidationError::MissingPropertyId);
        }

        // Null defaults are allowed so that new rows can start empty
        let default_value = default_value.into();
        if !default_value.is_null() && !value_type.accepts(&default_value) {
            return Err(ValidationError::TypeMismatch {
                property_id,
                expected: value_type,
                found: json_kind(&default_value),
            });
        }

        Ok(Self {
            property_id,
            value_type,
            original: default_value.clone(),
            value: default_value,
            read_only,
            read_only_change_allowed,
            nullable,
            modified: false,
            owner: None,
            row_id: None,
        })
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Current value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Value as last loaded or committed
    pub fn original_value(&self) -> &Value {
        &self.original
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Change read-only status. Ignored unless the column allows it.
    pub fn set_read_only(&mut self, read_only: bool) {
        if !self.read_only_change_allowed {
            tracing::warn!(
                "Read-only status of property '{}' cannot be changed - ignoring",
                self.property_id
            );
            return;
        }
        self.read_only = read_only;
    }

    /// Attach the container that receives change notifications
    pub fn set_owner(&mut self, owner: Weak<dyn Container>) {
        self.owner = Some(owner);
    }

    pub(crate) fn set_row_id(&mut self, row_id: RowId) {
        self.row_id = Some(row_id);
    }

    /// Whether the value differs from the original, by column equality
    pub fn differs_from_original(&self) -> bool {
        !self.value_type.same_value(&self.value, &self.original)
    }

    /// Validate and store a new value, then notify the owner.
    ///
    /// Setting the value the property already holds is a no-op: the
    /// modified flag is left alone and no notification is sent.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), ValidationError> {
        let value = value.into();
        self.validate(&value)?;

        if self.value_type.same_value(&value, &self.value) {
            tracing::trace!("Property '{}' already holds {} - skipping", self.property_id, value);
            return Ok(());
        }

        let old_value = std::mem::replace(&mut self.value, value);
        self.modified = true;
        self.notify(&old_value);
        Ok(())
    }

    /// Accept the current value as the new original
    pub fn commit(&mut self) {
        self.original = self.value.clone();
        self.modified = false;
    }

    /// Restore the original value, notifying the owner if it differed
    pub fn rollback(&mut self) {
        self.modified = false;
        if !self.differs_from_original() {
            return;
        }

        let old_value = std::mem::replace(&mut self.value, self.original.clone());
        self.notify(&old_value);
    }

    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if self.read_only {
            return Err(ValidationError::ReadOnly(self.property_id.clone()));
        }

        if value.is_null() {
            if !self.nullable {
                return Err(ValidationError::NotNullable(self.property_id.clone()));
            }
            return Ok(());
        }

        if !self.value_type.accepts(value) {
            return Err(ValidationError::TypeMismatch {
                property_id: self.property_id.clone(),
                expected: self.value_type,
                found: json_kind(value),
            });
        }

        Ok(())
    }

    fn notify(&self, old_value: &Value) {
        match (self.owner.as_ref().and_then(Weak::upgrade), &self.row_id) {
            (Some(owner), Some(row_id)) => {
                owner.notify_item_changed(row_id, &self.property_id, old_value, &self.value)
            }
            (Some(owner), None) => owner.notify_changed(&self.property_id, old_value, &self.value),
            (None, _) => tracing::debug!("Property '{}' has no live owner to notify", self.property_id),
        }
    }
}

impl std::fmt::Debug for ColumnProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnProperty")
            .field("property_id", &self.property_id)
            .field("value_type", &self.value_type)
            .field("value", &self.value)
            .field("original", &self.original)
            .field("read_only", &self.read_only)
            .field("nullable", &self.nullable)
            .field("modified", &self.modified)
            .field("has_owner", &self.owner.is_some())
            .finish()
    }
}

impl std::fmt::Display for ColumnProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}{}{}) = {}",
            self.property_id,
            self.value_type,
            if self.nullable { ", nullable" } else { "" },
            if self.read_only { ", read-only" } else { "" },
            self.value
        )
    }
}
