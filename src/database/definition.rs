use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

use crate::database::column_property::ColumnProperty;
use crate::database::container::Container;
use crate::database::row_item::RowItem;
use crate::error::ValidationError;
use crate::types::{RowId, ValueType};

/// Column metadata as written in a row definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "default_true")]
    pub read_only_change_allowed: bool,
    #[serde(default)]
    pub default: Value,
}

fn default_true() -> bool {
    true
}

/// A row definition: key values plus column metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowDefinition {
    pub row_id: Vec<Value>,
    pub columns: Vec<ColumnDefinition>,
}

impl ColumnDefinition {
    pub fn build(&self) -> Result<ColumnProperty, ValidationError> {
        ColumnProperty::new(
            self.id.clone(),
            self.read_only,
            self.read_only_change_allowed,
            self.nullable,
            self.default.clone(),
            self.value_type,
        )
    }
}

impl RowDefinition {
    /// Parse a definition from YAML or JSON text
    pub fn parse(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    pub fn build<C: Container + 'static>(&self, owner: &Rc<C>) -> Result<RowItem, ValidationError> {
        let properties = self
            .columns
            .iter()
            .map(ColumnDefinition::build)
            .collect::<Result<Vec<_>, _>>()?;

        RowItem::new(RowId::new(self.row_id.clone()), properties, owner)
    }
}
