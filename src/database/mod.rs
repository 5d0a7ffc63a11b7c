pub mod column_property;
pub mod container;
pub mod definition;
pub mod row_item;

pub use column_property::ColumnProperty;
pub use container::{ChangeLog, Container, PropertyChange};
pub use definition::{ColumnDefinition, RowDefinition};
pub use row_item::{ChangeType, FieldChange, RowItem};
