pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod types;

pub use database::{ChangeLog, ColumnProperty, Container, RowItem};
pub use error::ValidationError;
pub use types::{RowId, ValueType};
