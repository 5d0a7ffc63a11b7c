pub mod apply;
pub mod describe;
