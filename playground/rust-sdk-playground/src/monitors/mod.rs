pub mod clean;
pub mod list;
