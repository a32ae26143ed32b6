pub mod json;
pub mod plain;
pub mod table;
pub mod theme;
