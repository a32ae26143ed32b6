pub mod device;
pub mod filesystem;
pub mod rates;
pub mod row;
pub mod snapshot;
