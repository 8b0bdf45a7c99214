pub mod batch;
pub mod store;
pub mod transfer;
