pub mod batch;
pub mod health;
pub mod objects;

pub use batch::batch;
pub use health::health_check;
pub use objects::{download_object, upload_object};
