pub mod record;

pub use record::{RecordId, UploadResponse};
