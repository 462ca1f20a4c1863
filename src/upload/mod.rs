pub mod parser;

pub use parser::{UploadParts, parse_multipart, parse_report};
