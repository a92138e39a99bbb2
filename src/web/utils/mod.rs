pub mod errors;
pub mod mime;
pub mod streaming;
