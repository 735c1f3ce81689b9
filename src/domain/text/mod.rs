pub mod error;
pub mod service;

pub use error::TextServiceError;
pub use service::{TextService, TextServiceApi};
