pub mod dto;
pub mod error;
pub mod model;
pub mod registry;
pub mod service;

pub use error::SynthesisServiceError;
pub use model::{ComparisonPair, OptionSlot, SynthesisOption};
pub use registry::ProviderRegistry;
pub use service::{SynthesisService, SynthesisServiceApi};
