pub mod category;
pub mod identity;
pub mod selector;

pub use category::{category_of, CategoryError, ComparisonCategory};
pub use identity::{ProviderIdentity, UnknownProvider};
pub use selector::{
    ProviderSelector, SelectionPolicyError, WeightedPair, CUSTOM_TEXT_PAIR, DEFAULT_PAIR_WEIGHTS,
};
