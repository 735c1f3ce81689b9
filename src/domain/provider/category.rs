use super::identity::ProviderIdentity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Provider pairings that can be voted on. The first element of each pair is
/// the first-named provider of the category label.
const KNOWN_CATEGORIES: &[(ProviderIdentity, ProviderIdentity)] = &[
    (ProviderIdentity::HumeAi, ProviderIdentity::HumeAi),
    (ProviderIdentity::HumeAi, ProviderIdentity::ElevenLabs),
    (ProviderIdentity::HumeAi, ProviderIdentity::OpenAi),
    (ProviderIdentity::OpenAi, ProviderIdentity::ElevenLabs),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("invalid provider combination: {0}, {1}")]
    UnknownPair(ProviderIdentity, ProviderIdentity),
    #[error("unrecognized comparison type: {0}")]
    UnknownLabel(String),
}

/// Order-independent classification of a comparison by the providers involved,
/// e.g. "Hume AI - OpenAI".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComparisonCategory {
    first: ProviderIdentity,
    second: ProviderIdentity,
}

/// Derive the comparison category for two providers, in either order.
pub fn category_of(
    provider_a: ProviderIdentity,
    provider_b: ProviderIdentity,
) -> Result<ComparisonCategory, CategoryError> {
    KNOWN_CATEGORIES
        .iter()
        .find(|(first, second)| {
            (*first == provider_a && *second == provider_b)
                || (*first == provider_b && *second == provider_a)
        })
        .map(|&(first, second)| ComparisonCategory { first, second })
        .ok_or(CategoryError::UnknownPair(provider_a, provider_b))
}

impl ComparisonCategory {
    pub fn first(&self) -> ProviderIdentity {
        self.first
    }

    pub fn second(&self) -> ProviderIdentity {
        self.second
    }

    pub fn is_self_comparison(&self) -> bool {
        self.first == self.second
    }

    pub fn involves(&self, provider: ProviderIdentity) -> bool {
        self.first == provider || self.second == provider
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.first, self.second)
    }

    /// All categories in the known table
    pub fn all() -> impl Iterator<Item = ComparisonCategory> {
        KNOWN_CATEGORIES
            .iter()
            .map(|&(first, second)| ComparisonCategory { first, second })
    }

    /// Categories between two distinct providers, sorted by label
    pub fn head_to_head() -> Vec<ComparisonCategory> {
        let mut categories: Vec<_> = Self::all()
            .filter(|category| !category.is_self_comparison())
            .collect();
        categories.sort_by_key(|category| category.label());
        categories
    }
}

impl std::fmt::Display for ComparisonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.first, self.second)
    }
}

impl FromStr for ComparisonCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CategoryError::UnknownLabel(s.to_string());
        let (first, second) = s.split_once(" - ").ok_or_else(unknown)?;
        let first = first.parse::<ProviderIdentity>().map_err(|_| unknown())?;
        let second = second.parse::<ProviderIdentity>().map_err(|_| unknown())?;

        let category = category_of(first, second).map_err(|_| unknown())?;
        if category.label() != s {
            return Err(unknown());
        }
        Ok(category)
    }
}

impl Serialize for ComparisonCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComparisonCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
