use super::identity::ProviderIdentity;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// A provider pair and its probability of being drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPair {
    pub pair: (ProviderIdentity, ProviderIdentity),
    pub weight: f64,
}

/// Pairing policy for rounds that use generated text
pub const DEFAULT_PAIR_WEIGHTS: [WeightedPair; 4] = [
    WeightedPair {
        pair: (ProviderIdentity::HumeAi, ProviderIdentity::OpenAi),
        weight: 0.50,
    },
    WeightedPair {
        pair: (ProviderIdentity::OpenAi, ProviderIdentity::ElevenLabs),
        weight: 0.25,
    },
    WeightedPair {
        pair: (ProviderIdentity::HumeAi, ProviderIdentity::ElevenLabs),
        weight: 0.20,
    },
    WeightedPair {
        pair: (ProviderIdentity::HumeAi, ProviderIdentity::HumeAi),
        weight: 0.05,
    },
];

/// Pair used whenever the listener edited the generated text
pub const CUSTOM_TEXT_PAIR: (ProviderIdentity, ProviderIdentity) =
    (ProviderIdentity::HumeAi, ProviderIdentity::HumeAi);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionPolicyError {
    #[error("selection policy has no provider pairs")]
    Empty,
    #[error("selection weight must be positive and finite, got {0}")]
    InvalidWeight(f64),
    #[error("selection weights must sum to 1.0, got {0}")]
    WeightsDoNotSumToOne(f64),
}

/// Picks the two providers for a synthesis round with a single weighted draw
/// over pre-enumerated pairs.
#[derive(Debug, Clone)]
pub struct ProviderSelector {
    pairs: Vec<(ProviderIdentity, ProviderIdentity)>,
    distribution: WeightedIndex<f64>,
    custom_text_pair: (ProviderIdentity, ProviderIdentity),
}

impl ProviderSelector {
    pub fn new(
        policy: &[WeightedPair],
        custom_text_pair: (ProviderIdentity, ProviderIdentity),
    ) -> Result<Self, SelectionPolicyError> {
        if policy.is_empty() {
            return Err(SelectionPolicyError::Empty);
        }

        if let Some(bad) = policy
            .iter()
            .map(|entry| entry.weight)
            .find(|weight| !weight.is_finite() || *weight <= 0.0)
        {
            return Err(SelectionPolicyError::InvalidWeight(bad));
        }

        let total: f64 = policy.iter().map(|entry| entry.weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SelectionPolicyError::WeightsDoNotSumToOne(total));
        }

        let distribution = WeightedIndex::new(policy.iter().map(|entry| entry.weight))
            .map_err(|_| SelectionPolicyError::WeightsDoNotSumToOne(total))?;

        Ok(Self {
            pairs: policy.iter().map(|entry| entry.pair).collect(),
            distribution,
            custom_text_pair,
        })
    }

    /// Selector with the arena's standard weights
    pub fn standard() -> Self {
        Self::new(&DEFAULT_PAIR_WEIGHTS, CUSTOM_TEXT_PAIR)
            .expect("default pair weights form a valid distribution")
    }

    pub fn select_providers(&self, text_modified: bool) -> (ProviderIdentity, ProviderIdentity) {
        self.select_with(text_modified, &mut rand::thread_rng())
    }

    pub fn select_with<R: Rng + ?Sized>(
        &self,
        text_modified: bool,
        rng: &mut R,
    ) -> (ProviderIdentity, ProviderIdentity) {
        if text_modified {
            return self.custom_text_pair;
        }
        self.pairs[self.distribution.sample(rng)]
    }

    /// Every pair this selector can return
    pub fn candidate_pairs(
        &self,
    ) -> impl Iterator<Item = (ProviderIdentity, ProviderIdentity)> + '_ {
        self.pairs
            .iter()
            .copied()
            .chain(std::iter::once(self.custom_text_pair))
    }
}
