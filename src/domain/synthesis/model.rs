use crate::domain::provider::{category_of, CategoryError, ComparisonCategory, ProviderIdentity};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Slot a synthesized candidate is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSlot {
    OptionA,
    OptionB,
}

impl OptionSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSlot::OptionA => "option_a",
            OptionSlot::OptionB => "option_b",
        }
    }

    pub fn other(&self) -> OptionSlot {
        match self {
            OptionSlot::OptionA => OptionSlot::OptionB,
            OptionSlot::OptionB => OptionSlot::OptionA,
        }
    }
}

impl std::fmt::Display for OptionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OptionSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "option_a" => Ok(OptionSlot::OptionA),
            "option_b" => Ok(OptionSlot::OptionB),
            other => Err(format!("unknown option slot: {other}")),
        }
    }
}

/// One synthesized audio candidate tagged with the provider that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOption {
    pub provider: ProviderIdentity,
    pub audio_ref: String,
    #[serde(default)]
    pub generation_id: Option<String>,
}

/// Two candidates for the listener to judge. Which candidate lands in slot A
/// is decided by a fair coin, never by provider or completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPair {
    pub option_a: SynthesisOption,
    pub option_b: SynthesisOption,
}

impl ComparisonPair {
    pub fn shuffled<R: Rng + ?Sized>(
        first: SynthesisOption,
        second: SynthesisOption,
        rng: &mut R,
    ) -> Self {
        let (option_a, option_b) = if rng.gen_bool(0.5) {
            (first, second)
        } else {
            (second, first)
        };
        Self { option_a, option_b }
    }

    pub fn option(&self, slot: OptionSlot) -> &SynthesisOption {
        match slot {
            OptionSlot::OptionA => &self.option_a,
            OptionSlot::OptionB => &self.option_b,
        }
    }

    pub fn category(&self) -> Result<ComparisonCategory, CategoryError> {
        category_of(self.option_a.provider, self.option_b.provider)
    }
}
