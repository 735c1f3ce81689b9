use crate::domain::provider::ProviderIdentity;
use crate::infrastructure::repositories::TtsRepository;
use std::collections::HashMap;
use std::sync::Arc;

/// Synthesis capability per provider. Providers without credentials are simply absent.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderIdentity, Arc<dyn TtsRepository>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        provider: ProviderIdentity,
        repository: Arc<dyn TtsRepository>,
    ) -> Self {
        self.providers.insert(provider, repository);
        self
    }

    pub fn get(&self, provider: ProviderIdentity) -> Option<Arc<dyn TtsRepository>> {
        self.providers.get(&provider).cloned()
    }

    pub fn is_registered(&self, provider: ProviderIdentity) -> bool {
        self.providers.contains_key(&provider)
    }

    /// Registered providers in canonical order
    pub fn registered(&self) -> Vec<ProviderIdentity> {
        ProviderIdentity::ALL
            .into_iter()
            .filter(|provider| self.is_registered(*provider))
            .collect()
    }
}
