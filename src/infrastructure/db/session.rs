use crate::infrastructure::repositories::VoteRepository;
use std::sync::Arc;

/// Storage handle for one logical operation
#[derive(Clone)]
pub enum StorageSession {
    Real(Arc<dyn VoteRepository>),
    /// No durable backend is configured: writes are discarded, reads are empty
    Null,
}

/// Hands out a session per operation. Built once at start-up from the storage mode.
#[derive(Clone, Default)]
pub struct SessionFactory {
    backend: Option<Arc<dyn VoteRepository>>,
}

impl SessionFactory {
    pub fn real(backend: Arc<dyn VoteRepository>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn null() -> Self {
        Self { backend: None }
    }

    pub fn open(&self) -> StorageSession {
        match &self.backend {
            Some(backend) => StorageSession::Real(Arc::clone(backend)),
            None => StorageSession::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        self.backend.is_none()
    }
}
