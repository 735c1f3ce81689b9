use crate::domain::provider::ProviderIdentity;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// URL prefix the audio directory is served under
pub const AUDIO_ROUTE: &str = "/static/audio";

/// Audio files older than this are removed before each write
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 60);

/// Writes synthesized audio to a local directory that is served statically
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    max_age: Duration,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_max_age(dir, DEFAULT_MAX_AGE)
    }

    pub fn with_max_age(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Persist `audio` and return the URL path it is served at.
    ///
    /// File names are random, never derived from the provider or vendor data.
    pub async fn save(&self, provider: ProviderIdentity, audio: &[u8]) -> std::io::Result<String> {
        self.ensure_dir().await?;
        self.prune_expired().await;

        let file_name = format!("{}.mp3", uuid::Uuid::new_v4());
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, audio).await?;

        tracing::debug!(
            provider = %provider,
            path = %path.display(),
            audio_size_bytes = audio.len(),
            "Audio file saved"
        );

        Ok(format!("{AUDIO_ROUTE}/{file_name}"))
    }

    /// Local file behind an audio reference returned by [`AudioStore::save`]
    #[cfg(test)]
    pub(crate) fn local_path(&self, audio_ref: &str) -> Option<PathBuf> {
        let file_name = audio_ref.strip_prefix(AUDIO_ROUTE)?.strip_prefix('/')?;
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return None;
        }
        Some(self.dir.join(file_name))
    }

    /// Best-effort cleanup; failures are logged and skipped
    async fn prune_expired(&self) {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    dir = %self.dir.display(),
                    "Failed to list audio directory"
                );
                return;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0usize;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let expired = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .map(|age| age > self.max_age)
                .unwrap_or(false);

            if expired {
                match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!(
                        error = %e,
                        path = %entry.path().display(),
                        "Failed to remove expired audio file"
                    ),
                }
            }
        }

        if removed > 0 {
            tracing::debug!(removed = removed, "Pruned expired audio files");
        }
    }
}
