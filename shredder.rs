//! Path-level secure deletion.
//!
//! This module provides [`Shredder`], the primary interface for destroying
//! a file: open it, overwrite it with every configured pass and unlink it
//! only once all passes succeeded. On any failure the file stays where it
//! is and the error says why.

use crate::config::ShredConfig;
use crate::engine::{ShredEngine, ShredSummary};
use crate::entropy::{EntropySource, SystemEntropy};
use crate::error::ShredError;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info};

pub struct Shredder<E = SystemEntropy> {
    engine: ShredEngine<E>,
}

impl Shredder<SystemEntropy> {
    pub fn new() -> Self {
        Self::with_engine(ShredEngine::new())
    }

    pub fn from_config(cfg: &ShredConfig) -> Self {
        Self::with_engine(
            ShredEngine::new()
                .with_passes(cfg.passes)
                .with_sync(cfg.sync),
        )
    }
}

impl Default for Shredder<SystemEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> Shredder<E> {
    pub fn with_engine(engine: ShredEngine<E>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ShredEngine<E> {
        &self.engine
    }

    /// Overwrite and remove the file at `path`.
    ///
    /// The handle is closed before the unlink on every path. If any pass
    /// fails the file is left in place, possibly partially overwritten.
    pub async fn shred(&self, path: impl AsRef<Path>) -> Result<ShredSummary, ShredError> {
        let path = path.as_ref();
        debug!(path = %path.display(), passes = self.engine.passes(), "opening file for shredding");

        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .await
            .map_err(|e| ShredError::open(path, e))?;
        let file = Arc::new(file.into_std().await);

        let result = self.engine.shred_file(file).await;

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                error!(path = %path.display(), error = %e, "shred failed, file left in place");
                return Err(e);
            }
        };

        fs::remove_file(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "content destroyed but file could not be removed");
            ShredError::remove(path, e)
        })?;

        info!(
            path = %path.display(),
            bytes = summary.bytes,
            passes = summary.passes,
            "file shredded"
        );
        Ok(summary)
    }
}

/// Shred `path` with the default engine.
pub async fn shred(path: impl AsRef<Path>) -> Result<ShredSummary, ShredError> {
    Shredder::new().shred(path).await
}
