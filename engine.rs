//! Concurrent multi-pass overwrite of an open file.
//!
//! [`ShredEngine::shred_file`] captures the file length once, sizes a
//! buffer from it and launches every pass at the same time on tokio's
//! blocking pool. Each pass rewrites the whole byte range from its own
//! random stream. The verdict is success only when all passes succeed;
//! otherwise the first failure to arrive is returned after the remaining
//! passes have been drained.

use crate::buffer::calc_buf;
use crate::entropy::{EntropySource, SystemEntropy};
use crate::error::ShredError;
use crate::pass::run_pass;
use std::fs::File;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Number of overwrite passes per file. Never lowered.
pub const PASSES: usize = 3;

/// Outcome of a fully overwritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShredSummary {
    /// File length captured before the first pass
    pub bytes: u64,
    /// Buffer size shared by all passes
    pub buffer_size: usize,
    /// Passes that completed
    pub passes: usize,
}

pub struct ShredEngine<E = SystemEntropy> {
    entropy: Arc<E>,
    passes: usize,
    sync: bool,
}

impl ShredEngine<SystemEntropy> {
    pub fn new() -> Self {
        Self::with_entropy(SystemEntropy)
    }
}

impl Default for ShredEngine<SystemEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> ShredEngine<E> {
    pub fn with_entropy(entropy: E) -> Self {
        Self {
            entropy: Arc::new(entropy),
            passes: PASSES,
            sync: true,
        }
    }

    /// Run more passes than the default. Values below [`PASSES`] are raised to it.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes.max(PASSES);
        self
    }

    /// Flush the file to storage after the last pass (on by default).
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Overwrite every byte of `file` once per pass, all passes concurrently.
    pub async fn shred_file(&self, file: Arc<File>) -> Result<ShredSummary, ShredError> {
        let bytes = file.metadata().map_err(ShredError::Stat)?.len();
        let buffer_size = calc_buf(i64::try_from(bytes).unwrap_or(i64::MAX));
        debug!(bytes, buffer_size, passes = self.passes, "starting overwrite passes");

        let mut set = JoinSet::new();
        for pass in 0..self.passes {
            let file = Arc::clone(&file);
            let mut rng = self.entropy.stream();
            set.spawn_blocking(move || (pass, run_pass(Some(&*file), bytes, buffer_size, &mut rng)));
        }

        // Drain every pass even after a failure so no worker outlives the handle.
        let mut verdict = Ok(());
        while let Some(joined) = set.join_next().await {
            let err = match joined {
                Ok((pass, Ok(()))) => {
                    debug!(pass, bytes, "overwrite pass complete");
                    continue;
                }
                Ok((pass, Err(e))) => {
                    warn!(pass, error = %e, "overwrite pass failed");
                    e
                }
                Err(e) => {
                    warn!(error = %e, "overwrite pass aborted");
                    ShredError::PassAborted(e.to_string())
                }
            };
            if verdict.is_ok() {
                verdict = Err(err);
            }
        }
        verdict?;

        if self.sync {
            let file = Arc::clone(&file);
            tokio::task::spawn_blocking(move || file.sync_all())
                .await
                .map_err(|e| ShredError::PassAborted(e.to_string()))?
                .map_err(ShredError::Sync)?;
        }

        Ok(ShredSummary {
            bytes,
            buffer_size,
            passes: self.passes,
        })
    }
}
