//! Random byte suppliers for overwrite passes.
//!
//! Each pass draws from its own stream obtained through
//! [`EntropySource::stream`], so passes never share generator state.

use rand_core::{CryptoRng, OsRng, RngCore};

/// Hands out independent cryptographically secure byte streams.
pub trait EntropySource: Send + Sync + 'static {
    type Rng: RngCore + CryptoRng + Send + 'static;

    /// A fresh stream for one pass.
    fn stream(&self) -> Self::Rng;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    type Rng = OsRng;

    fn stream(&self) -> OsRng {
        OsRng
    }
}
