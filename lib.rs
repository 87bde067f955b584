//! # Tatter - Secure File Deletion
//!
//! Tatter destroys a file by overwriting its whole byte range with
//! cryptographically random data several times, concurrently, and only
//! then unlinking it.
//!
//! ## Features
//!
//! - **Concurrent passes**: every pass rewrites the full file on its own worker
//! - **Adaptive buffers**: buffer size scales with the file, from 4 KiB up to 64 MiB
//! - **Positioned writes**: passes never share a file cursor
//! - **All-or-nothing removal**: a file is unlinked only if every pass succeeded
//!
//! ## Quick Start
//!
//! ```no_run
//! use tatter::Shredder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let summary = Shredder::new().shred("./secret.txt").await?;
//!     println!("overwrote {} bytes {} times", summary.bytes, summary.passes);
//!     Ok(())
//! }
//! ```
//!
//! ## Limits
//!
//! Only the byte range exposed through the file's random-access write
//! interface is overwritten. Flash wear-leveling, copy-on-write snapshots
//! and journal copies are out of reach.

pub mod buffer;
pub mod config;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod pass;
pub mod shredder;

// Re-export common types for convenience
pub use config::ShredConfig;
pub use engine::{ShredEngine, ShredSummary};
pub use error::ShredError;
pub use shredder::{shred, Shredder};
