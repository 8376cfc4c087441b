//! # Vitalis IO
//!
//! Persistence layer for the Vitalis cellular-automaton engine.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The frame tape: bitset-packed generations with optional per-cell
//!   metrics, streamed as gzipped JSON lines
//!
//! The tape stores the alive/dead projection of each generation. For
//! two-state rules `unpack(pack(snapshot)) == snapshot`; deeper decay
//! chains round-trip their alive projection only.

/// Error types for tape operations
pub mod error;
/// Frame packing and tape files
pub mod tape;

pub use error::{IoError, Result};
pub use tape::{Frame, TapeReader, TapeWriter};
