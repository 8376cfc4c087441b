//! # Vitalis Core
//!
//! The simulation kernel for Vitalis - a generalized cellular-automaton
//! engine for B/S and "Generations" rules.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Double-buffered grid storage with atomic generation commits
//! - Boundary topologies from the plane through the projective plane
//! - Square and hexagonal (odd-r) neighborhood templates
//! - Vitality influence curves baked to a fixed sampling table
//! - Row-parallel step evaluation
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! The components form a DAG, leaves first: the buffer pair feeds the
//! boundary resolver, which feeds the neighbor aggregator, which the
//! step evaluator drives; the vitality table plugs into aggregation.
//! There are no back-edges, and a step is a pure function of the front
//! buffer plus the rule.
//!
//! ## Example
//!
//! ```
//! use vitalis_core::{Automaton, SimConfig};
//!
//! let mut config = SimConfig::default();
//! config.grid.width = 64;
//! config.grid.height = 64;
//! config.rng_seed = Some(42);
//!
//! let mut engine = Automaton::new(&config).unwrap();
//! engine.step();
//! assert_eq!(engine.generation(), 1);
//! ```

/// The simulation engine: neighbor aggregation and step evaluation
pub mod automaton;
/// Configuration management for simulation parameters
pub mod config;
/// Double-buffered cell-state storage
pub mod grid;
/// Performance metrics collection and logging
pub mod metrics;
/// Lattice neighborhood templates
pub mod neighborhood;
/// Rule specifications: masks, decay depth, lattice, boundary
pub mod rule;
/// Initial-pattern generators
pub mod seed;
/// Boundary topologies and coordinate resolution
pub mod topology;
/// Vitality influence curves and the baked sampling table
pub mod vitality;

pub use automaton::Automaton;
pub use config::SimConfig;
pub use grid::{GridBuffers, PaintShape};
pub use metrics::{init_logging, Metrics};
pub use neighborhood::Neighborhood;
pub use rule::RuleSpec;
pub use seed::{PatternName, SeedSpec};
pub use topology::Boundary;
pub use vitality::{Anchor, VitalityCurve, VitalityTable};
