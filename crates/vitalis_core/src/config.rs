//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `config.toml`
//! file. All engine parameters can be customized through this
//! configuration system; `validate()` is the single gate every
//! configuration passes before it reaches the engine.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [grid]
//! width = 512
//! height = 512
//!
//! [rule]
//! birth = [3]
//! survive = [2, 3]
//! num_states = 2
//! neighborhood = "moore"
//! boundary = "torus"
//!
//! [vitality]
//! enabled = false
//! anchors = [{ x = 0.0, y = 0.0 }, { x = 1.0, y = 0.0 }]
//!
//! [seed]
//! kind = "random"
//! density = 0.25
//! include_decay = false
//! ```

use crate::neighborhood::Neighborhood;
use crate::rule::{RuleSpec, MAX_STATES};
use crate::seed::SeedSpec;
use crate::topology::Boundary;
use crate::vitality::{Anchor, VitalityCurve};
use serde::{Deserialize, Serialize};

/// Largest accepted grid side. Keeps a misconfigured grid from
/// attempting a multi-gigabyte allocation.
pub const MAX_DIMENSION: usize = 8192;

/// Grid dimensions.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

/// Rule parameters: masks as explicit neighbor-count lists plus the
/// lattice and boundary tokens.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RuleConfig {
    pub birth: Vec<u32>,
    pub survive: Vec<u32>,
    pub num_states: u16,
    pub neighborhood: Neighborhood,
    pub boundary: Boundary,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
            num_states: 2,
            neighborhood: Neighborhood::Moore,
            boundary: Boundary::Torus,
        }
    }
}

impl RuleConfig {
    pub fn to_rule(&self) -> anyhow::Result<RuleSpec> {
        RuleSpec::new(
            &self.birth,
            &self.survive,
            self.num_states,
            self.neighborhood,
            self.boundary,
        )
    }
}

/// Vitality-curve section. When disabled the engine runs with the
/// neutral (all-zero) table regardless of the anchors.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VitalityConfig {
    pub enabled: bool,
    pub anchors: Vec<Anchor>,
}

impl Default for VitalityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            anchors: VitalityCurve::flat_zero().anchors,
        }
    }
}

impl VitalityConfig {
    #[must_use]
    pub fn to_curve(&self) -> VitalityCurve {
        if self.enabled {
            VitalityCurve {
                anchors: self.anchors.clone(),
            }
        } else {
            VitalityCurve::flat_zero()
        }
    }
}

/// Top-level engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub rule: RuleConfig,
    pub vitality: VitalityConfig,
    pub seed: SeedSpec,
    /// RNG seed for reproducible soups and paints.
    pub rng_seed: Option<u64>,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.width > 0, "grid width must be positive");
        anyhow::ensure!(self.grid.height > 0, "grid height must be positive");
        anyhow::ensure!(
            self.grid.width <= MAX_DIMENSION,
            "grid width too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(
            self.grid.height <= MAX_DIMENSION,
            "grid height too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(
            self.rule.num_states >= 2,
            "num_states must be at least 2 (dead and alive)"
        );
        anyhow::ensure!(
            self.rule.num_states <= MAX_STATES,
            "num_states too large (max {MAX_STATES})"
        );

        let rule = self.rule.to_rule()?;
        if self.vitality.enabled {
            self.vitality.to_curve().validate()?;
        }
        self.seed.validate(&rule)?;
        Ok(())
    }

    /// Loads and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of the semantically-relevant sections, for
    /// stamping reproducible runs and tape headers.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid).as_bytes());
        hasher.update(format!("{:?}", self.rule).as_bytes());
        hasher.update(format!("{:?}", self.vitality).as_bytes());
        hasher.update(format!("{:?}", self.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}
