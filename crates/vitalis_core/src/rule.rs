//! Rule specifications: B/S bitmasks, decay depth, lattice, boundary.
//!
//! A rule is a compact `Copy` value, cheap to pass by value into every
//! step and immutable for the duration of one. Bit `k` of a mask means
//! "neighbor count `k` triggers birth / survival".

use crate::neighborhood::Neighborhood;
use crate::topology::Boundary;
use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on decay-chain depth, table-index resolution permitting.
pub const MAX_STATES: u16 = 1024;

/// A generalized B/S ("Generations") rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub birth_mask: u32,
    pub survive_mask: u32,
    /// Number of cell states: 2 for Life-like rules, more for decay chains.
    pub num_states: u16,
    pub neighborhood: Neighborhood,
    pub boundary: Boundary,
}

impl Default for RuleSpec {
    /// Conway's Life (B3/S23) on a torus.
    fn default() -> Self {
        Self {
            birth_mask: 1 << 3,
            survive_mask: (1 << 2) | (1 << 3),
            num_states: 2,
            neighborhood: Neighborhood::Moore,
            boundary: Boundary::Torus,
        }
    }
}

impl RuleSpec {
    pub fn new(
        birth: &[u32],
        survive: &[u32],
        num_states: u16,
        neighborhood: Neighborhood,
        boundary: Boundary,
    ) -> Result<Self> {
        let rule = Self {
            birth_mask: mask_from_counts(birth),
            survive_mask: mask_from_counts(survive),
            num_states,
            neighborhood,
            boundary,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Parses a rulestring of the form `B3/S23` with an optional
    /// Generations suffix, e.g. `B2/S34/G4`. Lattice and boundary keep
    /// their defaults and can be adjusted on the returned value.
    pub fn parse_rulestring(s: &str) -> Result<Self> {
        let mut rule = Self {
            birth_mask: 0,
            survive_mask: 0,
            ..Self::default()
        };
        let mut saw_birth = false;
        let mut saw_survive = false;
        for part in s.split('/') {
            let part = part.trim();
            let Some(tag) = part.chars().next() else {
                bail!("empty segment in rulestring '{s}'");
            };
            let body = &part[tag.len_utf8()..];
            match tag.to_ascii_uppercase() {
                'B' => {
                    rule.birth_mask = digit_mask(body)?;
                    saw_birth = true;
                }
                'S' => {
                    rule.survive_mask = digit_mask(body)?;
                    saw_survive = true;
                }
                'G' => {
                    rule.num_states = body
                        .parse()
                        .map_err(|_| anyhow::anyhow!("bad state count '{body}' in '{s}'"))?;
                }
                _ => bail!("unrecognized rulestring segment '{part}'"),
            }
        }
        ensure!(
            saw_birth && saw_survive,
            "rulestring '{s}' needs both a B and an S segment"
        );
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.num_states >= 2, "a rule needs at least two states");
        ensure!(
            self.num_states <= MAX_STATES,
            "state count {} exceeds the {} cap",
            self.num_states,
            MAX_STATES
        );
        let max = self.neighborhood.max_count();
        let overflow = !mask_up_to(max);
        ensure!(
            self.birth_mask & overflow == 0,
            "birth mask references counts above {max} ({})",
            self.neighborhood
        );
        ensure!(
            self.survive_mask & overflow == 0,
            "survive mask references counts above {max} ({})",
            self.neighborhood
        );
        Ok(())
    }

    /// Whether a dead cell with `n` effective neighbors is born.
    #[inline]
    #[must_use]
    pub fn births_on(&self, n: u32) -> bool {
        n < 32 && (self.birth_mask >> n) & 1 == 1
    }

    /// Whether an alive cell with `n` effective neighbors survives.
    #[inline]
    #[must_use]
    pub fn survives_on(&self, n: u32) -> bool {
        n < 32 && (self.survive_mask >> n) & 1 == 1
    }

    /// True when the rule carries decay states beyond alive/dead.
    #[inline]
    #[must_use]
    pub fn has_decay(&self) -> bool {
        self.num_states > 2
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        write_counts(f, self.birth_mask)?;
        write!(f, "/S")?;
        write_counts(f, self.survive_mask)?;
        if self.has_decay() {
            write!(f, "/G{}", self.num_states)?;
        }
        Ok(())
    }
}

/// Builds a mask from explicit neighbor counts.
#[must_use]
pub fn mask_from_counts(counts: &[u32]) -> u32 {
    counts
        .iter()
        .filter(|&&c| c < 32)
        .fold(0, |mask, &c| mask | 1 << c)
}

fn mask_up_to(max: u32) -> u32 {
    if max >= 31 {
        u32::MAX
    } else {
        (1 << (max + 1)) - 1
    }
}

fn digit_mask(body: &str) -> Result<u32> {
    let mut mask = 0;
    for ch in body.chars() {
        let Some(d) = ch.to_digit(10) else {
            bail!("'{ch}' is not a neighbor-count digit");
        };
        mask |= 1 << d;
    }
    Ok(mask)
}

fn write_counts(f: &mut fmt::Formatter<'_>, mask: u32) -> fmt::Result {
    for count in 0..32 {
        if (mask >> count) & 1 == 1 {
            write!(f, "{count}")?;
        }
    }
    Ok(())
}
