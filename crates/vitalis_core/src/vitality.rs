//! Vitality influence curves.
//!
//! A vitality curve is a piecewise-linear map from the normalized age
//! of a decaying cell (0 = nearly dead, 1 = freshly entered decay) to a
//! signed influence weight in `[-2, 2]`. The curve is baked once per
//! change into a fixed 128-entry sampling table that the neighbor
//! aggregator reads in the hot loop; the table is small enough to stay
//! cache-resident.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Number of baked samples. Dense enough that decay chains up to the
/// 1024-state cap land on the table with negligible quantization loss.
pub const TABLE_SIZE: usize = 128;

/// One anchor point of a vitality curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A user-defined influence curve, described by its anchor points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalityCurve {
    pub anchors: Vec<Anchor>,
}

impl Default for VitalityCurve {
    fn default() -> Self {
        Self::flat_zero()
    }
}

impl VitalityCurve {
    /// The neutral curve: decaying cells contribute nothing.
    #[must_use]
    pub fn flat_zero() -> Self {
        Self {
            anchors: vec![Anchor::new(0.0, 0.0), Anchor::new(1.0, 0.0)],
        }
    }

    #[must_use]
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        Self {
            anchors: points.iter().map(|&(x, y)| Anchor::new(x, y)).collect(),
        }
    }

    /// Validates the anchor sequence: strictly increasing in `x`,
    /// spanning `[0, 1]`, with weights in `[-2, 2]`.
    ///
    /// Curves with fewer than two anchors are valid and bake to the
    /// zero table.
    pub fn validate(&self) -> Result<()> {
        if self.anchors.len() < 2 {
            return Ok(());
        }
        for pair in self.anchors.windows(2) {
            ensure!(
                pair[0].x < pair[1].x,
                "vitality anchors must be strictly increasing in x ({} >= {})",
                pair[0].x,
                pair[1].x
            );
        }
        let first = self.anchors[0];
        let last = self.anchors[self.anchors.len() - 1];
        ensure!(first.x == 0.0, "first vitality anchor must sit at x = 0");
        ensure!(last.x == 1.0, "last vitality anchor must sit at x = 1");
        for a in &self.anchors {
            ensure!(
                (-2.0..=2.0).contains(&a.y),
                "vitality weight {} outside [-2, 2]",
                a.y
            );
        }
        Ok(())
    }
}

/// The baked sampling table consulted by the neighbor aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalityTable {
    samples: [f32; TABLE_SIZE],
}

impl Default for VitalityTable {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl VitalityTable {
    /// All-zero table; decaying cells contribute nothing.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            samples: [0.0; TABLE_SIZE],
        }
    }

    /// Bakes a curve into its sampling table.
    ///
    /// Anchors are sorted by `x` first; each sample at `x = k / 127` is
    /// the linear interpolation of its surrounding anchor segment, with
    /// flat-hold extrapolation past the endpoints. Fewer than two
    /// anchors bake to the zero table.
    #[must_use]
    pub fn bake(curve: &VitalityCurve) -> Self {
        if curve.anchors.len() < 2 {
            return Self::zeroed();
        }
        let mut anchors = curve.anchors.clone();
        anchors.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let mut samples = [0.0; TABLE_SIZE];
        for (k, sample) in samples.iter_mut().enumerate() {
            let x = k as f32 / (TABLE_SIZE - 1) as f32;
            *sample = sample_anchors(&anchors, x);
        }
        Self { samples }
    }

    /// Table lookup for a normalized age in `[0, 1]`: `V[floor(v * 127)]`.
    #[inline]
    #[must_use]
    pub fn sample(&self, v: f32) -> f32 {
        let index = (v.clamp(0.0, 1.0) * (TABLE_SIZE - 1) as f32) as usize;
        self.samples[index.min(TABLE_SIZE - 1)]
    }

    /// Raw sample access, mainly for collaborators that upload the
    /// table to uniform storage.
    #[must_use]
    pub fn samples(&self) -> &[f32; TABLE_SIZE] {
        &self.samples
    }

    /// True when every sample is exactly zero, i.e. the classical
    /// integer neighbor count applies.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.samples.iter().all(|&s| s == 0.0)
    }
}

fn sample_anchors(anchors: &[Anchor], x: f32) -> f32 {
    let first = anchors[0];
    let last = anchors[anchors.len() - 1];
    if x <= first.x {
        return first.y;
    }
    if x >= last.x {
        return last.y;
    }
    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if x <= b.x {
            let span = b.x - a.x;
            if span <= f32::EPSILON {
                return a.y;
            }
            let t = (x - a.x) / span;
            return (1.0 - t) * a.y + t * b.y;
        }
    }
    last.y
}
