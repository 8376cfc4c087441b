//! The simulation engine: neighbor aggregation and step evaluation.
//!
//! Every step is a pure function of the front buffer, the rule, and
//! the baked vitality table. Cells are evaluated row-parallel into the
//! back buffer, then the pair commits atomically. Reconfiguration
//! (rule, curve, size) validates first and leaves the engine untouched
//! on rejection; it must happen between steps.

use crate::config::{SimConfig, MAX_DIMENSION};
use crate::grid::{GridBuffers, PaintShape};
use crate::metrics::Metrics;
use crate::rule::RuleSpec;
use crate::seed::SeedSpec;
use crate::vitality::{VitalityCurve, VitalityTable};
use anyhow::{ensure, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;

pub struct Automaton {
    buffers: GridBuffers,
    rule: RuleSpec,
    curve: VitalityCurve,
    table: VitalityTable,
    metrics: Metrics,
    rng: ChaCha8Rng,
}

impl Automaton {
    /// Builds an engine from a validated configuration and applies its
    /// seed to the front buffer.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let rule = config.rule.to_rule()?;
        let curve = config.vitality.to_curve();
        let seed = config
            .rng_seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let mut engine = Self {
            buffers: GridBuffers::new(config.grid.width, config.grid.height),
            rule,
            table: VitalityTable::bake(&curve),
            curve,
            metrics: Metrics::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        engine.apply_seed(&config.seed)?;
        tracing::info!(
            width = config.grid.width,
            height = config.grid.height,
            rule = %engine.rule,
            "engine created"
        );
        Ok(engine)
    }

    /// Bare engine with an empty grid, for hosts that drive seeding and
    /// painting themselves.
    pub fn with_rule(width: usize, height: usize, rule: RuleSpec) -> Result<Self> {
        ensure!(
            width >= 1 && height >= 1,
            "grid dimensions must be positive"
        );
        ensure!(
            width <= MAX_DIMENSION && height <= MAX_DIMENSION,
            "grid dimensions too large (max {MAX_DIMENSION})"
        );
        rule.validate()?;
        Ok(Self {
            buffers: GridBuffers::new(width, height),
            rule,
            curve: VitalityCurve::flat_zero(),
            table: VitalityTable::zeroed(),
            metrics: Metrics::new(),
            rng: ChaCha8Rng::seed_from_u64(0),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.buffers.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.buffers.height()
    }

    #[must_use]
    pub fn rule(&self) -> RuleSpec {
        self.rule
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.buffers.generation()
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Cell state as of the last completed step.
    #[must_use]
    pub fn get_cell(&self, x: usize, y: usize) -> u16 {
        self.buffers.get(x, y)
    }

    /// Overwrites one cell of the current generation. For host paint
    /// tools; only valid between steps.
    pub fn set_cell(&mut self, x: usize, y: usize, s: u16) {
        assert!(s < self.rule.num_states, "state {s} outside the rule");
        self.buffers.set(x, y, s);
    }

    /// Read-only view of the current generation, row-major. Stable
    /// until the next `step`.
    #[must_use]
    pub fn snapshot(&self) -> &[u16] {
        self.buffers.front()
    }

    /// Replaces the current generation wholesale, e.g. for tape
    /// playback or the purity harness in the test suite.
    pub fn load(&mut self, cells: &[u16]) -> Result<()> {
        ensure!(
            cells.len() == self.buffers.len(),
            "snapshot length {} does not match the {}x{} grid",
            cells.len(),
            self.width(),
            self.height()
        );
        ensure!(
            cells.iter().all(|&s| s < self.rule.num_states),
            "snapshot contains states outside the rule"
        );
        for (i, &s) in cells.iter().enumerate() {
            self.buffers.set(i % self.width(), i / self.width(), s);
        }
        Ok(())
    }

    /// Number of fully-alive cells (`s == 1`) in the current generation.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.buffers.front().iter().filter(|&&s| s == 1).count()
    }

    /// Effective neighbor count of one cell under the active rule and
    /// vitality table.
    #[must_use]
    pub fn effective_neighbors(&self, x: usize, y: usize) -> u32 {
        effective_count(
            self.buffers.front(),
            self.width(),
            self.height(),
            &self.rule,
            &self.table,
            x,
            y,
        )
    }

    /// Advances the simulation by one generation.
    pub fn step(&mut self) {
        let started = Instant::now();
        let rule = self.rule;
        let table = &self.table;
        let width = self.buffers.width();
        let height = self.buffers.height();

        let (front, back) = self.buffers.split();
        back.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let n = effective_count(front, width, height, &rule, table, x, y);
                *cell = next_state(&rule, front[y * width + x], n);
            }
        });
        self.buffers.commit_step();

        let alive = self.alive_count();
        self.metrics
            .record_step(started.elapsed(), alive, width * height);
    }

    /// Replaces the rule between steps. The front buffer is preserved;
    /// an invalid rule is refused and the previous one stays active.
    pub fn set_rule(&mut self, rule: RuleSpec) -> Result<()> {
        if let Err(e) = rule.validate() {
            tracing::warn!(rule = %rule, "rejected rule update: {e}");
            return Err(e);
        }
        // Shrinking the state space may strand cells beyond the new
        // decay chain; fold them back into range.
        if rule.num_states < self.rule.num_states {
            let cap = rule.num_states;
            for y in 0..self.height() {
                for x in 0..self.width() {
                    if self.buffers.get(x, y) >= cap {
                        self.buffers.set(x, y, 0);
                    }
                }
            }
        }
        self.rule = rule;
        self.metrics.increment_counter("rule_update");
        tracing::info!(rule = %self.rule, "rule updated");
        Ok(())
    }

    /// Replaces the vitality curve and re-bakes the sampling table.
    pub fn set_vitality(&mut self, curve: VitalityCurve) -> Result<()> {
        curve.validate()?;
        self.table = VitalityTable::bake(&curve);
        self.curve = curve;
        self.metrics.increment_counter("vitality_rebake");
        Ok(())
    }

    #[must_use]
    pub fn vitality(&self) -> &VitalityCurve {
        &self.curve
    }

    #[must_use]
    pub fn vitality_table(&self) -> &VitalityTable {
        &self.table
    }

    /// Reallocates the buffers at a new size. Contents are lost, the
    /// generation counter carries on, and the engine is untouched when
    /// the dimensions are refused.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        ensure!(
            width >= 1 && height >= 1,
            "grid dimensions must be positive"
        );
        ensure!(
            width <= MAX_DIMENSION && height <= MAX_DIMENSION,
            "grid dimensions too large (max {MAX_DIMENSION})"
        );
        self.buffers.resize(width, height);
        tracing::info!(width, height, "grid resized");
        Ok(())
    }

    /// Writes a state into a rectangle of the current generation.
    pub fn fill(&mut self, x: usize, y: usize, w: usize, h: usize, state: u16) {
        assert!(state < self.rule.num_states, "state {state} outside the rule");
        self.buffers.fill(x, y, w, h, state);
    }

    /// Paints a stroke into the current generation; only valid between
    /// steps.
    pub fn paint(
        &mut self,
        cx: usize,
        cy: usize,
        radius: usize,
        state: u16,
        shape: PaintShape,
        density: f64,
    ) {
        assert!(state < self.rule.num_states, "state {state} outside the rule");
        self.buffers
            .paint(cx, cy, radius, state, shape, density, &mut self.rng);
    }

    /// Randomizes the current generation.
    pub fn randomize(&mut self, density: f64, include_decay: bool) {
        let num_states = self.rule.num_states;
        self.buffers
            .randomize(density, include_decay, num_states, &mut self.rng);
    }

    /// Clears and re-seeds the current generation.
    pub fn apply_seed(&mut self, seed: &SeedSpec) -> Result<()> {
        seed.validate(&self.rule)?;
        seed.apply(&mut self.buffers, &self.rule, &mut self.rng);
        Ok(())
    }

    /// Kills every cell in the current generation.
    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

/// Walks the neighborhood template of `(x, y)`, resolves each offset
/// through the boundary, and sums the per-neighbor contributions:
/// alive cells weigh 1, dead (or absent) cells 0, and decaying cells
/// the vitality sample of their normalized age. The sum is clamped to
/// `[0, max_count]` and truncated, preserving the bitmask indexing of
/// the classical integer count.
fn effective_count(
    front: &[u16],
    width: usize,
    height: usize,
    rule: &RuleSpec,
    table: &VitalityTable,
    x: usize,
    y: usize,
) -> u32 {
    let mut sum = 0.0f32;
    for &(dx, dy) in rule.neighborhood.offsets(y) {
        let Some((nx, ny)) =
            rule.boundary
                .resolve(x as i64 + dx as i64, y as i64 + dy as i64, width, height)
        else {
            continue;
        };
        let s = front[ny * width + nx];
        if s == 1 {
            sum += 1.0;
        } else if s >= 2 {
            sum += table.sample(decay_vitality(s, rule.num_states));
        }
    }
    let max = rule.neighborhood.max_count() as f32;
    sum.clamp(0.0, max) as u32
}

/// Normalized age of a decay-state cell: exactly 1 on entering the
/// chain (`s == 2`), falling linearly toward 0 as it nears death.
#[inline]
fn decay_vitality(s: u16, num_states: u16) -> f32 {
    f32::from(num_states - s) / f32::from(num_states - 2)
}

/// The B/S + decay-chain transition for one cell.
fn next_state(rule: &RuleSpec, s: u16, n: u32) -> u16 {
    match s {
        0 => u16::from(rule.births_on(n)),
        1 => {
            if rule.survives_on(n) {
                1
            } else if rule.has_decay() {
                2
            } else {
                0
            }
        }
        _ => {
            let next = s + 1;
            if next >= rule.num_states {
                0
            } else {
                next
            }
        }
    }
}
