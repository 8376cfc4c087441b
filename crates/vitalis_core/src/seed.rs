//! Initial-pattern generators.
//!
//! A seed describes the initial contents of the front buffer: a random
//! soup, a geometric figure centered on the grid, a literal cell grid,
//! or a named pattern from the small built-in library, optionally tiled
//! across the grid with a spacing.

use crate::grid::GridBuffers;
use crate::rule::RuleSpec;
use anyhow::{ensure, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named patterns from the canonical Life references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternName {
    Blinker,
    Glider,
    Toad,
    Block,
    Lwss,
    RPentomino,
}

impl PatternName {
    pub const ALL: [PatternName; 6] = [
        PatternName::Blinker,
        PatternName::Glider,
        PatternName::Toad,
        PatternName::Block,
        PatternName::Lwss,
        PatternName::RPentomino,
    ];

    /// Alive cells of the pattern, relative to its top-left corner.
    #[must_use]
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            PatternName::Blinker => &[(0, 0), (1, 0), (2, 0)],
            PatternName::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            PatternName::Toad => &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
            PatternName::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            PatternName::Lwss => &[
                (1, 0),
                (4, 0),
                (0, 1),
                (0, 2),
                (4, 2),
                (0, 3),
                (1, 3),
                (2, 3),
                (3, 3),
            ],
            PatternName::RPentomino => &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
        }
    }

    /// Bounding-box size of the pattern.
    #[must_use]
    pub fn extent(self) -> (usize, usize) {
        let cells = self.cells();
        let w = cells.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1;
        let h = cells.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1;
        (w, h)
    }

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            PatternName::Blinker => "blinker",
            PatternName::Glider => "glider",
            PatternName::Toad => "toad",
            PatternName::Block => "block",
            PatternName::Lwss => "lwss",
            PatternName::RPentomino => "rPentomino",
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PatternName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|p| p.token() == s)
            .ok_or_else(|| anyhow::anyhow!("unrecognized pattern name '{s}'"))
    }
}

/// Declarative description of the initial buffer contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SeedSpec {
    /// Independent per-cell soup.
    Random { density: f64, include_decay: bool },
    /// Filled disk centered on the grid.
    Disk { radius: usize },
    /// Annulus centered on the grid; `thickness` counts inward from
    /// `radius`.
    Ring { radius: usize, thickness: usize },
    /// Horizontal plus vertical bars through the center, each
    /// `2 * half_width + 1` cells across.
    Cross { half_width: usize },
    /// Literal rows, stamped centered: `.` dead, `O` or `#` alive,
    /// digits for decay states.
    Literal { rows: Vec<String> },
    /// Named pattern stamped at the center, or tiled across the grid
    /// when a spacing is given.
    Pattern {
        name: PatternName,
        #[serde(default)]
        tile_spacing: Option<usize>,
    },
}

impl Default for SeedSpec {
    fn default() -> Self {
        SeedSpec::Random {
            density: 0.25,
            include_decay: false,
        }
    }
}

impl SeedSpec {
    pub fn validate(&self, rule: &RuleSpec) -> Result<()> {
        match self {
            SeedSpec::Random { density, .. } => {
                ensure!(
                    (0.0..=1.0).contains(density),
                    "seed density {density} outside [0, 1]"
                );
            }
            SeedSpec::Ring { radius, thickness } => {
                ensure!(
                    *thickness >= 1 && thickness <= radius,
                    "ring thickness must lie in [1, radius]"
                );
            }
            SeedSpec::Literal { rows } => {
                for row in rows {
                    for ch in row.chars() {
                        let state = literal_state(ch)?;
                        ensure!(
                            state < rule.num_states,
                            "literal state {state} outside the rule's {} states",
                            rule.num_states
                        );
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Writes the seed into the front buffer. The buffer is cleared
    /// first; the caller validates beforehand.
    pub fn apply(&self, grid: &mut GridBuffers, rule: &RuleSpec, rng: &mut impl Rng) {
        let (w, h) = (grid.width(), grid.height());
        let (cx, cy) = (w / 2, h / 2);
        grid.clear();
        match self {
            SeedSpec::Random {
                density,
                include_decay,
            } => {
                grid.randomize(*density, *include_decay, rule.num_states, rng);
            }
            SeedSpec::Disk { radius } => {
                let r = *radius as i64;
                for_centered_box(w, h, cx, cy, r, |grid_x, grid_y, dx, dy| {
                    if dx * dx + dy * dy <= r * r {
                        grid.set(grid_x, grid_y, 1);
                    }
                });
            }
            SeedSpec::Ring { radius, thickness } => {
                let outer = *radius as i64;
                let inner = (*radius - *thickness) as i64;
                for_centered_box(w, h, cx, cy, outer, |grid_x, grid_y, dx, dy| {
                    let d2 = dx * dx + dy * dy;
                    if d2 <= outer * outer && d2 > inner * inner {
                        grid.set(grid_x, grid_y, 1);
                    }
                });
            }
            SeedSpec::Cross { half_width } => {
                let hw = *half_width;
                for y in 0..h {
                    for x in 0..w {
                        if x.abs_diff(cx) <= hw || y.abs_diff(cy) <= hw {
                            grid.set(x, y, 1);
                        }
                    }
                }
            }
            SeedSpec::Literal { rows } => {
                let ph = rows.len();
                let pw = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
                let x0 = cx.saturating_sub(pw / 2);
                let y0 = cy.saturating_sub(ph / 2);
                for (dy, row) in rows.iter().enumerate() {
                    for (dx, ch) in row.chars().enumerate() {
                        let (x, y) = (x0 + dx, y0 + dy);
                        if x < w && y < h {
                            // Validated ahead of time; unknown chars read as dead.
                            grid.set(x, y, literal_state(ch).unwrap_or(0));
                        }
                    }
                }
            }
            SeedSpec::Pattern { name, tile_spacing } => {
                let (pw, ph) = name.extent();
                match tile_spacing {
                    Some(spacing) => {
                        let stride_x = pw + spacing;
                        let stride_y = ph + spacing;
                        for y0 in (0..h).step_by(stride_y.max(1)) {
                            for x0 in (0..w).step_by(stride_x.max(1)) {
                                stamp(grid, name.cells(), x0, y0);
                            }
                        }
                    }
                    None => {
                        stamp(
                            grid,
                            name.cells(),
                            cx.saturating_sub(pw / 2),
                            cy.saturating_sub(ph / 2),
                        );
                    }
                }
            }
        }
    }
}

fn literal_state(ch: char) -> Result<u16> {
    match ch {
        '.' | ' ' => Ok(0),
        'O' | '#' => Ok(1),
        _ => ch
            .to_digit(10)
            .map(|d| d as u16)
            .ok_or_else(|| anyhow::anyhow!("'{ch}' is not a literal cell state")),
    }
}

fn stamp(grid: &mut GridBuffers, cells: &[(usize, usize)], x0: usize, y0: usize) {
    for &(dx, dy) in cells {
        let (x, y) = (x0 + dx, y0 + dy);
        if x < grid.width() && y < grid.height() {
            grid.set(x, y, 1);
        }
    }
}

fn for_centered_box(
    w: usize,
    h: usize,
    cx: usize,
    cy: usize,
    r: i64,
    mut visit: impl FnMut(usize, usize, i64, i64),
) {
    for y in cy as i64 - r..=cy as i64 + r {
        if y < 0 || y >= h as i64 {
            continue;
        }
        for x in cx as i64 - r..=cx as i64 + r {
            if x < 0 || x >= w as i64 {
                continue;
            }
            visit(x as usize, y as usize, x - cx as i64, y - cy as i64);
        }
    }
}
