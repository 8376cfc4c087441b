//! Double-buffered cell-state storage.
//!
//! The grid owns two equally-sized buffers: the front, read by the
//! current step, and the back, written with the next generation. A
//! commit swaps their roles and bumps the generation counter, so
//! external observers always see a complete generation. Out-of-range
//! writes are programming errors and panic.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shape of a paint stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaintShape {
    Circle,
    Square,
}

/// The front/back buffer pair plus the generation counter.
#[derive(Debug, Clone)]
pub struct GridBuffers {
    front: Vec<u16>,
    back: Vec<u16>,
    width: usize,
    height: usize,
    generation: u64,
}

impl GridBuffers {
    /// Allocates both buffers zeroed. Dimensions are validated by the
    /// caller (the engine refuses zero or oversized grids up front).
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            front: vec![0; len],
            back: vec![0; len],
            width,
            height,
            generation: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.front.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Cell state at linear index `i` as of the last completed step.
    #[inline]
    #[must_use]
    pub fn read_front(&self, i: usize) -> u16 {
        self.front[i]
    }

    /// Records the next-generation state at linear index `i`.
    /// Each index must be written exactly once per step.
    #[inline]
    pub fn write_back(&mut self, i: usize, s: u16) {
        self.back[i] = s;
    }

    /// Read-only view of the current generation.
    #[must_use]
    pub fn front(&self) -> &[u16] {
        &self.front
    }

    /// Splits the pair into a read-only front and writable back for one
    /// data-parallel evaluation pass.
    pub fn split(&mut self) -> (&[u16], &mut [u16]) {
        (&self.front, &mut self.back)
    }

    /// Swaps front and back and bumps the generation counter. Must not
    /// overlap with any cell evaluation.
    pub fn commit_step(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation += 1;
    }

    /// Overwrites one front-buffer cell.
    pub fn set(&mut self, x: usize, y: usize, s: u16) {
        let i = self.index(x, y);
        self.front[i] = s;
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.front[self.index(x, y)]
    }

    /// Writes `s` into a `w x h` front-buffer rectangle anchored at
    /// `(x, y)`, clipped to the grid.
    pub fn fill(&mut self, x: usize, y: usize, w: usize, h: usize, s: u16) {
        let x0 = x.min(self.width);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for row in y.min(self.height)..y1 {
            let start = row * self.width;
            self.front[start + x0..start + x1].fill(s);
        }
    }

    /// Zeroes the front buffer.
    pub fn clear(&mut self) {
        self.front.fill(0);
    }

    /// Randomizes the front buffer: each cell is alive with probability
    /// `density`; with `include_decay` on a multi-state rule, roughly a
    /// fifth of the remaining cells start somewhere along the decay
    /// chain so the tail states are visible from the first frame.
    pub fn randomize(
        &mut self,
        density: f64,
        include_decay: bool,
        num_states: u16,
        rng: &mut impl Rng,
    ) {
        let density = density.clamp(0.0, 1.0);
        let decay = include_decay && num_states > 2;
        for cell in &mut self.front {
            *cell = if rng.gen_bool(density) {
                1
            } else if decay && rng.gen_bool(0.2) {
                rng.gen_range(2..num_states)
            } else {
                0
            };
        }
    }

    /// Paints `state` into a circular or square stroke centered at
    /// `(cx, cy)`, each covered cell written with probability
    /// `density`. The stroke is clipped at the grid edge.
    pub fn paint(
        &mut self,
        cx: usize,
        cy: usize,
        radius: usize,
        state: u16,
        shape: PaintShape,
        density: f64,
        rng: &mut impl Rng,
    ) {
        let density = density.clamp(0.0, 1.0);
        let r = radius as i64;
        let x0 = cx as i64 - r;
        let y0 = cy as i64 - r;
        for y in y0..=cy as i64 + r {
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for x in x0..=cx as i64 + r {
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let dx = x - cx as i64;
                let dy = y - cy as i64;
                if shape == PaintShape::Circle && dx * dx + dy * dy > r * r {
                    continue;
                }
                if rng.gen_bool(density) {
                    let i = y as usize * self.width + x as usize;
                    self.front[i] = state;
                }
            }
        }
    }

    /// Replaces both buffers with zeroed allocations of the new size.
    /// Prior contents are lost; the generation counter carries on.
    pub fn resize(&mut self, width: usize, height: usize) {
        let len = width * height;
        self.front = vec![0; len];
        self.back = vec![0; len];
        self.width = width;
        self.height = height;
    }
}
