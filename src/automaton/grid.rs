//! Bounded double-buffered grid with generalized life rules.
//!
//! A live cell survives iff its neighbor count lies in `[s_min, s_max]`;
//! a dead cell is born iff the count lies in `[b_min, b_max]`. Neighbors
//! are defined by an arbitrary offset kernel; offsets landing outside
//! the grid contribute nothing (bounded edges, no wraparound).
//!
//! Stepping is double-buffered: every cell of the next generation is
//! computed from the untouched current buffer, then the buffers swap
//! once. Rows are independent under that invariant, so the pass runs
//! row-parallel on rayon without affecting the result.

use rand::Rng;
use rayon::prelude::*;

/// A bounded 2D grid of binary cells.
pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<bool>,
    next: Vec<bool>,
    s_min: i32,
    s_max: i32,
    b_min: i32,
    b_max: i32,
    kernel: Vec<(i32, i32)>,
    generation: u64,
}

impl Grid {
    /// Create a grid with the given dimensions, all cells dead.
    ///
    /// Starts with classic Conway rules (S2-3/B3) and an empty kernel;
    /// callers install a kernel before stepping does anything useful.
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Grid {
            width: 0,
            height: 0,
            current: Vec::new(),
            next: Vec::new(),
            s_min: 2,
            s_max: 3,
            b_min: 3,
            b_max: 3,
            kernel: Vec::new(),
            generation: 0,
        };
        grid.resize(width, height);
        grid
    }

    /// Reallocate both buffers to the new dimensions, discarding all
    /// previous cell state. Dimensions are clamped to at least 1.
    ///
    /// Returns the clamped `(width, height)` so renderers know what to
    /// reallocate on their side.
    pub fn resize(&mut self, width: usize, height: usize) -> (usize, usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        let size = self.width * self.height;
        self.current = vec![false; size];
        self.next = vec![false; size];
        self.generation = 0;
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Generations stepped since creation or the last resize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The whole current buffer in row-major order, for rendering.
    pub fn cells(&self) -> &[bool] {
        &self.current
    }

    /// Calculate the linear index for a coordinate.
    ///
    /// Out-of-range coordinates are a caller bug, not a supported input:
    /// they panic rather than aliasing some other cell.
    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.current[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.current[idx] = alive;
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.current.fill(false);
    }

    /// Set each cell alive independently with the given probability,
    /// clamped to [0, 1]. The RNG is caller-supplied so a seeded run
    /// reproduces exactly.
    pub fn randomize<R: Rng + ?Sized>(&mut self, alive_probability: f64, rng: &mut R) {
        let p = alive_probability.clamp(0.0, 1.0);
        for cell in &mut self.current {
            *cell = rng.random::<f64>() < p;
        }
    }

    /// Store survive/birth thresholds verbatim. No clamping happens at
    /// this layer; nonsensical ranges simply never match any count.
    pub fn set_rules(&mut self, s_min: i32, s_max: i32, b_min: i32, b_max: i32) {
        self.s_min = s_min;
        self.s_max = s_max;
        self.b_min = b_min;
        self.b_max = b_max;
    }

    /// Install the neighbor kernel from parallel offset lists. Length
    /// mismatches are truncated to the shorter list; empty lists give an
    /// empty kernel, making every neighbor count zero.
    ///
    /// Duplicate offsets are kept and count the same neighbor twice.
    pub fn set_kernel(&mut self, dxs: &[i32], dys: &[i32]) {
        self.kernel = dxs.iter().zip(dys).map(|(&dx, &dy)| (dx, dy)).collect();
    }

    /// The kernel offsets currently applied by `step`.
    pub fn kernel(&self) -> &[(i32, i32)] {
        &self.kernel
    }

    /// Advance the grid by one generation.
    pub fn step(&mut self) {
        let width = self.width;
        let height = self.height;
        let (s_min, s_max, b_min, b_max) = (self.s_min, self.s_max, self.b_min, self.b_max);
        let current = &self.current;
        let kernel = &self.kernel;

        self.next
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let mut n = 0i32;
                    for &(dx, dy) in kernel {
                        let nx = x as i32 + dx;
                        let ny = y as i32 + dy;
                        if nx < 0 || nx >= width as i32 || ny < 0 || ny >= height as i32 {
                            continue;
                        }
                        if current[ny as usize * width + nx as usize] {
                            n += 1;
                        }
                    }

                    let alive = current[y * width + x];
                    *out = if alive {
                        n >= s_min && n <= s_max
                    } else {
                        n >= b_min && n <= b_max
                    };
                }
            });

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }
}
