//! Competitive ownership layer over the grid engine.
//!
//! Two sides seed patterns from a piece budget during the seeding
//! phase, then the match runs for a fixed number of ticks. Each tick
//! snapshots the owned-cell state, steps the grid, and classifies the
//! outcome: dead cells lose their owner, survivors keep theirs, and
//! every birth goes to whichever side owned the strict majority of its
//! snapshot-alive neighbors. Exact ties alternate between the sides so
//! symmetric openings stay fair. Every assigned birth moves the running
//! score by one in that side's favor; the score's sign picks the winner
//! when the countdown ends.
//!
//! Classification must only ever read the pre-step snapshot. Reading
//! post-step state would make majority counts self-referential.

use thiserror::Error;

use super::grid::Grid;
use super::kernel::moore8;

/// One of the two competing sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Combined liveness and ownership of a single cell. An owner exists
/// only while the cell is alive; `Alive(None)` is a neutral live cell,
/// produced by tie births when alternation is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive(Option<Side>),
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive(_))
    }
}

/// Match phase. Transitions only move forward; `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Seeding,
    Running,
    Finished,
}

/// Why a placement was rejected. Every rejection leaves the engine
/// completely unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceError {
    #[error("side has already signaled ready")]
    SideReady,
    #[error("match is no longer in the seeding phase")]
    MatchStarted,
    #[error("pattern costs {cost} pieces but only {available} remain")]
    InsufficientBudget { cost: usize, available: usize },
    #[error("target cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },
}

/// Plain value configuration for a duel.
#[derive(Clone, Copy, Debug)]
pub struct DuelConfig {
    pub width: usize,
    pub height: usize,
    /// Seeding budget per side; placing a pattern costs its cell count.
    pub pieces_per_side: usize,
    /// Match length in calls to `step` after both sides are ready.
    pub match_ticks: u32,
    /// When false, a placement is rejected if any of its in-bounds
    /// target cells is already alive.
    pub allow_overlap: bool,
    /// When false, tie births stay neutral and score nothing.
    pub alternate_ties: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        DuelConfig {
            width: 64,
            height: 64,
            pieces_per_side: 64,
            match_ticks: 750,
            allow_overlap: false,
            alternate_ties: true,
        }
    }
}

/// The duel engine: a grid plus per-cell ownership, budgets, ready
/// flags, tick countdown and score.
pub struct DuelEngine {
    grid: Grid,
    cells: Vec<Cell>,
    prev: Vec<Cell>,
    phase: Phase,
    ready: [bool; 2],
    pieces: [usize; 2],
    score: i32,
    tie_to_a: bool,
    ticks_remaining: u32,
    births_last_step: [u32; 2],
    config: DuelConfig,
}

impl DuelEngine {
    /// Create a duel in the seeding phase with the Moore-8 kernel and
    /// classic S2-3/B3 rules installed.
    pub fn new(config: DuelConfig) -> Self {
        let mut grid = Grid::new(config.width, config.height);
        let (dxs, dys) = moore8();
        grid.set_kernel(&dxs, &dys);
        grid.set_rules(2, 3, 3, 3);

        let size = grid.width() * grid.height();
        DuelEngine {
            grid,
            cells: vec![Cell::Dead; size],
            prev: vec![Cell::Dead; size],
            phase: Phase::Seeding,
            ready: [false; 2],
            pieces: [config.pieces_per_side; 2],
            score: 0,
            tie_to_a: true,
            ticks_remaining: 0,
            births_last_step: [0; 2],
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running score: +1 per birth assigned to side A, -1 per birth
    /// assigned to side B.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Births assigned to each side during the most recent step.
    pub fn births_last_step(&self) -> (u32, u32) {
        (self.births_last_step[0], self.births_last_step[1])
    }

    /// Remaining seeding budget for a side.
    pub fn pieces(&self, side: Side) -> usize {
        self.pieces[side.index()]
    }

    pub fn is_ready(&self, side: Side) -> bool {
        self.ready[side.index()]
    }

    /// Steps left before the match finishes; zero outside `Running`.
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// The winner, decided only once the match is finished: a positive
    /// score goes to side A, anything else to side B.
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished => Some(if self.score > 0 { Side::A } else { Side::B }),
            _ => None,
        }
    }

    /// Read access to the wrapped grid (dimensions, alive buffer,
    /// kernel, generation).
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The combined alive/owner buffer in row-major order, for
    /// rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Forwarded to the grid; the ownership layer uses the same
    /// thresholds through it.
    pub fn set_rules(&mut self, s_min: i32, s_max: i32, b_min: i32, b_max: i32) {
        self.grid.set_rules(s_min, s_max, b_min, b_max);
    }

    /// Forwarded to the grid. The majority vote always tallies over the
    /// kernel the grid currently holds, so the two can never disagree.
    pub fn set_kernel(&mut self, dxs: &[i32], dys: &[i32]) {
        self.grid.set_kernel(dxs, dys);
    }

    /// Resize grid and ownership together, discarding all cell state.
    /// Returns the clamped dimensions.
    pub fn resize(&mut self, width: usize, height: usize) -> (usize, usize) {
        let (w, h) = self.grid.resize(width, height);
        self.cells = vec![Cell::Dead; w * h];
        self.prev = vec![Cell::Dead; w * h];
        (w, h)
    }

    /// Editor hook: write one cell, keeping grid liveness and ownership
    /// in lock step.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.grid.set(x, y, cell.is_alive());
        self.cells[y * self.grid.width() + x] = cell;
    }

    /// Mark a side ready (or take it back) during seeding. Once both
    /// sides are ready the match starts and the countdown loads.
    pub fn set_ready(&mut self, side: Side, ready: bool) {
        if self.phase != Phase::Seeding {
            return;
        }
        self.ready[side.index()] = ready;
        if self.ready == [true, true] {
            self.phase = Phase::Running;
            self.tie_to_a = true;
            self.ticks_remaining = self.config.match_ticks;
            self.births_last_step = [0; 2];
        }
    }

    /// Place a pattern of centered cell offsets for a side, paying its
    /// full cell count from the side's budget.
    ///
    /// Cells falling outside the grid are clipped silently (but still
    /// paid for). The call is atomic: any rejection leaves budgets,
    /// grid and ownership untouched.
    pub fn place_pattern(
        &mut self,
        side: Side,
        origin_x: i32,
        origin_y: i32,
        pattern: &[(i32, i32)],
    ) -> Result<(), PlaceError> {
        if self.phase != Phase::Seeding {
            return Err(PlaceError::MatchStarted);
        }
        if self.ready[side.index()] {
            return Err(PlaceError::SideReady);
        }
        let cost = pattern.len();
        let available = self.pieces[side.index()];
        if available < cost {
            return Err(PlaceError::InsufficientBudget { cost, available });
        }

        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;
        let targets: Vec<(usize, usize)> = pattern
            .iter()
            .filter_map(|&(dx, dy)| {
                let x = origin_x + dx;
                let y = origin_y + dy;
                (x >= 0 && x < w && y >= 0 && y < h).then_some((x as usize, y as usize))
            })
            .collect();

        if !self.config.allow_overlap {
            for &(x, y) in &targets {
                if self.cells[y * w as usize + x].is_alive() {
                    return Err(PlaceError::Occupied { x, y });
                }
            }
        }

        for &(x, y) in &targets {
            self.set_cell(x, y, Cell::Alive(Some(side)));
        }
        self.pieces[side.index()] -= cost;
        Ok(())
    }

    /// Advance the match by one tick. A no-op outside `Running`.
    ///
    /// Snapshot, grid step, then classification strictly from the
    /// snapshot; finally the countdown decrements and at zero the match
    /// finishes.
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.prev.copy_from_slice(&self.cells);
        self.grid.step();
        self.classify();

        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining == 0 {
            self.phase = Phase::Finished;
        }
    }

    /// Derive the post-step ownership of every cell from the pre-step
    /// snapshot. Scan order is row-major and must stay serial: the tie
    /// alternation flag is consumed in encounter order.
    fn classify(&mut self) {
        self.births_last_step = [0; 2];
        let w = self.grid.width();
        let h = self.grid.height();

        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                if !self.grid.get(x, y) {
                    self.cells[i] = Cell::Dead;
                    continue;
                }
                if let Cell::Alive(owner) = self.prev[i] {
                    // Survivors never change owner.
                    self.cells[i] = Cell::Alive(owner);
                    continue;
                }
                let owner = self.classify_birth(x, y);
                self.cells[i] = Cell::Alive(owner);
            }
        }
    }

    fn classify_birth(&mut self, x: usize, y: usize) -> Option<Side> {
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;

        let mut votes = [0u32; 2];
        for &(dx, dy) in self.grid.kernel() {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            if let Cell::Alive(Some(side)) = self.prev[ny as usize * w as usize + nx as usize] {
                votes[side.index()] += 1;
            }
        }

        let owner = if votes[Side::A.index()] > votes[Side::B.index()] {
            Some(Side::A)
        } else if votes[Side::B.index()] > votes[Side::A.index()] {
            Some(Side::B)
        } else if self.config.alternate_ties {
            let side = if self.tie_to_a { Side::A } else { Side::B };
            self.tie_to_a = !self.tie_to_a;
            Some(side)
        } else {
            None
        };

        if let Some(side) = owner {
            self.births_last_step[side.index()] += 1;
            self.score += match side {
                Side::A => 1,
                Side::B => -1,
            };
        }
        owner
    }
}
