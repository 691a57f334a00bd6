//! 15x15 neighbor kernel editing surface.
//!
//! The mask is a bit-packed 225-cell boolean matrix that UI editors
//! paint into. `offsets` turns the set bits into a list of `(dx, dy)`
//! neighbor offsets relative to the center at (7, 7); the center itself
//! can be toggled like any other cell but is never emitted and never
//! counted. The offset list is rebuilt lazily and cached until the next
//! mutation, and its order is a fixed row-major scan so identical bit
//! state always yields an identical kernel.

/// Side length of the editing surface.
pub const MASK_SIZE: usize = 15;

/// Coordinate of the center cell on both axes.
pub const MASK_CENTER: usize = MASK_SIZE / 2;

const BITS: usize = MASK_SIZE * MASK_SIZE;
const WORDS: usize = (BITS + 63) / 64;
const CENTER_BIT: usize = MASK_CENTER * MASK_SIZE + MASK_CENTER;

/// Bit-packed 15x15 kernel editing mask with a cached offset list.
pub struct KernelMask {
    words: [u64; WORDS],
    active: bool,
    dirty: bool,
    offsets: Vec<(i32, i32)>,
    revision: u64,
}

impl Default for KernelMask {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelMask {
    /// Create an empty mask, active by default.
    pub fn new() -> Self {
        KernelMask {
            words: [0; WORDS],
            active: true,
            dirty: true,
            offsets: Vec::new(),
            revision: 0,
        }
    }

    /// Whether `offsets` consults the stored bits at all.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Flip the active gate. A no-op when the value is unchanged;
    /// otherwise the cached offsets are invalidated and the revision
    /// advances even though the underlying bits did not move.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.changed();
    }

    /// Counts every notifying mutation, redundant writes included.
    /// Editing UIs poll this to know when to repaint.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read a cell. Out-of-range coordinates read as false.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= MASK_SIZE || y >= MASK_SIZE {
            return false;
        }
        let bit = y * MASK_SIZE + x;
        self.words[bit / 64] >> (bit % 64) & 1 != 0
    }

    /// Write a cell. Out-of-range coordinates are a silent no-op and do
    /// not notify; in-range writes always notify, even when the stored
    /// value does not change.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= MASK_SIZE || y >= MASK_SIZE {
            return;
        }
        let bit = y * MASK_SIZE + x;
        let mask = 1u64 << (bit % 64);
        if value {
            self.words[bit / 64] |= mask;
        } else {
            self.words[bit / 64] &= !mask;
        }
        self.changed();
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.words = [0; WORDS];
        self.changed();
    }

    /// Number of set cells excluding the center, regardless of the
    /// active gate.
    pub fn active_count(&self) -> u32 {
        let mut count = 0;
        for (i, &word) in self.words.iter().enumerate() {
            let word = if i == CENTER_BIT / 64 {
                word & !(1u64 << (CENTER_BIT % 64))
            } else {
                word
            };
            count += word.count_ones();
        }
        count
    }

    /// The kernel offsets encoded by the mask: `(x - 7, y - 7)` for
    /// every set cell except the center, in row-major scan order.
    ///
    /// Returns an empty kernel whenever the mask is inactive, without
    /// consulting the stored bits. Otherwise the cached list is rebuilt
    /// if a mutation happened since the last call.
    pub fn offsets(&mut self) -> &[(i32, i32)] {
        if !self.active {
            return &[];
        }
        if self.dirty {
            self.rebuild_offsets();
        }
        &self.offsets
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        for y in 0..MASK_SIZE {
            for x in 0..MASK_SIZE {
                if x == MASK_CENTER && y == MASK_CENTER {
                    continue;
                }
                let bit = y * MASK_SIZE + x;
                if self.words[bit / 64] >> (bit % 64) & 1 != 0 {
                    self.offsets
                        .push((x as i32 - MASK_CENTER as i32, y as i32 - MASK_CENTER as i32));
                }
            }
        }
        self.dirty = false;
    }

    fn changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

/// The classic Moore-8 neighborhood as parallel offset lists, ready for
/// `Grid::set_kernel`.
pub fn moore8() -> (Vec<i32>, Vec<i32>) {
    let mut dxs = Vec::with_capacity(8);
    let mut dys = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            dxs.push(dx);
            dys.push(dy);
        }
    }
    (dxs, dys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moore8_shape() {
        let (dxs, dys) = moore8();
        assert_eq!(dxs.len(), 8);
        assert_eq!(dys.len(), 8);
        assert!(!dxs.iter().zip(&dys).any(|(&dx, &dy)| dx == 0 && dy == 0));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut mask = KernelMask::new();
        assert!(!mask.get(3, 4));
        mask.set(3, 4, true);
        assert!(mask.get(3, 4));
        mask.set(3, 4, false);
        assert!(!mask.get(3, 4));
    }

    #[test]
    fn test_out_of_range_reads_false_writes_noop() {
        let mut mask = KernelMask::new();
        let before = mask.revision();
        mask.set(15, 0, true);
        mask.set(0, 99, true);
        assert_eq!(mask.revision(), before, "OOB writes must not notify");
        assert!(!mask.get(15, 0));
        assert!(!mask.get(0, 99));
        assert_eq!(mask.active_count(), 0);
    }

    #[test]
    fn test_revision_bumps_on_every_in_range_mutation() {
        let mut mask = KernelMask::new();
        let r0 = mask.revision();
        mask.set(0, 0, true);
        mask.set(0, 0, true); // redundant write still notifies
        mask.clear();
        assert_eq!(mask.revision(), r0 + 3);

        mask.set_active(true); // unchanged, no notification
        assert_eq!(mask.revision(), r0 + 3);
        mask.set_active(false);
        assert_eq!(mask.revision(), r0 + 4);
    }

    #[test]
    fn test_center_is_excluded_from_count_and_offsets() {
        let mut mask = KernelMask::new();
        mask.set(MASK_CENTER, MASK_CENTER, true);
        assert!(mask.get(MASK_CENTER, MASK_CENTER));
        assert_eq!(mask.active_count(), 0);
        assert!(mask.offsets().is_empty());
    }

    #[test]
    fn test_offsets_are_relative_to_center() {
        let mut mask = KernelMask::new();
        mask.set(0, 0, true);
        mask.set(14, 14, true);
        mask.set(8, 7, true);
        assert_eq!(mask.offsets(), &[(-7, -7), (1, 0), (7, 7)]);
    }

    #[test]
    fn test_inactive_mask_emits_nothing_and_toggle_roundtrips() {
        let mut mask = KernelMask::new();
        for (x, y) in [(0, 0), (6, 7), (9, 2), (14, 14), (7, 8)] {
            mask.set(x, y, true);
        }
        assert_eq!(mask.offsets().len(), 5);

        mask.set_active(false);
        assert!(mask.offsets().is_empty());
        assert_eq!(mask.active_count(), 5, "count ignores the active gate");

        mask.set_active(true);
        assert_eq!(mask.offsets().len(), 5);
    }

    #[test]
    fn test_offsets_order_is_deterministic() {
        let build = || {
            let mut mask = KernelMask::new();
            for (x, y) in [(12, 3), (1, 1), (7, 6), (3, 12)] {
                mask.set(x, y, true);
            }
            mask.offsets().to_vec()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut mask = KernelMask::new();
        mask.set(2, 2, true);
        mask.set(10, 10, true);
        mask.clear();
        assert_eq!(mask.active_count(), 0);
        assert!(mask.offsets().is_empty());
    }

    #[test]
    fn test_three_by_three_paint_equals_moore8() {
        let mut mask = KernelMask::new();
        for y in 6..=8 {
            for x in 6..=8 {
                mask.set(x, y, true);
            }
        }
        // A 3x3 paint around the center is exactly Moore-8.
        assert_eq!(mask.active_count(), 8);
        let offsets = mask.offsets().to_vec();
        let (dxs, dys) = moore8();
        let moore: Vec<(i32, i32)> = dxs.into_iter().zip(dys).collect();
        assert_eq!(offsets, moore);
    }
}
