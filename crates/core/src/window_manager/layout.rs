//! Tiling layouts.
//!
//! A layout maps `(window count, area, master ratio, gap)` to one target
//! rectangle per window. The set of layouts is fixed, so they are expressed
//! as a tagged enum with a small match rather than a trait object.
//!
//! Available layouts:
//! - `Tall`: master column on the left, stack rows on the right (dwm style)
//! - `Wide`: master row on top, stack columns below
//! - `Monocle`: every window gets the whole padded area, stacked in Z-order
//! - `ThreeColumn`: master in the center column, stack alternating left/right
//!
//! Gap rule: a window side that touches the area boundary is inset by the
//! full gap; a side shared with a neighbouring cell is inset by half the gap
//! on each cell, so adjacent windows end up exactly `gap` pixels apart.

use crate::window_manager::geometry::Rect;

/// Which arrangement algorithm a [`Layout`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Tall,
    Wide,
    Monocle,
    ThreeColumn,
}

/// Default master area ratio for new layouts.
pub const DEFAULT_MASTER_RATIO: f32 = 0.55;

/// Default gap between windows, in pixels.
pub const DEFAULT_GAP: i32 = 4;

const MASTER_RATIO_STEP: f32 = 0.05;
const GAP_STEP: i32 = 2;

/// A layout variant together with its adjustable state.
///
/// `master_ratio` is clamped to `[0.1, 0.9]` and `gap` to `>= 0` at every
/// mutation, so `arrange` never sees out-of-range parameters.
#[derive(Debug, Clone)]
pub struct Layout {
    kind: LayoutKind,
    master_ratio: f32,
    gap: i32,
}

impl Layout {
    pub fn new(kind: LayoutKind) -> Self {
        Layout {
            kind,
            master_ratio: DEFAULT_MASTER_RATIO,
            gap: DEFAULT_GAP,
        }
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            LayoutKind::Tall => "tall",
            LayoutKind::Wide => "wide",
            LayoutKind::Monocle => "monocle",
            LayoutKind::ThreeColumn => "three-column",
        }
    }

    pub fn master_ratio(&self) -> f32 {
        self.master_ratio
    }

    pub fn gap(&self) -> i32 {
        self.gap
    }

    pub fn set_master_ratio(&mut self, ratio: f32) {
        self.master_ratio = ratio.clamp(0.1, 0.9);
    }

    pub fn set_gap(&mut self, gap: i32) {
        self.gap = gap.max(0);
    }

    pub fn grow_master(&mut self) {
        self.set_master_ratio(self.master_ratio + MASTER_RATIO_STEP);
    }

    pub fn shrink_master(&mut self) {
        self.set_master_ratio(self.master_ratio - MASTER_RATIO_STEP);
    }

    pub fn increase_gap(&mut self) {
        self.set_gap(self.gap + GAP_STEP);
    }

    pub fn decrease_gap(&mut self) {
        self.set_gap(self.gap - GAP_STEP);
    }

    /// Compute one target rectangle per window.
    ///
    /// Returns exactly `count` rectangles for any `count >= 0`; an empty
    /// vector for zero windows and the padded area for a single window.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Layout, LayoutKind, Rect};
    ///
    /// let layout = Layout::new(LayoutKind::Tall);
    /// let rects = layout.arrange(3, Rect::new(0, 0, 1920, 1080));
    /// assert_eq!(rects.len(), 3);
    /// ```
    pub fn arrange(&self, count: usize, area: Rect) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }

        let cells = match self.kind {
            LayoutKind::Tall => tall_cells(count, area, self.master_ratio),
            LayoutKind::Wide => wide_cells(count, area, self.master_ratio),
            LayoutKind::Monocle => vec![area; count],
            LayoutKind::ThreeColumn => three_column_cells(count, area, self.master_ratio),
        };

        cells
            .into_iter()
            .map(|cell| inset_cell(cell, area, self.gap))
            .collect()
    }
}

/// The four default layouts every new workspace cycles through.
pub fn default_layouts() -> Vec<Layout> {
    vec![
        Layout::new(LayoutKind::Tall),
        Layout::new(LayoutKind::Wide),
        Layout::new(LayoutKind::Monocle),
        Layout::new(LayoutKind::ThreeColumn),
    ]
}

/// Apply the gap to one cell of an exact partition of `area`.
///
/// Sides on the area boundary get the full gap, interior sides half of it;
/// two adjacent cells therefore end up `gap` pixels apart.
fn inset_cell(cell: Rect, area: Rect, gap: i32) -> Rect {
    let half = gap / 2;
    let left = if cell.left() == area.left() { gap } else { half };
    let top = if cell.top() == area.top() { gap } else { half };
    let right = if cell.right() == area.right() { gap } else { half };
    let bottom = if cell.bottom() == area.bottom() { gap } else { half };

    Rect::new(
        cell.x + left,
        cell.y + top,
        (cell.w - left - right).max(0),
        (cell.h - top - bottom).max(0),
    )
}

fn tall_cells(count: usize, area: Rect, ratio: f32) -> Vec<Rect> {
    if count == 1 {
        return vec![area];
    }

    let (master, stack) = area.split_horizontal(ratio);
    let mut cells = Vec::with_capacity(count);
    cells.push(master);
    cells.extend(stack.slice_rows(count - 1));
    cells
}

fn wide_cells(count: usize, area: Rect, ratio: f32) -> Vec<Rect> {
    if count == 1 {
        return vec![area];
    }

    let (master, stack) = area.split_vertical(ratio);
    let mut cells = Vec::with_capacity(count);
    cells.push(master);
    cells.extend(stack.slice_columns(count - 1));
    cells
}

/// Three columns: side, center (master), side. Windows after the master are
/// distributed alternately to the left column, then the right, top to bottom
/// within each column.
fn three_column_cells(count: usize, area: Rect, ratio: f32) -> Vec<Rect> {
    if count <= 2 {
        return tall_cells(count, area, ratio);
    }

    let side_w = ((1.0 - ratio) * area.w as f32 / 2.0) as i32;
    let center_w = area.w - 2 * side_w;

    let left_col = Rect::new(area.x, area.y, side_w, area.h);
    let center_col = Rect::new(area.x + side_w, area.y, center_w, area.h);
    let right_col = Rect::new(area.x + side_w + center_w, area.y, side_w, area.h);

    // Odd stack indices go left, even go right; count >= 3 guarantees each
    // side receives at least one window.
    let left_indices: Vec<usize> = (1..count).filter(|i| i % 2 == 1).collect();
    let right_indices: Vec<usize> = (1..count).filter(|i| i % 2 == 0).collect();

    let left_rows = left_col.slice_rows(left_indices.len());
    let right_rows = right_col.slice_rows(right_indices.len());

    let mut cells = vec![Rect::default(); count];
    cells[0] = center_col;
    for (idx, row) in left_indices.iter().zip(left_rows) {
        cells[*idx] = row;
    }
    for (idx, row) in right_indices.iter().zip(right_rows) {
        cells[*idx] = row;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        w: 1920,
        h: 1080,
    };

    fn all_kinds() -> [LayoutKind; 4] {
        [
            LayoutKind::Tall,
            LayoutKind::Wide,
            LayoutKind::Monocle,
            LayoutKind::ThreeColumn,
        ]
    }

    fn gapless(kind: LayoutKind) -> Layout {
        let mut layout = Layout::new(kind);
        layout.set_gap(0);
        layout
    }

    #[test]
    fn test_arrange_totality() {
        // Every layout returns exactly n rects with non-negative dimensions.
        for kind in all_kinds() {
            let layout = Layout::new(kind);
            for n in 0..=8 {
                let rects = layout.arrange(n, AREA);
                assert_eq!(rects.len(), n, "{:?} with {} windows", kind, n);
                for rect in &rects {
                    assert!(rect.w >= 0 && rect.h >= 0, "{:?}: {:?}", kind, rect);
                }
            }
        }
    }

    #[test]
    fn test_single_window_gets_padded_area() {
        for kind in all_kinds() {
            let layout = Layout::new(kind);
            let rects = layout.arrange(1, AREA);
            assert_eq!(rects, vec![AREA.pad(DEFAULT_GAP)], "{:?}", kind);
        }
    }

    #[test]
    fn test_monocle_identity() {
        let layout = Layout::new(LayoutKind::Monocle);
        for n in 1..=5 {
            let rects = layout.arrange(n, AREA);
            assert!(rects.iter().all(|r| *r == AREA.pad(DEFAULT_GAP)));
        }
    }

    fn assert_partition(rects: &[Rect], area: Rect) {
        // Pairwise non-overlapping.
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let overlap = a.x < b.right()
                    && a.right() > b.x
                    && a.y < b.bottom()
                    && a.bottom() > b.y;
                assert!(!overlap, "{:?} overlaps {:?}", a, b);
            }
        }
        // Union covers the area exactly: total cell area matches and every
        // cell stays within bounds.
        let total: i64 = rects.iter().map(|r| r.area()).sum();
        assert_eq!(total, area.area());
        for rect in rects {
            assert!(rect.x >= area.x && rect.y >= area.y);
            assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        }
    }

    #[test]
    fn test_gapless_layouts_partition_the_area() {
        for kind in [LayoutKind::Tall, LayoutKind::Wide, LayoutKind::ThreeColumn] {
            let layout = gapless(kind);
            for n in 1..=7 {
                let rects = layout.arrange(n, AREA);
                assert_partition(&rects, AREA);
            }
        }
    }

    #[test]
    fn test_tall_master_and_stack_positions() {
        let layout = gapless(LayoutKind::Tall);
        let rects = layout.arrange(3, AREA);

        // Master occupies the full left column at the default ratio.
        let master_w = (1920.0 * DEFAULT_MASTER_RATIO) as i32;
        assert_eq!(rects[0], Rect::new(0, 0, master_w, 1080));
        // Stack rows split the right column top to bottom.
        assert_eq!(rects[1], Rect::new(master_w, 0, 1920 - master_w, 540));
        assert_eq!(rects[2], Rect::new(master_w, 540, 1920 - master_w, 540));
    }

    #[test]
    fn test_tall_gap_insets() {
        let mut layout = Layout::new(LayoutKind::Tall);
        layout.set_gap(8);
        let rects = layout.arrange(2, AREA);

        let master_w = (1920.0 * DEFAULT_MASTER_RATIO) as i32;
        // Master: full gap on the outer three sides, half on the inner side.
        assert_eq!(rects[0], Rect::new(8, 8, master_w - 8 - 4, 1080 - 16));
        // Single stack window: half gap toward the master, full gap elsewhere.
        assert_eq!(
            rects[1],
            Rect::new(master_w + 4, 8, 1920 - master_w - 4 - 8, 1080 - 16)
        );
        // The two windows sit exactly `gap` pixels apart.
        assert_eq!(rects[1].left() - rects[0].right(), 8);
    }

    #[test]
    fn test_wide_is_transpose_of_tall() {
        let layout = gapless(LayoutKind::Wide);
        let rects = layout.arrange(3, AREA);

        let master_h = (1080.0 * DEFAULT_MASTER_RATIO) as i32;
        assert_eq!(rects[0], Rect::new(0, 0, 1920, master_h));
        assert_eq!(rects[1], Rect::new(0, master_h, 960, 1080 - master_h));
        assert_eq!(rects[2], Rect::new(960, master_h, 960, 1080 - master_h));
    }

    #[test]
    fn test_three_column_two_windows_behaves_as_tall() {
        let three = gapless(LayoutKind::ThreeColumn);
        let tall = gapless(LayoutKind::Tall);
        assert_eq!(three.arrange(2, AREA), tall.arrange(2, AREA));
    }

    #[test]
    fn test_three_column_distribution() {
        let layout = gapless(LayoutKind::ThreeColumn);
        let rects = layout.arrange(5, AREA);

        let side_w = ((1.0 - DEFAULT_MASTER_RATIO) * 1920.0 / 2.0) as i32;
        let center_w = 1920 - 2 * side_w;

        // Master holds the center column.
        assert_eq!(rects[0], Rect::new(side_w, 0, center_w, 1080));
        // Indices 1 and 3 stack in the left column, 2 and 4 in the right.
        assert_eq!(rects[1].x, 0);
        assert_eq!(rects[3].x, 0);
        assert_eq!(rects[1].bottom(), rects[3].top());
        assert_eq!(rects[2].x, side_w + center_w);
        assert_eq!(rects[4].x, side_w + center_w);
        assert_eq!(rects[2].bottom(), rects[4].top());
    }

    #[test]
    fn test_master_ratio_clamping() {
        let mut layout = Layout::new(LayoutKind::Tall);
        for _ in 0..20 {
            layout.grow_master();
        }
        assert!((layout.master_ratio() - 0.9).abs() < 1e-6);
        for _ in 0..40 {
            layout.shrink_master();
        }
        assert!((layout.master_ratio() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_gap_never_negative() {
        let mut layout = Layout::new(LayoutKind::Tall);
        for _ in 0..10 {
            layout.decrease_gap();
        }
        assert_eq!(layout.gap(), 0);
        layout.increase_gap();
        assert_eq!(layout.gap(), GAP_STEP);
    }

    #[test]
    fn test_arrange_survives_tiny_area() {
        // A pathological area must still yield n rects with w/h >= 0.
        let tiny = Rect::new(0, 0, 3, 3);
        for kind in all_kinds() {
            let layout = Layout::new(kind);
            let rects = layout.arrange(4, tiny);
            assert_eq!(rects.len(), 4);
            assert!(rects.iter().all(|r| r.w >= 0 && r.h >= 0));
        }
    }
}
