//! Screen geometry primitives.
//!
//! `Rect` describes both a monitor's usable area and the target position of
//! each tiled window. Layouts are pure functions over rectangles, so every
//! operation here returns a new value and never touches the OS.

/// A rectangle defined by its top-left corner and dimensions, in pixels.
///
/// The origin (0, 0) is the top-left corner of the primary monitor. Width and
/// height are kept non-negative by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: i32,
    /// Y coordinate of the top-left corner
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::Rect;
    ///
    /// let rect = Rect::new(0, 0, 1920, 1080);
    /// assert_eq!(rect.w, 1920);
    /// assert_eq!(rect.h, 1080);
    /// ```
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Whether a point lies inside the rectangle (right/bottom exclusive).
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Split into a left and a right part.
    ///
    /// The left part receives `⌊w · ratio⌋` pixels, the right part the rest,
    /// so the two halves always abut and sum to the original width.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::Rect;
    ///
    /// let (left, right) = Rect::new(0, 0, 100, 50).split_horizontal(0.3);
    /// assert_eq!(left, Rect::new(0, 0, 30, 50));
    /// assert_eq!(right, Rect::new(30, 0, 70, 50));
    /// ```
    pub fn split_horizontal(&self, ratio: f32) -> (Rect, Rect) {
        let left_w = (self.w as f32 * ratio) as i32;
        let left = Rect::new(self.x, self.y, left_w, self.h);
        let right = Rect::new(self.x + left_w, self.y, self.w - left_w, self.h);
        (left, right)
    }

    /// Split into a top and a bottom part; the vertical counterpart of
    /// [`split_horizontal`](Self::split_horizontal).
    pub fn split_vertical(&self, ratio: f32) -> (Rect, Rect) {
        let top_h = (self.h as f32 * ratio) as i32;
        let top = Rect::new(self.x, self.y, self.w, top_h);
        let bottom = Rect::new(self.x, self.y + top_h, self.w, self.h - top_h);
        (top, bottom)
    }

    /// Divide into `count` rows of equal height, top to bottom.
    ///
    /// The last row absorbs the remainder pixels of the integer division, so
    /// the rows partition the source exactly.
    pub fn slice_rows(&self, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 {
            return vec![*self];
        }

        let base_h = self.h / count as i32;
        let mut rects = Vec::with_capacity(count);
        let mut y = self.y;

        for i in 0..count {
            let h = if i < count - 1 {
                base_h
            } else {
                self.h - (y - self.y)
            };
            rects.push(Rect::new(self.x, y, self.w, h));
            y += h;
        }

        rects
    }

    /// Divide into `count` columns of equal width, left to right.
    ///
    /// The last column absorbs the remainder pixels.
    pub fn slice_columns(&self, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 {
            return vec![*self];
        }

        let base_w = self.w / count as i32;
        let mut rects = Vec::with_capacity(count);
        let mut x = self.x;

        for i in 0..count {
            let w = if i < count - 1 {
                base_w
            } else {
                self.w - (x - self.x)
            };
            rects.push(Rect::new(x, self.y, w, self.h));
            x += w;
        }

        rects
    }

    /// Shrink by `gap` pixels on every side, clamping width and height at 0.
    pub fn pad(&self, gap: i32) -> Rect {
        Rect::new(
            self.x + gap,
            self.y + gap,
            (self.w - 2 * gap).max(0),
            (self.h - 2 * gap).max(0),
        )
    }

    /// Convert to Win32 (left, top, right, bottom) form.
    pub fn to_ltrb(&self) -> (i32, i32, i32, i32) {
        (self.left(), self.top(), self.right(), self.bottom())
    }

    /// Build a rectangle from Win32 (left, top, right, bottom) coordinates.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::new(left, top, right - left, bottom - top)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_edges() {
        let rect = Rect::new(10, 20, 100, 200);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 220);
        assert_eq!(rect.center_x(), 60);
        assert_eq!(rect.center_y(), 120);
        assert_eq!(rect.area(), 20000);
    }

    #[test]
    fn test_split_horizontal_round_trip() {
        let rect = Rect::new(0, 0, 1920, 1080);
        for ratio in [0.1, 0.25, 0.55, 0.7, 0.9] {
            let (left, right) = rect.split_horizontal(ratio);
            assert_eq!(left.w + right.w, rect.w, "ratio {ratio}");
            assert_eq!(left.right(), right.left(), "halves must abut");
            assert_eq!(left.h, rect.h);
            assert_eq!(right.h, rect.h);
        }
    }

    #[test]
    fn test_split_vertical_round_trip() {
        let rect = Rect::new(5, 7, 1280, 1024);
        let (top, bottom) = rect.split_vertical(0.55);
        assert_eq!(top.h + bottom.h, rect.h);
        assert_eq!(top.bottom(), bottom.top());
        assert_eq!(top.w, rect.w);
    }

    #[test]
    fn test_slice_rows_absorbs_remainder() {
        // 100 does not divide by 3; the last row picks up the extra pixel.
        let rect = Rect::new(0, 0, 50, 100);
        let rows = rect.slice_rows(3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].h, 33);
        assert_eq!(rows[1].h, 33);
        assert_eq!(rows[2].h, 34);
        assert_eq!(rows.iter().map(|r| r.h).sum::<i32>(), rect.h);
        assert_eq!(rows[2].bottom(), rect.bottom());
    }

    #[test]
    fn test_slice_rows_edge_counts() {
        let rect = Rect::new(0, 0, 50, 100);
        assert!(rect.slice_rows(0).is_empty());
        assert_eq!(rect.slice_rows(1), vec![rect]);
    }

    #[test]
    fn test_slice_columns_absorbs_remainder() {
        let rect = Rect::new(10, 0, 101, 40);
        let cols = rect.slice_columns(4);
        assert_eq!(cols.len(), 4);
        assert_eq!(cols.iter().map(|c| c.w).sum::<i32>(), rect.w);
        assert_eq!(cols[3].right(), rect.right());
        for pair in cols.windows(2) {
            assert_eq!(pair[0].right(), pair[1].left());
        }
    }

    #[test]
    fn test_pad() {
        let rect = Rect::new(0, 0, 100, 100);
        assert_eq!(rect.pad(10), Rect::new(10, 10, 80, 80));
    }

    #[test]
    fn test_pad_clamps_at_zero() {
        let rect = Rect::new(0, 0, 10, 10);
        let padded = rect.pad(20);
        assert_eq!(padded.w, 0);
        assert_eq!(padded.h, 0);
    }

    #[test]
    fn test_ltrb_round_trip() {
        let rect = Rect::new(-100, 50, 640, 480);
        let (l, t, r, b) = rect.to_ltrb();
        assert_eq!(Rect::from_ltrb(l, t, r, b), rect);
    }
}
