//! A single workspace: its windows, its layouts, and how it shows or hides
//! them.
//!
//! A workspace holds an ordered list of tiled window ids (the first entry is
//! the master) plus an unordered set of floating ones. It knows nothing
//! about monitors: callers pass the work and full rectangles in when asking
//! for a retile. Window state itself lives in the [`WindowStore`]; the
//! workspace only stores ids and the saved positions of windows it has
//! parked off-screen.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::window_manager::layout::{default_layouts, Layout};
use crate::window_manager::store::WindowStore;
use crate::window_manager::window::WindowId;
use crate::window_manager::Rect;

/// A virtual workspace.
#[derive(Debug)]
pub struct Workspace {
    id: usize,
    name: String,
    layouts: Vec<Layout>,
    layout_idx: usize,
    tiled: Vec<WindowId>,
    floating: Vec<WindowId>,
    active: bool,
    /// Original positions of windows currently parked off-screen by this
    /// workspace. An entry exists iff the window is hidden right now.
    saved_positions: HashMap<WindowId, Rect>,
}

impl Workspace {
    /// Create an empty, inactive workspace with the default layout set.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::workspace::Workspace;
    ///
    /// let ws = Workspace::new(3);
    /// assert_eq!(ws.id(), 3);
    /// assert_eq!(ws.name(), "Workspace 3");
    /// assert_eq!(ws.window_count(), 0);
    /// assert!(!ws.is_active());
    /// ```
    pub fn new(id: usize) -> Self {
        Workspace {
            id,
            name: format!("Workspace {id}"),
            layouts: default_layouts(),
            layout_idx: 0,
            tiled: Vec::new(),
            floating: Vec::new(),
            active: false,
            saved_positions: HashMap::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn tiled(&self) -> &[WindowId] {
        &self.tiled
    }

    pub fn floating(&self) -> &[WindowId] {
        &self.floating
    }

    pub fn all_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.tiled.iter().chain(self.floating.iter()).copied()
    }

    pub fn tiled_count(&self) -> usize {
        self.tiled.len()
    }

    pub fn window_count(&self) -> usize {
        self.tiled.len() + self.floating.len()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.tiled.contains(&id) || self.floating.contains(&id)
    }

    pub fn saved_position(&self, id: WindowId) -> Option<Rect> {
        self.saved_positions.get(&id).copied()
    }

    pub(crate) fn take_saved_position(&mut self, id: WindowId) -> Option<Rect> {
        self.saved_positions.remove(&id)
    }

    pub(crate) fn record_saved_position(&mut self, id: WindowId, rect: Rect) {
        self.saved_positions.insert(id, rect);
    }

    // ------------------------------------------------------------------
    // Layout carousel
    // ------------------------------------------------------------------

    /// Seed every layout with the configured ratio and gap.
    pub fn set_layout_defaults(&mut self, master_ratio: f32, gap: i32) {
        for layout in &mut self.layouts {
            layout.set_master_ratio(master_ratio);
            layout.set_gap(gap);
        }
    }

    pub fn current_layout(&self) -> &Layout {
        &self.layouts[self.layout_idx]
    }

    pub fn current_layout_mut(&mut self) -> &mut Layout {
        &mut self.layouts[self.layout_idx]
    }

    pub fn layout_index(&self) -> usize {
        self.layout_idx
    }

    /// Advance to the next layout, wrapping around the carousel.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// assert_eq!(ws.current_layout().name(), "tall");
    /// ws.next_layout();
    /// assert_eq!(ws.current_layout().name(), "wide");
    /// ws.prev_layout();
    /// assert_eq!(ws.current_layout().name(), "tall");
    /// ```
    pub fn next_layout(&mut self) {
        self.layout_idx = (self.layout_idx + 1) % self.layouts.len();
        debug!("ws {} layout -> {}", self.id, self.current_layout().name());
    }

    pub fn prev_layout(&mut self) {
        self.layout_idx = (self.layout_idx + self.layouts.len() - 1) % self.layouts.len();
        debug!("ws {} layout -> {}", self.id, self.current_layout().name());
    }

    pub fn grow_master(&mut self) {
        self.current_layout_mut().grow_master();
    }

    pub fn shrink_master(&mut self) {
        self.current_layout_mut().shrink_master();
    }

    pub fn increase_gap(&mut self) {
        self.current_layout_mut().increase_gap();
    }

    pub fn decrease_gap(&mut self) {
        self.current_layout_mut().decrease_gap();
    }

    // ------------------------------------------------------------------
    // Membership and stack order
    // ------------------------------------------------------------------

    /// Add a window; refuses if it is already here in either list.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// assert!(ws.add_window(WindowId(1), false));
    /// assert!(!ws.add_window(WindowId(1), true)); // already tiled
    /// assert_eq!(ws.tiled(), &[WindowId(1)]);
    /// ```
    pub fn add_window(&mut self, id: WindowId, floating: bool) -> bool {
        if self.contains(id) {
            return false;
        }
        if floating {
            self.floating.push(id);
            debug!("ws {} +float {}", self.id, id);
        } else {
            self.tiled.push(id);
            debug!("ws {} +tile {}", self.id, id);
        }
        true
    }

    /// Remove a window from whichever list holds it.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// ws.add_window(WindowId(1), true);
    /// assert!(ws.remove_window(WindowId(1)));
    /// assert!(!ws.remove_window(WindowId(1)));
    /// assert!(!ws.contains(WindowId(1)));
    /// ```
    pub fn remove_window(&mut self, id: WindowId) -> bool {
        self.saved_positions.remove(&id);
        if let Some(pos) = self.tiled.iter().position(|w| *w == id) {
            self.tiled.remove(pos);
            debug!("ws {} -tile {}", self.id, id);
            return true;
        }
        if let Some(pos) = self.floating.iter().position(|w| *w == id) {
            self.floating.remove(pos);
            debug!("ws {} -float {}", self.id, id);
            return true;
        }
        false
    }

    /// Swap the master with the second tiled window.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// ws.add_window(WindowId(1), false);
    /// ws.add_window(WindowId(2), false);
    /// ws.swap_master();
    /// assert_eq!(ws.tiled(), &[WindowId(2), WindowId(1)]);
    /// ```
    pub fn swap_master(&mut self) {
        if self.tiled.len() >= 2 {
            self.tiled.swap(0, 1);
        }
    }

    /// Promote a specific window to master.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// for i in 1..=3 {
    ///     ws.add_window(WindowId(i), false);
    /// }
    /// ws.swap_with_master(WindowId(3));
    /// assert_eq!(ws.tiled()[0], WindowId(3));
    /// ```
    pub fn swap_with_master(&mut self, id: WindowId) {
        if let Some(pos) = self.tiled.iter().position(|w| *w == id) {
            if pos != 0 {
                self.tiled.swap(0, pos);
            }
        }
    }

    /// Cyclic shift forward: the last window becomes master.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    /// use tatami_core::workspace::Workspace;
    ///
    /// let mut ws = Workspace::new(1);
    /// for i in 1..=3 {
    ///     ws.add_window(WindowId(i), false);
    /// }
    /// ws.rotate_next();
    /// assert_eq!(ws.tiled(), &[WindowId(3), WindowId(1), WindowId(2)]);
    /// ws.rotate_prev();
    /// assert_eq!(ws.tiled(), &[WindowId(1), WindowId(2), WindowId(3)]);
    /// ```
    pub fn rotate_next(&mut self) {
        if self.tiled.len() >= 2 {
            if let Some(last) = self.tiled.pop() {
                self.tiled.insert(0, last);
            }
        }
    }

    /// Cyclic shift backward: the master goes to the end of the stack.
    pub fn rotate_prev(&mut self) {
        if self.tiled.len() >= 2 {
            let first = self.tiled.remove(0);
            self.tiled.push(first);
        }
    }

    /// Swap two tiled windows by list index. Used by the directional move
    /// commands, which compute the indices from window centroids.
    pub fn swap_indices(&mut self, a: usize, b: usize) {
        if a < self.tiled.len() && b < self.tiled.len() {
            self.tiled.swap(a, b);
        }
    }

    // ------------------------------------------------------------------
    // Geometry application
    // ------------------------------------------------------------------

    /// Recompute the layout and move every tiled window into place.
    ///
    /// WM-fullscreen windows are not tiled: they are re-applied over the
    /// monitor's full rectangle. The rest get the layout's target slots in
    /// stack order. Floating windows are never touched. A handle that
    /// disappeared since the last event is skipped with a warning; the
    /// destroy event that follows will unmanage it.
    pub fn retile(&mut self, work_rect: Rect, full_rect: Rect, store: &mut WindowStore) {
        let mut fullscreen = Vec::new();
        let mut tileable = Vec::new();
        for id in &self.tiled {
            match store.get(*id) {
                Some(win) if win.is_fullscreen() => fullscreen.push(*id),
                Some(_) => tileable.push(*id),
                None => warn!("ws {}: {} is not tracked, skipping", self.id, id),
            }
        }

        for id in fullscreen {
            if let Some(win) = store.get_mut(id) {
                if !win.reapply_fullscreen(full_rect) {
                    debug!("ws {}: reapply fullscreen failed for {}", self.id, id);
                }
            }
        }

        let rects = self.current_layout().arrange(tileable.len(), work_rect);
        for (id, rect) in tileable.iter().zip(rects) {
            let Some(win) = store.get(*id) else {
                continue;
            };
            if !win.is_valid() {
                warn!("ws {}: window {} vanished, skipping", self.id, id);
                continue;
            }
            if !win.move_resize(rect.x, rect.y, rect.w, rect.h) {
                debug!("ws {}: move_resize failed for {}", self.id, id);
            }
        }

        debug!(
            "ws {} retile: {} | {} tiled | area {}",
            self.id,
            self.current_layout().name(),
            self.tiled.len(),
            work_rect,
        );
    }

    /// Hide every window by parking it off-screen at the bottom of the
    /// Z-order, remembering where it was. Fullscreen windows are suspended
    /// instead so their stripped styles survive the round-trip. Neither
    /// path emits the hide events a real `SW_HIDE` would.
    pub fn hide_all_windows(&mut self, store: &mut WindowStore) {
        let ids: Vec<WindowId> = self.all_windows().collect();
        for id in ids {
            let Some(win) = store.get_mut(id) else {
                continue;
            };
            if !win.is_valid() {
                continue;
            }
            if win.is_fullscreen() {
                win.suspend_fullscreen();
            } else {
                if let Some(rect) = win.rect() {
                    self.saved_positions.insert(id, rect);
                }
                win.park_offscreen();
            }
        }
        debug!("ws {}: hid {} windows", self.id, self.window_count());
    }

    /// Bring every window back on screen without activating any of them.
    /// Windows with a saved position return exactly there; fullscreen
    /// windows get an ordinary restore and are re-covered by the retile
    /// that follows a switch.
    pub fn show_all_windows(&mut self, store: &mut WindowStore) {
        let ids: Vec<WindowId> = self.all_windows().collect();
        for id in ids {
            let Some(win) = store.get_mut(id) else {
                continue;
            };
            if !win.is_valid() {
                continue;
            }
            if win.is_fullscreen() {
                win.restore();
            } else if let Some(saved) = self.saved_positions.remove(&id) {
                win.restore_position(saved);
            } else {
                if win.is_minimized() {
                    win.restore();
                }
                win.raise_no_activate();
            }
        }
        debug!("ws {}: showed {} windows", self.id, self.window_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_manager::layout::LayoutKind;

    fn ids(ws: &Workspace) -> Vec<isize> {
        ws.tiled().iter().map(|w| w.raw()).collect()
    }

    #[test]
    fn test_add_refuses_duplicates() {
        let mut ws = Workspace::new(1);
        assert!(ws.add_window(WindowId(1), false));
        assert!(!ws.add_window(WindowId(1), false));
        assert!(!ws.add_window(WindowId(1), true));
        assert_eq!(ws.window_count(), 1);
    }

    #[test]
    fn test_tiled_and_floating_are_disjoint() {
        let mut ws = Workspace::new(1);
        ws.add_window(WindowId(1), false);
        ws.add_window(WindowId(2), true);

        assert_eq!(ws.tiled(), &[WindowId(1)]);
        assert_eq!(ws.floating(), &[WindowId(2)]);

        assert!(ws.remove_window(WindowId(2)));
        assert!(ws.floating().is_empty());
        assert!(!ws.remove_window(WindowId(2)));
    }

    #[test]
    fn test_swap_master() {
        let mut ws = Workspace::new(1);
        for i in 1..=3 {
            ws.add_window(WindowId(i), false);
        }
        ws.swap_master();
        assert_eq!(ids(&ws), vec![2, 1, 3]);

        // A single window has nothing to swap with.
        let mut single = Workspace::new(2);
        single.add_window(WindowId(9), false);
        single.swap_master();
        assert_eq!(single.tiled(), &[WindowId(9)]);
    }

    #[test]
    fn test_swap_with_master() {
        let mut ws = Workspace::new(1);
        for i in 1..=4 {
            ws.add_window(WindowId(i), false);
        }
        ws.swap_with_master(WindowId(3));
        assert_eq!(ids(&ws), vec![3, 2, 1, 4]);

        // Promoting the master or an absent window changes nothing.
        ws.swap_with_master(WindowId(3));
        ws.swap_with_master(WindowId(99));
        assert_eq!(ids(&ws), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_rotate_round_trip() {
        let mut ws = Workspace::new(1);
        for i in 1..=3 {
            ws.add_window(WindowId(i), false);
        }
        ws.rotate_next();
        assert_eq!(ids(&ws), vec![3, 1, 2]);
        ws.rotate_prev();
        assert_eq!(ids(&ws), vec![1, 2, 3]);
    }

    #[test]
    fn test_layout_carousel_wraps() {
        let mut ws = Workspace::new(1);
        let count = 4;
        assert_eq!(ws.layout_index(), 0);

        for _ in 0..count {
            ws.next_layout();
        }
        assert_eq!(ws.layout_index(), 0);

        ws.prev_layout();
        assert_eq!(ws.layout_index(), count - 1);
    }

    #[test]
    fn test_layout_state_is_per_workspace() {
        let mut a = Workspace::new(1);
        let b = Workspace::new(2);

        a.grow_master();
        assert!(a.current_layout().master_ratio() > b.current_layout().master_ratio());
        assert_eq!(a.current_layout().kind(), LayoutKind::Tall);
    }

    #[test]
    fn test_remove_window_drops_saved_position() {
        let mut ws = Workspace::new(1);
        ws.add_window(WindowId(5), false);
        ws.record_saved_position(WindowId(5), Rect::new(10, 10, 100, 100));

        ws.remove_window(WindowId(5));
        assert_eq!(ws.saved_position(WindowId(5)), None);
    }

    #[test]
    fn test_retile_skips_untracked_windows() {
        // A workspace holding ids the store no longer knows about must not
        // panic or mutate anything.
        let mut ws = Workspace::new(1);
        let mut store = WindowStore::new();
        ws.add_window(WindowId(1), false);
        ws.retile(Rect::new(0, 0, 800, 600), Rect::new(0, 0, 800, 600), &mut store);
        assert_eq!(ws.tiled_count(), 1);
    }
}
