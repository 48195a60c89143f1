//! The managed-window set and the event suppression gates.
//!
//! [`WindowStore`] is the single source of truth for which handles the WM
//! tracks. Workspaces hold copyable [`WindowId`]s; the mutable per-window
//! state (the fullscreen record) lives on the store entry, never duplicated.
//!
//! The store also carries the two suppression gates. Hiding and showing
//! windows to switch workspaces fires the very hide/show/foreground events
//! the manager listens for; without the gates those events would unmanage
//! the windows being switched. The global flag covers the synchronous span
//! of a switch, and the one-shot set absorbs events the OS delivers
//! asynchronously after the flag is already cleared.

use std::collections::{HashMap, HashSet};

use crate::window_manager::window::{Window, WindowId};

/// Managed handles plus suppression state.
#[derive(Debug, Default)]
pub struct WindowStore {
    windows: HashMap<WindowId, Window>,
    suppress_all: bool,
    suppressed: HashSet<WindowId>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    /// Insert a window, replacing any previous entry for the same handle.
    pub fn track(&mut self, window: Window) {
        self.windows.insert(window.id(), window);
    }

    /// Insert a fresh entry for `id` unless one already exists, then return
    /// it mutably. Used when re-adopting handles that were pruned by late
    /// events while their workspace was hidden.
    pub fn track_id(&mut self, id: WindowId) -> &mut Window {
        self.windows.entry(id).or_insert_with(|| Window::new(id))
    }

    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        self.suppressed.remove(&id);
        self.windows.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Engage the global gate: hide/show/minimize/restore/foreground events
    /// become no-ops until [`resume_events`](Self::resume_events).
    pub fn suppress_events(&mut self) {
        self.suppress_all = true;
    }

    pub fn resume_events(&mut self) {
        self.suppress_all = false;
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppress_all
    }

    /// Arm one-shot suppression for each handle: the next matching event on
    /// that handle is absorbed even after the global gate is released.
    pub fn add_suppressed<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = WindowId>,
    {
        self.suppressed.extend(ids);
    }

    /// Decide whether an incoming event on `id` must be absorbed.
    ///
    /// Under the global gate everything is absorbed and the one-shot entries
    /// are left armed; they exist precisely for the stragglers that arrive
    /// after the gate drops. Outside the gate, an armed entry absorbs
    /// exactly one event.
    pub fn should_suppress(&mut self, id: WindowId) -> bool {
        if self.suppress_all {
            return true;
        }
        self.suppressed.remove(&id)
    }

    /// Whether one-shot suppression is currently armed for `id`.
    pub fn is_suppression_armed(&self, id: WindowId) -> bool {
        self.suppressed.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_remove() {
        let mut store = WindowStore::new();
        let id = WindowId(1);
        assert!(!store.contains(id));

        store.track(Window::new(id));
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_track_id_preserves_existing_entry() {
        let mut store = WindowStore::new();
        let id = WindowId(7);

        store.track_id(id).mark_as_fullscreen();
        assert!(store.get(id).unwrap().is_fullscreen());

        // A second adoption must not reset the fullscreen record.
        store.track_id(id);
        assert!(store.get(id).unwrap().is_fullscreen());
    }

    #[test]
    fn test_global_gate_absorbs_everything() {
        let mut store = WindowStore::new();
        let id = WindowId(2);

        store.suppress_events();
        for _ in 0..5 {
            assert!(store.should_suppress(id));
        }
        store.resume_events();
        assert!(!store.should_suppress(id));
    }

    #[test]
    fn test_one_shot_survives_the_global_gate() {
        let mut store = WindowStore::new();
        let id = WindowId(3);

        store.suppress_events();
        store.add_suppressed([id]);
        // Events under the gate do not consume the one-shot entry.
        assert!(store.should_suppress(id));
        assert!(store.should_suppress(id));
        store.resume_events();

        // The straggler after the gate is absorbed exactly once.
        assert!(store.should_suppress(id));
        assert!(!store.should_suppress(id));
    }

    #[test]
    fn test_remove_disarms_one_shot() {
        let mut store = WindowStore::new();
        let id = WindowId(4);
        store.track(Window::new(id));
        store.add_suppressed([id]);

        store.remove(id);
        assert!(!store.is_suppression_armed(id));
    }
}
