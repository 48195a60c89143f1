//! The workspace multiplexer.
//!
//! One workspace is visible per monitor; the manager owns the workspaces,
//! the monitor list, and the mapping between them. It is the only place
//! that orchestrates the hide/show choreography of a switch, including the
//! suppression gates that keep the WM's own window moves from feeding back
//! into the managed set.

use std::collections::{BTreeMap, HashMap};

use anyhow::ensure;
use tracing::{debug, info, warn};

use crate::window_manager::monitor::{detect_monitors, Monitor};
use crate::window_manager::store::WindowStore;
use crate::window_manager::window::{Window, WindowId};
use crate::workspace::Workspace;

/// Number of workspaces created at startup unless configured otherwise.
pub const DEFAULT_WORKSPACE_COUNT: usize = 9;

/// Invoked as `(monitor_index, old_ws_id, new_ws_id)` after the active
/// workspace of a monitor changed.
pub type WorkspaceChangedCallback = Box<dyn FnMut(usize, usize, usize)>;

/// Owns every workspace and the monitor -> active-workspace mapping.
pub struct WorkspaceManager {
    workspaces: BTreeMap<usize, Workspace>,
    monitors: Vec<Monitor>,
    monitor_ws: HashMap<usize, usize>,
    on_ws_changed: Vec<WorkspaceChangedCallback>,
}

impl WorkspaceManager {
    /// Create `workspace_count` workspaces (ids 1..=N) over the given
    /// monitors. Monitor `i` starts on workspace `(i mod N) + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Monitor, Rect};
    /// use tatami_core::workspace::WorkspaceManager;
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let manager = WorkspaceManager::new(9, vec![monitor]).unwrap();
    /// assert_eq!(manager.workspace_count(), 9);
    /// assert_eq!(manager.active_ws_id(0), 1);
    /// assert!(manager.get_workspace(1).unwrap().is_active());
    /// ```
    pub fn new(workspace_count: usize, monitors: Vec<Monitor>) -> anyhow::Result<Self> {
        ensure!(!monitors.is_empty(), "no monitors to manage");
        let count = workspace_count.max(1);

        let mut workspaces = BTreeMap::new();
        for id in 1..=count {
            workspaces.insert(id, Workspace::new(id));
        }

        let mut monitor_ws = HashMap::new();
        for i in 0..monitors.len() {
            let ws_id = (i % count) + 1;
            monitor_ws.insert(i, ws_id);
            if let Some(ws) = workspaces.get_mut(&ws_id) {
                ws.set_active(true);
            }
        }

        info!(
            "workspace manager: {} workspaces over {} monitors",
            count,
            monitors.len()
        );
        for (mi, ws_id) in &monitor_ws {
            info!("  monitor {} ({}) -> workspace {}", mi, monitors[*mi].name, ws_id);
        }

        Ok(WorkspaceManager {
            workspaces,
            monitors,
            monitor_ws,
            on_ws_changed: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    pub fn workspace_ids(&self) -> Vec<usize> {
        self.workspaces.keys().copied().collect()
    }

    pub fn get_workspace(&self, ws_id: usize) -> Option<&Workspace> {
        self.workspaces.get(&ws_id)
    }

    pub fn get_workspace_mut(&mut self, ws_id: usize) -> Option<&mut Workspace> {
        self.workspaces.get_mut(&ws_id)
    }

    /// Id of the workspace currently visible on a monitor.
    pub fn active_ws_id(&self, monitor_index: usize) -> usize {
        self.monitor_ws.get(&monitor_index).copied().unwrap_or(1)
    }

    pub fn active_workspace(&self, monitor_index: usize) -> Option<&Workspace> {
        self.workspaces.get(&self.active_ws_id(monitor_index))
    }

    /// The monitor currently showing `ws_id`, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Monitor, Rect};
    /// use tatami_core::workspace::WorkspaceManager;
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let manager = WorkspaceManager::new(9, vec![monitor]).unwrap();
    /// assert_eq!(manager.monitor_for_workspace(1), Some(0));
    /// assert_eq!(manager.monitor_for_workspace(5), None);
    /// ```
    pub fn monitor_for_workspace(&self, ws_id: usize) -> Option<usize> {
        self.monitor_ws
            .iter()
            .find(|(_, active)| **active == ws_id)
            .map(|(mi, _)| *mi)
    }

    /// Workspace that holds a window, in either of its lists.
    pub fn find_window_workspace(&self, id: WindowId) -> Option<usize> {
        self.workspaces
            .values()
            .find(|ws| ws.contains(id))
            .map(|ws| ws.id())
    }

    /// Index of the monitor containing a point, defaulting to the primary.
    pub fn monitor_index_at(&self, x: i32, y: i32) -> usize {
        self.monitors
            .iter()
            .position(|m| m.full_rect.contains_point(x, y))
            .unwrap_or(0)
    }

    pub fn on_workspace_changed(&mut self, callback: WorkspaceChangedCallback) {
        self.on_ws_changed.push(callback);
    }

    fn emit_workspace_changed(&mut self, monitor_index: usize, old_id: usize, new_id: usize) {
        for callback in &mut self.on_ws_changed {
            callback(monitor_index, old_id, new_id);
        }
    }

    // ------------------------------------------------------------------
    // Switching
    // ------------------------------------------------------------------

    /// Make `target_id` the visible workspace on `monitor_index`.
    ///
    /// If the target is already visible on another monitor the two monitors
    /// swap their workspaces instead. The hide/show run happens under both
    /// suppression gates so that none of the events it generates unmanage
    /// the windows being moved, and the target's handles are re-adopted
    /// into the managed set in case late events pruned them while the
    /// workspace was hidden.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Monitor, Rect, WindowStore};
    /// use tatami_core::workspace::WorkspaceManager;
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut store = WindowStore::new();
    /// let mut manager = WorkspaceManager::new(9, vec![monitor]).unwrap();
    ///
    /// assert!(manager.switch_workspace(2, 0, &mut store));
    /// assert_eq!(manager.active_ws_id(0), 2);
    /// assert!(!manager.get_workspace(1).unwrap().is_active());
    ///
    /// // Switching to the visible workspace is a no-op.
    /// assert!(!manager.switch_workspace(2, 0, &mut store));
    /// ```
    pub fn switch_workspace(
        &mut self,
        target_id: usize,
        monitor_index: usize,
        store: &mut WindowStore,
    ) -> bool {
        if !self.workspaces.contains_key(&target_id) {
            warn!("switch_workspace: workspace {} does not exist", target_id);
            return false;
        }
        let Some(&current_id) = self.monitor_ws.get(&monitor_index) else {
            warn!("switch_workspace: monitor {} does not exist", monitor_index);
            return false;
        };
        if current_id == target_id {
            debug!("switch_workspace: already on workspace {}", target_id);
            return false;
        }

        if let Some(other) = self.monitor_for_workspace(target_id) {
            if other != monitor_index {
                return self.swap_workspaces_between_monitors(monitor_index, other, store);
            }
        }

        store.suppress_events();
        self.arm_suppression(&[current_id, target_id], store);

        if let Some(current) = self.workspaces.get_mut(&current_id) {
            current.hide_all_windows(store);
            current.set_active(false);
        }
        if let Some(target) = self.workspaces.get_mut(&target_id) {
            target.show_all_windows(store);
            target.set_active(true);
        }
        self.ensure_windows_tracked(target_id, store);

        store.resume_events();

        self.monitor_ws.insert(monitor_index, target_id);
        self.retile_workspace(target_id, monitor_index, store);

        info!(
            "switch: ws {} -> ws {} on monitor {}",
            current_id, target_id, monitor_index
        );
        self.emit_workspace_changed(monitor_index, current_id, target_id);
        true
    }

    /// Exchange the visible workspaces of two monitors.
    fn swap_workspaces_between_monitors(
        &mut self,
        monitor_a: usize,
        monitor_b: usize,
        store: &mut WindowStore,
    ) -> bool {
        let (Some(&ws_a_id), Some(&ws_b_id)) = (
            self.monitor_ws.get(&monitor_a),
            self.monitor_ws.get(&monitor_b),
        ) else {
            return false;
        };

        store.suppress_events();
        self.arm_suppression(&[ws_a_id, ws_b_id], store);

        if let Some(ws_a) = self.workspaces.get_mut(&ws_a_id) {
            ws_a.hide_all_windows(store);
        }
        if let Some(ws_b) = self.workspaces.get_mut(&ws_b_id) {
            ws_b.hide_all_windows(store);
        }

        self.monitor_ws.insert(monitor_a, ws_b_id);
        self.monitor_ws.insert(monitor_b, ws_a_id);

        if let Some(ws_a) = self.workspaces.get_mut(&ws_a_id) {
            ws_a.show_all_windows(store);
        }
        if let Some(ws_b) = self.workspaces.get_mut(&ws_b_id) {
            ws_b.show_all_windows(store);
        }
        self.ensure_windows_tracked(ws_a_id, store);
        self.ensure_windows_tracked(ws_b_id, store);

        store.resume_events();

        self.retile_workspace(ws_b_id, monitor_a, store);
        self.retile_workspace(ws_a_id, monitor_b, store);

        info!(
            "swap: ws {} (monitor {}) <-> ws {} (monitor {})",
            ws_a_id, monitor_a, ws_b_id, monitor_b
        );
        self.emit_workspace_changed(monitor_a, ws_a_id, ws_b_id);
        self.emit_workspace_changed(monitor_b, ws_b_id, ws_a_id);
        true
    }

    /// Arm one-shot suppression for every live window of the given
    /// workspaces, so events the OS delivers after the switch completes are
    /// still absorbed.
    fn arm_suppression(&self, ws_ids: &[usize], store: &mut WindowStore) {
        let mut ids = Vec::new();
        for ws_id in ws_ids {
            if let Some(ws) = self.workspaces.get(ws_id) {
                ids.extend(ws.all_windows().filter(|id| Window::new(*id).is_valid()));
            }
        }
        store.add_suppressed(ids);
    }

    /// Re-adopt a hidden workspace's valid handles into the managed set and
    /// drop the ones that died while it was inactive. Late destroy/hide
    /// events can prune a handle from the store even though the window
    /// still exists off-screen.
    fn ensure_windows_tracked(&mut self, ws_id: usize, store: &mut WindowStore) {
        let Some(ws) = self.workspaces.get_mut(&ws_id) else {
            return;
        };

        let mut stale = Vec::new();
        for id in ws.all_windows().collect::<Vec<_>>() {
            if !Window::new(id).is_valid() {
                stale.push(id);
                continue;
            }
            if !store.contains(id) {
                store.track_id(id);
                debug!("re-tracked {} for ws {}", id, ws_id);
            }
        }
        for id in stale {
            ws.remove_window(id);
            debug!("removed stale window {} from ws {}", id, ws_id);
        }
    }

    // ------------------------------------------------------------------
    // Window assignment
    // ------------------------------------------------------------------

    /// Offer a window to the active workspace of a monitor.
    ///
    /// Windows already holding the whole monitor natively (exclusive
    /// fullscreen games) are refused outright and stay untouched by the WM.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Monitor, Rect, WindowId, WindowStore};
    /// use tatami_core::workspace::WorkspaceManager;
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut store = WindowStore::new();
    /// let mut manager = WorkspaceManager::new(9, vec![monitor]).unwrap();
    ///
    /// let id = WindowId(0x1234);
    /// store.track_id(id);
    /// assert!(manager.add_window(id, 0, false, &mut store));
    /// assert_eq!(manager.find_window_workspace(id), Some(1));
    ///
    /// // A window lives in at most one workspace; a second add is refused.
    /// assert!(!manager.add_window(id, 0, false, &mut store));
    /// ```
    pub fn add_window(
        &mut self,
        id: WindowId,
        monitor_index: usize,
        floating: bool,
        store: &mut WindowStore,
    ) -> bool {
        if self.workspaces.values().any(|ws| ws.contains(id)) {
            return false;
        }
        let Some(monitor) = self.monitors.get(monitor_index) else {
            return false;
        };

        if Window::new(id).is_native_fullscreen(monitor.full_rect) {
            info!("ignoring native fullscreen window {}", id);
            return false;
        }

        let ws_id = self.active_ws_id(monitor_index);
        let Some(ws) = self.workspaces.get_mut(&ws_id) else {
            return false;
        };
        if !ws.add_window(id, floating) {
            return false;
        }
        if ws.is_active() && !floating {
            self.retile_workspace(ws_id, monitor_index, store);
        }
        true
    }

    /// Remove a window from whichever workspace holds it, retiling if that
    /// workspace is visible.
    pub fn remove_window(&mut self, id: WindowId, store: &mut WindowStore) -> bool {
        let Some(ws_id) = self.find_window_workspace(id) else {
            return false;
        };
        if let Some(ws) = self.workspaces.get_mut(&ws_id) {
            ws.remove_window(id);
            if ws.is_active() {
                if let Some(mi) = self.monitor_for_workspace(ws_id) {
                    self.retile_workspace(ws_id, mi, store);
                }
            }
        }
        true
    }

    /// Move a window to another workspace, visible or not.
    ///
    /// The handle is pre-armed in the one-shot suppression set: the
    /// off-screen reposition below generates hide/foreground events that
    /// would otherwise unmanage the window right after it lands on the
    /// target. When the target is hidden the window is parked immediately
    /// and re-inserted into the managed set so the pump does not lose it.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Monitor, Rect, WindowId, WindowStore};
    /// use tatami_core::workspace::WorkspaceManager;
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut store = WindowStore::new();
    /// let mut manager = WorkspaceManager::new(9, vec![monitor]).unwrap();
    /// let id = WindowId(0x1234);
    /// store.track_id(id);
    /// manager.add_window(id, 0, false, &mut store);
    ///
    /// assert!(manager.move_window_to_workspace(id, 4, &mut store));
    /// assert_eq!(manager.find_window_workspace(id), Some(4));
    /// // Hidden or not, the window stays in the managed set.
    /// assert!(store.contains(id));
    /// ```
    pub fn move_window_to_workspace(
        &mut self,
        id: WindowId,
        target_ws_id: usize,
        store: &mut WindowStore,
    ) -> bool {
        let Some(target) = self.workspaces.get(&target_ws_id) else {
            warn!("move_window_to_workspace: ws {} does not exist", target_ws_id);
            return false;
        };
        if target.contains(id) {
            return false;
        }
        let Some(source_ws_id) = self.find_window_workspace(id) else {
            warn!("move_window_to_workspace: window {} not managed", id);
            return false;
        };

        store.add_suppressed([id]);

        if let Some(source) = self.workspaces.get_mut(&source_ws_id) {
            source.remove_window(id);
            if source.is_active() {
                if let Some(mi) = self.monitor_for_workspace(source_ws_id) {
                    self.retile_workspace(source_ws_id, mi, store);
                }
            }
        }

        let target_active = match self.workspaces.get_mut(&target_ws_id) {
            Some(target) => {
                target.add_window(id, false);
                target.is_active()
            }
            None => return false,
        };

        if target_active {
            if let Some(mi) = self.monitor_for_workspace(target_ws_id) {
                self.retile_workspace(target_ws_id, mi, store);
            }
        } else {
            store.suppress_events();
            let window = store.track_id(id);
            if window.is_valid() {
                if window.is_fullscreen() {
                    window.suspend_fullscreen();
                } else {
                    let rect = window.rect();
                    window.park_offscreen();
                    if let (Some(rect), Some(target)) =
                        (rect, self.workspaces.get_mut(&target_ws_id))
                    {
                        target.record_saved_position(id, rect);
                    }
                }
            }
            store.resume_events();
        }

        info!(
            "move: window {} ws {} -> ws {}",
            id, source_ws_id, target_ws_id
        );
        true
    }

    /// Move a window to the active workspace of the next monitor, wrapping
    /// around. No-op with a single monitor.
    pub fn move_window_to_next_monitor(&mut self, id: WindowId, store: &mut WindowStore) -> bool {
        if self.monitors.len() < 2 {
            debug!("move_window_to_next_monitor: only one monitor");
            return false;
        }
        let Some(source_ws_id) = self.find_window_workspace(id) else {
            return false;
        };
        let Some(source_mi) = self.monitor_for_workspace(source_ws_id) else {
            return false;
        };

        let next_mi = (source_mi + 1) % self.monitors.len();
        let target_ws_id = self.active_ws_id(next_mi);

        if let Some(source) = self.workspaces.get_mut(&source_ws_id) {
            source.remove_window(id);
        }
        self.retile_workspace(source_ws_id, source_mi, store);

        if let Some(target) = self.workspaces.get_mut(&target_ws_id) {
            target.add_window(id, false);
        }
        self.retile_workspace(target_ws_id, next_mi, store);

        info!(
            "move to monitor: window {} monitor {} (ws {}) -> monitor {} (ws {})",
            id, source_mi, source_ws_id, next_mi, target_ws_id
        );
        true
    }

    // ------------------------------------------------------------------
    // Retiling
    // ------------------------------------------------------------------

    /// Retile the visible workspace of a monitor.
    pub fn retile(&mut self, monitor_index: usize, store: &mut WindowStore) {
        let ws_id = self.active_ws_id(monitor_index);
        self.retile_workspace(ws_id, monitor_index, store);
    }

    /// Retile the visible workspace of every monitor.
    pub fn retile_all(&mut self, store: &mut WindowStore) {
        let mapping: Vec<(usize, usize)> =
            self.monitor_ws.iter().map(|(mi, ws)| (*mi, *ws)).collect();
        for (monitor_index, ws_id) in mapping {
            self.retile_workspace(ws_id, monitor_index, store);
        }
    }

    fn retile_workspace(&mut self, ws_id: usize, monitor_index: usize, store: &mut WindowStore) {
        let Some(monitor) = self.monitors.get(monitor_index) else {
            return;
        };
        let (work_rect, full_rect) = (monitor.work_rect, monitor.full_rect);
        if let Some(ws) = self.workspaces.get_mut(&ws_id) {
            ws.retile(work_rect, full_rect, store);
        }
    }

    // ------------------------------------------------------------------
    // Monitor changes
    // ------------------------------------------------------------------

    /// Re-detect monitors after a display change. Workspaces whose monitor
    /// disappeared are hidden (under suppression) and their mapping entries
    /// dropped; everything still mapped is retiled over the new geometry.
    pub fn refresh_monitors(&mut self, store: &mut WindowStore) {
        let monitors = match detect_monitors() {
            Ok(monitors) => monitors,
            Err(err) => {
                warn!("refresh_monitors: {}", err);
                return;
            }
        };
        self.monitors = monitors;

        store.suppress_events();
        let orphaned: Vec<usize> = self
            .monitor_ws
            .keys()
            .copied()
            .filter(|mi| *mi >= self.monitors.len())
            .collect();
        for mi in orphaned {
            if let Some(ws_id) = self.monitor_ws.remove(&mi) {
                self.arm_suppression(&[ws_id], store);
                if let Some(ws) = self.workspaces.get_mut(&ws_id) {
                    ws.set_active(false);
                    ws.hide_all_windows(store);
                }
            }
        }
        store.resume_events();

        self.retile_all(store);
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Put the desktop back the way applications expect it before the WM
    /// exits: fullscreen windows get their original styles back, and every
    /// window parked off-screen by an inactive workspace returns to its
    /// saved position (or a plain restore when none was recorded).
    pub fn restore_all_windows(&mut self, store: &mut WindowStore) {
        store.suppress_events();

        let ws_ids: Vec<usize> = self.workspaces.keys().copied().collect();
        for ws_id in ws_ids {
            let Some(ws) = self.workspaces.get(&ws_id) else {
                continue;
            };
            let ids: Vec<WindowId> = ws.all_windows().collect();
            let active = ws.is_active();

            for id in &ids {
                if let Some(win) = store.get_mut(*id) {
                    if win.is_valid() && win.is_fullscreen() {
                        win.exit_fullscreen();
                        debug!("restored fullscreen window {} from ws {}", id, ws_id);
                    }
                }
            }

            if active {
                continue;
            }

            for id in ids {
                let saved = self
                    .workspaces
                    .get_mut(&ws_id)
                    .and_then(|ws| ws.take_saved_position(id));
                let Some(win) = store.get_mut(id) else {
                    continue;
                };
                if !win.is_valid() {
                    continue;
                }
                match saved {
                    Some(rect) => {
                        win.restore_position(rect);
                    }
                    None => {
                        win.restore();
                    }
                }
                debug!("restored hidden window {} from ws {}", id, ws_id);
            }
        }

        store.resume_events();
        info!("all hidden windows restored for shutdown");
    }

    /// Human-readable closing summary: the monitor mapping and every
    /// workspace that still holds windows.
    pub fn status_summary(&self, store: &WindowStore) -> String {
        let mut lines = vec!["workspace status:".to_string()];

        let mut mapping: Vec<(usize, usize)> =
            self.monitor_ws.iter().map(|(mi, ws)| (*mi, *ws)).collect();
        mapping.sort();
        for (mi, ws_id) in mapping {
            if let Some(monitor) = self.monitors.get(mi) {
                lines.push(format!(
                    "  monitor {} ({}): workspace {} [visible]",
                    mi, monitor.name, ws_id
                ));
            }
        }

        for (ws_id, ws) in &self.workspaces {
            if ws.window_count() == 0 {
                continue;
            }
            lines.push(format!(
                "  workspace {} ({} windows){}",
                ws_id,
                ws.window_count(),
                if ws.is_active() { " [visible]" } else { "" }
            ));
            for (i, id) in ws.tiled().iter().enumerate() {
                let role = if i == 0 { "master".into() } else { format!("stack-{i}") };
                let title = store
                    .get(*id)
                    .filter(|w| w.is_valid())
                    .map(|w| w.title())
                    .unwrap_or_else(|| "<invalid>".into());
                lines.push(format!("    [{role}] {title}"));
            }
            for id in ws.floating() {
                let title = store
                    .get(*id)
                    .filter(|w| w.is_valid())
                    .map(|w| w.title())
                    .unwrap_or_else(|| "<invalid>".into());
                lines.push(format!("    [float] {title}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_manager::Rect;

    fn two_monitors() -> Vec<Monitor> {
        vec![
            Monitor::new(
                "DISPLAY1",
                Rect::new(0, 0, 1920, 1080),
                Rect::new(0, 0, 1920, 1040),
                true,
            ),
            Monitor::new(
                "DISPLAY2",
                Rect::new(1920, 0, 1920, 1080),
                Rect::new(1920, 0, 1920, 1040),
                false,
            ),
        ]
    }

    fn one_monitor() -> Vec<Monitor> {
        let mut monitors = two_monitors();
        monitors.truncate(1);
        monitors
    }

    fn tracked(store: &mut WindowStore, raw: isize) -> WindowId {
        let id = WindowId(raw);
        store.track_id(id);
        id
    }

    #[test]
    fn test_initial_mapping() {
        let manager = WorkspaceManager::new(9, two_monitors()).unwrap();
        assert_eq!(manager.monitors().len(), 2);
        assert_eq!(manager.active_ws_id(0), 1);
        assert_eq!(manager.active_ws_id(1), 2);
        assert!(manager.get_workspace(1).unwrap().is_active());
        assert!(manager.get_workspace(2).unwrap().is_active());
        assert!(!manager.get_workspace(3).unwrap().is_active());
        assert_eq!(manager.monitor_for_workspace(2), Some(1));
        assert_eq!(manager.monitor_for_workspace(5), None);
    }

    #[test]
    fn test_no_monitors_is_fatal() {
        assert!(WorkspaceManager::new(9, Vec::new()).is_err());
    }

    #[test]
    fn test_window_appears_in_at_most_one_workspace() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        let id = tracked(&mut store, 1);

        assert!(manager.add_window(id, 0, false, &mut store));
        // A second add anywhere is refused.
        assert!(!manager.add_window(id, 0, false, &mut store));

        let membership = manager
            .workspace_ids()
            .iter()
            .filter(|ws| manager.get_workspace(**ws).unwrap().contains(id))
            .count();
        assert_eq!(membership, 1);
    }

    #[test]
    fn test_switch_keeps_managed_set_intact() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        let a = tracked(&mut store, 1);
        let b = tracked(&mut store, 2);
        manager.add_window(a, 0, false, &mut store);
        manager.add_window(b, 0, false, &mut store);

        assert!(manager.switch_workspace(2, 0, &mut store));

        assert_eq!(manager.active_ws_id(0), 2);
        assert!(!manager.get_workspace(1).unwrap().is_active());
        assert!(manager.get_workspace(2).unwrap().is_active());
        // The hidden windows are still managed and still members of ws 1.
        assert!(store.contains(a));
        assert!(store.contains(b));
        assert!(manager.get_workspace(1).unwrap().contains(a));
        assert!(manager.get_workspace(1).unwrap().contains(b));
        // Suppression is released once the switch is done.
        assert!(!store.is_suppressing());
    }

    #[test]
    fn test_switch_to_same_workspace_is_noop() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        assert!(!manager.switch_workspace(1, 0, &mut store));
        assert!(!manager.switch_workspace(42, 0, &mut store));
        assert!(!manager.switch_workspace(2, 7, &mut store));
    }

    #[test]
    fn test_switch_to_other_monitors_workspace_swaps() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, two_monitors()).unwrap();
        let a = tracked(&mut store, 1);
        let b = tracked(&mut store, 2);
        manager.add_window(a, 0, false, &mut store); // ws 1 on monitor 0
        manager.add_window(b, 1, false, &mut store); // ws 2 on monitor 1

        // Asking monitor 0 for ws 2 swaps the two monitors' workspaces.
        assert!(manager.switch_workspace(2, 0, &mut store));
        assert_eq!(manager.active_ws_id(0), 2);
        assert_eq!(manager.active_ws_id(1), 1);
        assert!(manager.get_workspace(1).unwrap().is_active());
        assert!(manager.get_workspace(2).unwrap().is_active());
        assert!(manager.get_workspace(1).unwrap().contains(a));
        assert!(manager.get_workspace(2).unwrap().contains(b));
    }

    #[test]
    fn test_workspace_changed_callback_fires() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();

        let seen: Rc<RefCell<Vec<(usize, usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.on_workspace_changed(Box::new(move |mi, old, new| {
            sink.borrow_mut().push((mi, old, new));
        }));

        manager.switch_workspace(3, 0, &mut store);
        assert_eq!(seen.borrow().as_slice(), &[(0, 1, 3)]);
    }

    #[test]
    fn test_move_window_to_hidden_workspace() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        let a = tracked(&mut store, 1);
        let b = tracked(&mut store, 2);
        manager.add_window(a, 0, false, &mut store);
        manager.add_window(b, 0, false, &mut store);

        assert!(manager.move_window_to_workspace(a, 4, &mut store));

        assert_eq!(manager.get_workspace(1).unwrap().tiled(), &[b]);
        assert_eq!(manager.get_workspace(4).unwrap().tiled(), &[a]);
        // Still managed while hidden, and armed against the late events the
        // off-screen reposition will generate.
        assert!(store.contains(a));
        assert!(store.is_suppression_armed(a));
        assert!(!store.is_suppressing());

        // Moving again to the same place is a no-op.
        assert!(!manager.move_window_to_workspace(a, 4, &mut store));
    }

    #[test]
    fn test_move_unmanaged_window_fails() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        assert!(!manager.move_window_to_workspace(WindowId(77), 2, &mut store));
    }

    #[test]
    fn test_move_window_to_next_monitor_wraps() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, two_monitors()).unwrap();
        let a = tracked(&mut store, 1);
        manager.add_window(a, 1, false, &mut store); // ws 2 on monitor 1

        assert!(manager.move_window_to_next_monitor(a, &mut store));
        assert!(manager.get_workspace(1).unwrap().contains(a));
        assert!(!manager.get_workspace(2).unwrap().contains(a));
    }

    #[test]
    fn test_move_to_next_monitor_single_monitor_noop() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        let a = tracked(&mut store, 1);
        manager.add_window(a, 0, false, &mut store);
        assert!(!manager.move_window_to_next_monitor(a, &mut store));
        assert!(manager.get_workspace(1).unwrap().contains(a));
    }

    #[test]
    fn test_remove_window() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, one_monitor()).unwrap();
        let a = tracked(&mut store, 1);
        manager.add_window(a, 0, false, &mut store);

        assert!(manager.remove_window(a, &mut store));
        assert_eq!(manager.find_window_workspace(a), None);
        assert!(!manager.remove_window(a, &mut store));
    }

    // Off Windows, detection reports the single stub display, which makes
    // this a deterministic unplug: monitor 1 disappears.
    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_refresh_monitors_compresses_lost_monitor() {
        let mut store = WindowStore::new();
        let mut manager = WorkspaceManager::new(9, two_monitors()).unwrap();
        let b = tracked(&mut store, 2);
        manager.add_window(b, 1, false, &mut store);

        manager.refresh_monitors(&mut store);

        assert_eq!(manager.monitor_count(), 1);
        assert_eq!(manager.monitor_for_workspace(2), None);
        assert!(!manager.get_workspace(2).unwrap().is_active());
        assert!(manager.get_workspace(2).unwrap().contains(b));
        assert!(!store.is_suppressing());
    }

    #[test]
    fn test_monitor_index_at() {
        let manager = WorkspaceManager::new(9, two_monitors()).unwrap();
        assert_eq!(manager.monitor_index_at(100, 100), 0);
        assert_eq!(manager.monitor_index_at(2000, 100), 1);
        assert_eq!(manager.monitor_index_at(-5000, -5000), 0);
    }
}
