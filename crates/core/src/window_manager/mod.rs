//! The window manager core.
//!
//! [`WindowManager`] owns the managed-window store, the workspace
//! multiplexer, the hotkey registry and the focus pointer. The event loop
//! feeds it two kinds of input, both on the same thread: translated OS
//! window events ([`OsEvent`]) and hotkey presses resolved to
//! [`Command`]s. Everything downstream of those two entry points is
//! synchronous, so no state here needs locking.

pub mod directional;
pub mod filters;
pub mod geometry;
pub mod layout;
pub mod monitor;
pub mod resize_mode;
pub mod spawn;
pub mod store;
pub mod window;

pub use geometry::Rect;
pub use layout::{Layout, LayoutKind};
pub use monitor::Monitor;
pub use store::WindowStore;
pub use window::{Window, WindowId};

use tracing::{debug, info, warn};

use crate::commands::{Command, ResizeStep};
use crate::config::schema::{Config, Keybind};
use crate::keybinds::HotkeyManager;
use crate::window_manager::directional::Direction;
use crate::window_manager::resize_mode::ResizeMode;
use crate::workspace::WorkspaceManager;

/// A window event after translation from the raw OS notification, before
/// the manageability filter has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsEvent {
    Shown,
    Hidden,
    Destroyed,
    Foreground,
    MinimizeStart,
    MinimizeEnd,
    MoveSizeEnd,
    TitleChanged,
}

/// Events emitted to subscribers once the filter and the managed set agree
/// something actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmEvent {
    WindowAdded(WindowId),
    WindowRemoved(WindowId),
    FocusChanged(WindowId),
    WindowMinimized(WindowId),
    WindowRestored(WindowId),
    WindowMoved(WindowId),
    TitleChanged(WindowId),
}

/// Observer callback for [`WmEvent`]s. Subscribers run synchronously on the
/// event-loop thread, inside the dispatch.
pub type EventSubscriber = Box<dyn FnMut(&WmEvent)>;

/// Central mutable state of the WM.
pub struct WindowManager {
    store: WindowStore,
    workspaces: WorkspaceManager,
    hotkeys: HotkeyManager,
    resize_mode: ResizeMode,
    keybinds: Vec<Keybind>,
    focused: Option<WindowId>,
    subscribers: Vec<EventSubscriber>,
}

impl WindowManager {
    /// Build the manager over detected monitors, seeding every workspace's
    /// layouts from the configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::config::Config;
    /// use tatami_core::window_manager::{Monitor, Rect, WindowManager};
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let wm = WindowManager::new(&Config::default(), vec![monitor]).unwrap();
    /// assert_eq!(wm.workspaces().workspace_count(), 9);
    /// assert_eq!(wm.focused(), None);
    /// assert!(wm.store().is_empty());
    /// ```
    pub fn new(config: &Config, monitors: Vec<Monitor>) -> anyhow::Result<Self> {
        let mut workspaces =
            WorkspaceManager::new(config.general.workspace_count, monitors)?;
        for ws_id in workspaces.workspace_ids() {
            if let Some(ws) = workspaces.get_workspace_mut(ws_id) {
                ws.set_layout_defaults(config.general.master_ratio, config.general.gap);
            }
        }

        Ok(WindowManager {
            store: WindowStore::new(),
            workspaces,
            hotkeys: HotkeyManager::new(),
            resize_mode: ResizeMode::new(),
            keybinds: config.keybinds.clone(),
            focused: None,
            subscribers: Vec::new(),
        })
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WindowStore {
        &mut self.store
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    pub fn workspaces_mut(&mut self) -> &mut WorkspaceManager {
        &mut self.workspaces
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn subscribe(&mut self, subscriber: EventSubscriber) {
        self.subscribers.push(subscriber);
    }

    fn emit(&mut self, event: WmEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    // ------------------------------------------------------------------
    // Hotkeys
    // ------------------------------------------------------------------

    /// Register the configured keybindings with the OS. Must run on the
    /// event-loop thread: the hotkey table delivers to the registering
    /// thread's queue.
    pub fn bind_hotkeys(&mut self) {
        let keybinds = std::mem::take(&mut self.keybinds);
        let mut bound = 0;
        for keybind in &keybinds {
            match Command::parse(&keybind.command, &keybind.args) {
                Some(command) => {
                    if self.hotkeys.register_combo(&keybind.combo, command).is_some() {
                        bound += 1;
                    }
                }
                None => warn!(
                    "unknown command '{}' bound to '{}', skipping",
                    keybind.command, keybind.combo
                ),
            }
        }
        self.keybinds = keybinds;
        info!("registered {} of {} keybindings", bound, self.keybinds.len());
    }

    /// Release the process-wide hotkey table. Same thread as
    /// [`bind_hotkeys`](Self::bind_hotkeys).
    pub fn unbind_hotkeys(&mut self) {
        self.hotkeys.unregister_all();
    }

    /// Resolve and run the command behind a `WM_HOTKEY` message.
    pub fn handle_hotkey(&mut self, hotkey_id: i32) {
        match self.hotkeys.command_for(hotkey_id).cloned() {
            Some(command) => self.execute_command(&command),
            None => warn!("hotkey message with unknown id {}", hotkey_id),
        }
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Scan the desktop at startup: adopt every manageable window, take the
    /// current foreground as focused, and lay everything out.
    pub fn initial_scan(&mut self) {
        let ids = filters::enumerate_manageable();
        info!("initial scan found {} manageable windows", ids.len());
        for id in ids {
            self.manage_window(id);
        }

        if let Some(foreground) = crate::utils::win32::foreground_window() {
            if self.store.contains(foreground) {
                self.focused = Some(foreground);
            }
        }

        self.workspaces.retile_all(&mut self.store);
    }

    /// Adopt a handle: filter, track, hand to the workspace of the monitor
    /// it is on. Returns false when the filter rejects it, it is already
    /// managed, or the workspace layer refuses it (native fullscreen).
    pub fn manage_window(&mut self, id: WindowId) -> bool {
        if self.store.contains(id) {
            return false;
        }
        let window = Window::new(id);
        if !filters::is_manageable(&window) {
            return false;
        }

        let monitor = self.monitor_for_window(&window);
        self.adopt_window(id, monitor)
    }

    /// Track a handle and place it in the visible workspace of a monitor,
    /// skipping the manageability filter. The scan and the event handlers
    /// go through [`manage_window`](Self::manage_window); this entry is for
    /// callers whose handles do not come from an OS notification.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::config::Config;
    /// use tatami_core::window_manager::{Monitor, Rect, WindowId, WindowManager};
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut wm = WindowManager::new(&Config::default(), vec![monitor]).unwrap();
    ///
    /// let id = WindowId(0x1234);
    /// assert!(wm.adopt_window(id, 0));
    /// assert!(wm.store().contains(id));
    /// assert_eq!(wm.workspaces().find_window_workspace(id), Some(1));
    /// ```
    pub fn adopt_window(&mut self, id: WindowId, monitor: usize) -> bool {
        if self.store.contains(id) {
            return false;
        }
        self.store.track(Window::new(id));
        if !self.workspaces.add_window(id, monitor, false, &mut self.store) {
            self.store.remove(id);
            return false;
        }

        debug!("managing {}", id);
        self.emit(WmEvent::WindowAdded(id));
        true
    }

    /// Forget a handle entirely and give its screen space back.
    pub fn unmanage_window(&mut self, id: WindowId) {
        if self.store.remove(id).is_none() {
            return;
        }
        self.workspaces.remove_window(id, &mut self.store);
        if self.focused == Some(id) {
            self.focused = None;
        }
        debug!("unmanaged {}", id);
        self.emit(WmEvent::WindowRemoved(id));
    }

    fn monitor_for_window(&self, window: &Window) -> usize {
        window
            .rect()
            .map(|r| self.workspaces.monitor_index_at(r.center_x(), r.center_y()))
            .unwrap_or(0)
    }

    // ------------------------------------------------------------------
    // OS event dispatch
    // ------------------------------------------------------------------

    /// React to one translated OS event. Runs synchronously on the
    /// event-loop thread, inside the WinEvent callback.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::config::Config;
    /// use tatami_core::window_manager::{Monitor, OsEvent, Rect, WindowId, WindowManager};
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut wm = WindowManager::new(&Config::default(), vec![monitor]).unwrap();
    /// let id = WindowId(0x1234);
    /// wm.adopt_window(id, 0);
    ///
    /// // A hide on a managed window unmanages it...
    /// wm.handle_os_event(OsEvent::Hidden, id);
    /// assert!(!wm.store().contains(id));
    ///
    /// // ...unless the suppression gate is engaged.
    /// wm.adopt_window(id, 0);
    /// wm.store_mut().suppress_events();
    /// wm.handle_os_event(OsEvent::Hidden, id);
    /// wm.store_mut().resume_events();
    /// assert!(wm.store().contains(id));
    /// ```
    pub fn handle_os_event(&mut self, event: OsEvent, id: WindowId) {
        match event {
            OsEvent::Shown => self.on_shown(id),
            OsEvent::Foreground => self.on_foreground(id),
            OsEvent::Hidden => self.on_hidden(id),
            OsEvent::Destroyed => self.on_destroyed(id),
            OsEvent::MinimizeStart => self.on_minimize_start(id),
            OsEvent::MinimizeEnd => self.on_minimize_end(id),
            OsEvent::MoveSizeEnd => self.on_move_size_end(id),
            OsEvent::TitleChanged => self.on_title_changed(id),
        }
    }

    fn on_shown(&mut self, id: WindowId) {
        if self.store.should_suppress(id) {
            debug!("suppressed show for {}", id);
            return;
        }
        if !self.store.contains(id) {
            self.manage_window(id);
        }
    }

    fn on_foreground(&mut self, id: WindowId) {
        if self.store.should_suppress(id) {
            debug!("suppressed foreground for {}", id);
            return;
        }
        if !self.store.contains(id) {
            self.manage_window(id);
        }
        if self.store.contains(id) && self.focused != Some(id) {
            self.focused = Some(id);
            self.emit(WmEvent::FocusChanged(id));
        }
    }

    fn on_hidden(&mut self, id: WindowId) {
        if self.store.should_suppress(id) {
            debug!("suppressed hide for {}", id);
            return;
        }
        if self.store.contains(id) {
            self.unmanage_window(id);
        }
    }

    fn on_destroyed(&mut self, id: WindowId) {
        // Even under suppression the handle must leave the managed set;
        // it just does so silently, without an emit or a retile.
        if self.store.should_suppress(id) {
            self.store.remove(id);
            return;
        }
        if self.store.contains(id) {
            self.unmanage_window(id);
        }
    }

    fn on_minimize_start(&mut self, id: WindowId) {
        if self.store.should_suppress(id) {
            return;
        }
        if !self.store.contains(id) {
            return;
        }
        // Drop it from the tiling so the others take its space; it stays
        // managed and returns on minimize-end.
        self.workspaces.remove_window(id, &mut self.store);
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.emit(WmEvent::WindowMinimized(id));
    }

    fn on_minimize_end(&mut self, id: WindowId) {
        if self.store.should_suppress(id) {
            return;
        }
        if self.store.contains(id) {
            if self.workspaces.find_window_workspace(id).is_none() {
                let monitor = self
                    .store
                    .get(id)
                    .map(|w| self.monitor_for_window(w))
                    .unwrap_or(0);
                self.workspaces.add_window(id, monitor, false, &mut self.store);
            } else {
                self.retile_window_workspace(id);
            }
            self.emit(WmEvent::WindowRestored(id));
        } else {
            // A restore can be the first sighting of a manageable window.
            self.manage_window(id);
        }
    }

    fn on_move_size_end(&mut self, id: WindowId) {
        if !self.store.contains(id) {
            return;
        }
        self.emit(WmEvent::WindowMoved(id));
        // Snap the user's drag back into the layout.
        self.retile_window_workspace(id);
    }

    fn on_title_changed(&mut self, id: WindowId) {
        if !self.store.contains(id) {
            return;
        }
        self.emit(WmEvent::TitleChanged(id));
    }

    fn retile_window_workspace(&mut self, id: WindowId) {
        if let Some(ws_id) = self.workspaces.find_window_workspace(id) {
            if let Some(monitor) = self.workspaces.monitor_for_workspace(ws_id) {
                self.workspaces.retile(monitor, &mut self.store);
            }
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// The monitor the user is working on: the one showing the focused
    /// window's workspace, or the primary when nothing has focus.
    fn focused_monitor(&self) -> usize {
        self.focused
            .and_then(|id| self.workspaces.find_window_workspace(id))
            .and_then(|ws_id| self.workspaces.monitor_for_workspace(ws_id))
            .unwrap_or(0)
    }

    /// Execute one command against the current state.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::commands::Command;
    /// use tatami_core::config::Config;
    /// use tatami_core::window_manager::{Monitor, Rect, WindowManager};
    ///
    /// let monitor = Monitor::new(
    ///     "DISPLAY1",
    ///     Rect::new(0, 0, 1920, 1080),
    ///     Rect::new(0, 0, 1920, 1040),
    ///     true,
    /// );
    /// let mut wm = WindowManager::new(&Config::default(), vec![monitor]).unwrap();
    ///
    /// wm.execute_command(&Command::SwitchWorkspace(3));
    /// assert_eq!(wm.workspaces().active_ws_id(0), 3);
    ///
    /// wm.execute_command(&Command::NextLayout);
    /// assert_eq!(wm.workspaces().get_workspace(3).unwrap().layout_index(), 1);
    /// ```
    pub fn execute_command(&mut self, command: &Command) {
        debug!("command: {}", command);
        match command {
            Command::SwitchWorkspace(target) => {
                let monitor = self.focused_monitor();
                self.workspaces
                    .switch_workspace(*target, monitor, &mut self.store);
            }
            Command::MoveToWorkspace(target) => {
                if let Some(focused) = self.focused {
                    self.workspaces
                        .move_window_to_workspace(focused, *target, &mut self.store);
                }
            }

            Command::Focus(direction) => self.focus_direction(*direction),
            Command::MoveWindow(direction) => self.move_direction(*direction),

            Command::CloseWindow => {
                if let Some(win) = self.focused_window() {
                    win.close();
                }
            }
            Command::MinimizeWindow => {
                if let Some(win) = self.focused_window() {
                    win.minimize();
                }
            }
            Command::MaximizeWindow => {
                if let Some(win) = self.focused_window() {
                    win.maximize();
                }
            }
            Command::RestoreWindow => {
                if let Some(win) = self.focused_window() {
                    win.restore();
                }
            }

            Command::SwapMaster => {
                if let Some(focused) = self.focused {
                    if let Some(ws_id) = self.workspaces.find_window_workspace(focused) {
                        if let Some(ws) = self.workspaces.get_workspace_mut(ws_id) {
                            ws.swap_with_master(focused);
                        }
                        if let Some(monitor) = self.workspaces.monitor_for_workspace(ws_id) {
                            self.workspaces.retile(monitor, &mut self.store);
                        }
                    }
                }
            }
            Command::RotateNext => self.with_active_workspace(|ws| ws.rotate_next()),
            Command::RotatePrev => self.with_active_workspace(|ws| ws.rotate_prev()),

            Command::NextLayout => self.with_active_workspace(|ws| ws.next_layout()),
            Command::PrevLayout => self.with_active_workspace(|ws| ws.prev_layout()),
            Command::GrowMaster => self.with_active_workspace(|ws| ws.grow_master()),
            Command::ShrinkMaster => self.with_active_workspace(|ws| ws.shrink_master()),
            Command::IncreaseGap => self.with_active_workspace(|ws| ws.increase_gap()),
            Command::DecreaseGap => self.with_active_workspace(|ws| ws.decrease_gap()),

            Command::EnterResizeMode => {
                self.resize_mode.enter(&mut self.hotkeys);
            }
            Command::ExitResizeMode => {
                self.resize_mode.exit(&mut self.hotkeys);
            }
            Command::ToggleResizeMode => {
                self.resize_mode.toggle(&mut self.hotkeys);
            }
            Command::Resize(step) => {
                let apply: fn(&mut crate::workspace::Workspace) = match step {
                    ResizeStep::Wider => |ws| ws.grow_master(),
                    ResizeStep::Narrower => |ws| ws.shrink_master(),
                    ResizeStep::Taller => |ws| ws.decrease_gap(),
                    ResizeStep::Shorter => |ws| ws.increase_gap(),
                };
                self.with_active_workspace(apply);
            }

            Command::MoveToNextMonitor => {
                if let Some(focused) = self.focused {
                    self.workspaces
                        .move_window_to_next_monitor(focused, &mut self.store);
                }
            }
            Command::Spawn(command_line) => {
                spawn::spawn(command_line);
            }

            Command::Retile => {
                let monitor = self.focused_monitor();
                self.workspaces.retile(monitor, &mut self.store);
            }
            Command::RetileAll => self.workspaces.retile_all(&mut self.store),
            Command::Quit => {
                info!("quit requested");
                crate::event_loop::stop();
            }
        }
    }

    fn focused_window(&mut self) -> Option<&mut Window> {
        let id = self.focused?;
        self.store.get_mut(id)
    }

    /// Run a mutation on the focused monitor's visible workspace, then
    /// retile it.
    fn with_active_workspace(&mut self, apply: impl FnOnce(&mut crate::workspace::Workspace)) {
        let monitor = self.focused_monitor();
        let ws_id = self.workspaces.active_ws_id(monitor);
        if let Some(ws) = self.workspaces.get_workspace_mut(ws_id) {
            apply(ws);
        }
        self.workspaces.retile(monitor, &mut self.store);
    }

    fn focus_direction(&mut self, direction: Direction) {
        let Some((_, ws_id, focused_rect, candidates)) = self.directional_context() else {
            return;
        };

        let Some(index) = directional::find_nearest(focused_rect, &candidates, direction) else {
            debug!("focus {}: no window in that direction", direction.name());
            return;
        };
        let Some(target) = self
            .workspaces
            .get_workspace(ws_id)
            .and_then(|ws| ws.tiled().get(index).copied())
        else {
            return;
        };

        if let Some(win) = self.store.get(target) {
            if win.focus() {
                self.focused = Some(target);
                self.emit(WmEvent::FocusChanged(target));
            }
        }
    }

    fn move_direction(&mut self, direction: Direction) {
        let Some((focused, ws_id, focused_rect, candidates)) =
            self.directional_context()
        else {
            return;
        };

        let Some(target_index) = directional::find_nearest(focused_rect, &candidates, direction)
        else {
            debug!("move {}: no window in that direction", direction.name());
            return;
        };
        let Some(source_index) = self
            .workspaces
            .get_workspace(ws_id)
            .and_then(|ws| ws.tiled().iter().position(|w| *w == focused))
        else {
            return;
        };

        if let Some(ws) = self.workspaces.get_workspace_mut(ws_id) {
            ws.swap_indices(source_index, target_index);
        }
        if let Some(monitor) = self.workspaces.monitor_for_workspace(ws_id) {
            self.workspaces.retile(monitor, &mut self.store);
        }
    }

    /// The focused window's workspace plus the `(index, rect)` pairs of its
    /// tiled peers, the inputs of the directional metric.
    fn directional_context(&self) -> Option<(WindowId, usize, Rect, Vec<(usize, Rect)>)> {
        let focused = self.focused?;
        let ws_id = self.workspaces.find_window_workspace(focused)?;
        let focused_rect = self.store.get(focused).and_then(|w| w.rect())?;

        let ws = self.workspaces.get_workspace(ws_id)?;
        let candidates = ws
            .tiled()
            .iter()
            .enumerate()
            .filter(|(_, id)| **id != focused)
            .filter_map(|(i, id)| {
                self.store.get(*id).and_then(|w| w.rect()).map(|r| (i, r))
            })
            .collect();

        Some((focused, ws_id, focused_rect, candidates))
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Put every window back where applications expect it and log a final
    /// status summary.
    pub fn shutdown(&mut self) {
        self.workspaces.restore_all_windows(&mut self.store);
        info!("{}", self.workspaces.status_summary(&self.store));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_manager() -> WindowManager {
        let monitors = vec![Monitor::new(
            "DISPLAY1",
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1040),
            true,
        )];
        WindowManager::new(&Config::default(), monitors).unwrap()
    }

    fn adopt(wm: &mut WindowManager, raw: isize) -> WindowId {
        let id = WindowId(raw);
        assert!(wm.adopt_window(id, 0));
        id
    }

    fn capture_events(wm: &mut WindowManager) -> Rc<RefCell<Vec<WmEvent>>> {
        let seen: Rc<RefCell<Vec<WmEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        wm.subscribe(Box::new(move |event| sink.borrow_mut().push(*event)));
        seen
    }

    #[test]
    fn test_hidden_window_is_unmanaged() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);
        let events = capture_events(&mut wm);

        wm.handle_os_event(OsEvent::Hidden, id);

        assert!(!wm.store().contains(id));
        assert_eq!(wm.workspaces().find_window_workspace(id), None);
        assert_eq!(events.borrow().as_slice(), &[WmEvent::WindowRemoved(id)]);
    }

    #[test]
    fn test_suppression_makes_events_inert() {
        let mut wm = test_manager();
        let a = adopt(&mut wm, 1);
        let b = adopt(&mut wm, 2);
        let events = capture_events(&mut wm);

        wm.store_mut().suppress_events();
        for _ in 0..3 {
            wm.handle_os_event(OsEvent::Hidden, a);
            wm.handle_os_event(OsEvent::Shown, b);
            wm.handle_os_event(OsEvent::Foreground, b);
            wm.handle_os_event(OsEvent::MinimizeStart, a);
            wm.handle_os_event(OsEvent::MinimizeEnd, a);
        }
        wm.store_mut().resume_events();

        assert!(wm.store().contains(a));
        assert!(wm.store().contains(b));
        assert_eq!(wm.workspaces().find_window_workspace(a), Some(1));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_one_shot_absorbs_single_late_hide() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);

        wm.store_mut().add_suppressed([id]);
        wm.handle_os_event(OsEvent::Hidden, id);
        assert!(wm.store().contains(id), "armed hide must be absorbed");

        wm.handle_os_event(OsEvent::Hidden, id);
        assert!(!wm.store().contains(id), "second hide is real");
    }

    #[test]
    fn test_destroy_under_suppression_prunes_silently() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);
        let events = capture_events(&mut wm);

        wm.store_mut().suppress_events();
        wm.handle_os_event(OsEvent::Destroyed, id);
        wm.store_mut().resume_events();

        assert!(!wm.store().contains(id));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_minimize_keeps_window_managed_but_untiled() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);

        wm.handle_os_event(OsEvent::MinimizeStart, id);
        assert!(wm.store().contains(id));
        assert_eq!(wm.workspaces().find_window_workspace(id), None);

        wm.handle_os_event(OsEvent::MinimizeEnd, id);
        assert_eq!(wm.workspaces().find_window_workspace(id), Some(1));
    }

    #[test]
    fn test_title_change_only_for_managed_windows() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);
        let events = capture_events(&mut wm);

        wm.handle_os_event(OsEvent::TitleChanged, id);
        wm.handle_os_event(OsEvent::TitleChanged, WindowId(99));

        assert_eq!(events.borrow().as_slice(), &[WmEvent::TitleChanged(id)]);
    }

    #[test]
    fn test_switch_command_moves_between_workspaces() {
        let mut wm = test_manager();
        let id = adopt(&mut wm, 1);

        wm.execute_command(&Command::SwitchWorkspace(3));
        assert_eq!(wm.workspaces().active_ws_id(0), 3);
        assert!(wm.store().contains(id));

        wm.execute_command(&Command::SwitchWorkspace(1));
        assert_eq!(wm.workspaces().active_ws_id(0), 1);
    }

    #[test]
    fn test_resize_mode_round_trip_via_commands() {
        let mut wm = test_manager();
        let before = wm
            .workspaces()
            .get_workspace(1)
            .unwrap()
            .current_layout()
            .master_ratio();

        wm.execute_command(&Command::ToggleResizeMode);
        wm.execute_command(&Command::Resize(ResizeStep::Wider));
        wm.execute_command(&Command::ExitResizeMode);

        let after = wm
            .workspaces()
            .get_workspace(1)
            .unwrap()
            .current_layout()
            .master_ratio();
        assert!(after > before);
    }

    #[test]
    fn test_layout_commands_affect_active_workspace_only() {
        let mut wm = test_manager();
        wm.execute_command(&Command::NextLayout);
        assert_eq!(wm.workspaces().get_workspace(1).unwrap().layout_index(), 1);
        assert_eq!(wm.workspaces().get_workspace(2).unwrap().layout_index(), 0);
    }
}
