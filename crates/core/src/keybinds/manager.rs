//! Global hotkey registration.
//!
//! The manager owns the process-wide hotkey table: it registers combos with
//! the OS, hands out the integer ids the message pump sees in `WM_HOTKEY`,
//! and maps those ids back to [`Command`]s. Registration failures (usually
//! a conflict with another application) are logged and skipped; the other
//! hotkeys still register.
//!
//! Registration is thread-affine: hotkeys registered with a null window are
//! delivered to the registering thread's message queue, so all calls must
//! happen on the event-loop thread.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::commands::Command;
use crate::keybinds::parser::{parse_combo, Combo};

#[cfg(target_os = "windows")]
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS,
};

/// Registry of active global hotkeys.
pub struct HotkeyManager {
    bindings: HashMap<i32, Command>,
    next_id: i32,
}

impl HotkeyManager {
    pub fn new() -> Self {
        HotkeyManager {
            bindings: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// The command bound to a hotkey id, as delivered in `WM_HOTKEY`.
    pub fn command_for(&self, hotkey_id: i32) -> Option<&Command> {
        self.bindings.get(&hotkey_id)
    }

    /// Register a combo string for a command. Returns the assigned hotkey
    /// id, or `None` when the combo does not parse or the OS refuses it.
    pub fn register_combo(&mut self, combo: &str, command: Command) -> Option<i32> {
        match parse_combo(combo) {
            Ok(parsed) => self.register(parsed, command, combo),
            Err(err) => {
                warn!("skipping binding for '{}': {}", command, err);
                None
            }
        }
    }

    /// Register an already-parsed combo. Used directly by the resize mode,
    /// which binds bare arrow keys that the config parser would reject.
    pub fn register(&mut self, combo: Combo, command: Command, label: &str) -> Option<i32> {
        let hotkey_id = self.next_id;

        if !os_register(hotkey_id, combo) {
            warn!(
                "failed to register hotkey '{}' for '{}' (combo in use?)",
                label, command
            );
            return None;
        }

        debug!("hotkey {}: '{}' -> {}", hotkey_id, label, command);
        self.bindings.insert(hotkey_id, command);
        self.next_id += 1;
        Some(hotkey_id)
    }

    /// Unregister a single hotkey by id.
    pub fn unregister(&mut self, hotkey_id: i32) -> bool {
        if self.bindings.remove(&hotkey_id).is_none() {
            return false;
        }
        os_unregister(hotkey_id);
        true
    }

    /// Unregister everything. Called on shutdown; the hotkey table is
    /// process-wide OS state and must not outlive the manager.
    pub fn unregister_all(&mut self) {
        for hotkey_id in self.bindings.keys() {
            os_unregister(*hotkey_id);
        }
        let count = self.bindings.len();
        self.bindings.clear();
        if count > 0 {
            info!("unregistered {} hotkeys", count);
        }
    }
}

impl Default for HotkeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

#[cfg(target_os = "windows")]
fn os_register(hotkey_id: i32, combo: Combo) -> bool {
    unsafe { RegisterHotKey(None, hotkey_id, HOT_KEY_MODIFIERS(combo.modifiers), combo.vk).is_ok() }
}

#[cfg(not(target_os = "windows"))]
fn os_register(_hotkey_id: i32, _combo: Combo) -> bool {
    true
}

#[cfg(target_os = "windows")]
fn os_unregister(hotkey_id: i32) {
    unsafe {
        if let Err(err) = UnregisterHotKey(None, hotkey_id) {
            warn!("failed to unregister hotkey {}: {}", hotkey_id, err);
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn os_unregister(_hotkey_id: i32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_increasing_ids() {
        let mut manager = HotkeyManager::new();
        let a = manager.register_combo("alt+1", Command::SwitchWorkspace(1));
        let b = manager.register_combo("alt+2", Command::SwitchWorkspace(2));
        assert_eq!(a, Some(1));
        assert_eq!(b, Some(2));
        assert_eq!(manager.binding_count(), 2);
    }

    #[test]
    fn test_command_lookup() {
        let mut manager = HotkeyManager::new();
        let id = manager
            .register_combo("alt+shift+q", Command::CloseWindow)
            .unwrap();
        assert_eq!(manager.command_for(id), Some(&Command::CloseWindow));
        assert_eq!(manager.command_for(999), None);
    }

    #[test]
    fn test_bad_combo_is_skipped() {
        let mut manager = HotkeyManager::new();
        assert_eq!(manager.register_combo("nope+q", Command::Quit), None);
        assert_eq!(manager.binding_count(), 0);
    }

    #[test]
    fn test_unregister() {
        let mut manager = HotkeyManager::new();
        let id = manager.register_combo("alt+x", Command::Quit).unwrap();
        assert!(manager.unregister(id));
        assert!(!manager.unregister(id));
        assert_eq!(manager.command_for(id), None);
    }

    #[test]
    fn test_unregister_all() {
        let mut manager = HotkeyManager::new();
        manager.register_combo("alt+1", Command::SwitchWorkspace(1));
        manager.register_combo("alt+2", Command::SwitchWorkspace(2));
        manager.unregister_all();
        assert_eq!(manager.binding_count(), 0);
    }
}
