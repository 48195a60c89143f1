//! Interactive resize mode.
//!
//! Entering the mode registers temporary, modifier-less hotkeys: the arrow
//! keys step the master ratio and gap of the active layout, Escape and
//! Enter leave the mode. Leaving unregisters every temporary binding, so
//! the arrows go back to the applications.

use tracing::{debug, info};

use crate::commands::{Command, ResizeStep};
use crate::keybinds::parser::{vk, Combo};
use crate::keybinds::HotkeyManager;

/// State of the interactive resize mode.
#[derive(Default)]
pub struct ResizeMode {
    active: bool,
    temp_hotkey_ids: Vec<i32>,
}

impl ResizeMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter the mode, grabbing the arrow keys and the exit keys.
    pub fn enter(&mut self, hotkeys: &mut HotkeyManager) -> bool {
        if self.active {
            debug!("resize mode already active");
            return false;
        }
        self.active = true;

        let bindings = [
            (vk::RIGHT, Command::Resize(ResizeStep::Wider), "Right"),
            (vk::LEFT, Command::Resize(ResizeStep::Narrower), "Left"),
            (vk::UP, Command::Resize(ResizeStep::Taller), "Up"),
            (vk::DOWN, Command::Resize(ResizeStep::Shorter), "Down"),
            (vk::ESCAPE, Command::ExitResizeMode, "Escape"),
            (vk::RETURN, Command::ExitResizeMode, "Enter"),
        ];

        for (key, command, label) in bindings {
            let combo = Combo {
                modifiers: 0,
                vk: key,
            };
            if let Some(id) = hotkeys.register(combo, command, label) {
                self.temp_hotkey_ids.push(id);
            }
        }

        info!(
            "resize mode on ({} temporary hotkeys)",
            self.temp_hotkey_ids.len()
        );
        true
    }

    /// Leave the mode and release the temporary keys.
    pub fn exit(&mut self, hotkeys: &mut HotkeyManager) {
        if !self.active {
            return;
        }
        self.active = false;

        for id in self.temp_hotkey_ids.drain(..) {
            hotkeys.unregister(id);
        }
        info!("resize mode off");
    }

    pub fn toggle(&mut self, hotkeys: &mut HotkeyManager) {
        if self.active {
            self.exit(hotkeys);
        } else {
            self.enter(hotkeys);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_registers_temporary_hotkeys() {
        let mut hotkeys = HotkeyManager::new();
        let mut mode = ResizeMode::new();

        assert!(mode.enter(&mut hotkeys));
        assert!(mode.is_active());
        assert_eq!(hotkeys.binding_count(), 6);

        // Entering twice is refused.
        assert!(!mode.enter(&mut hotkeys));
        assert_eq!(hotkeys.binding_count(), 6);
    }

    #[test]
    fn test_exit_releases_everything() {
        let mut hotkeys = HotkeyManager::new();
        let mut mode = ResizeMode::new();

        mode.enter(&mut hotkeys);
        mode.exit(&mut hotkeys);
        assert!(!mode.is_active());
        assert_eq!(hotkeys.binding_count(), 0);

        // Exiting while inactive is harmless.
        mode.exit(&mut hotkeys);
    }

    #[test]
    fn test_toggle() {
        let mut hotkeys = HotkeyManager::new();
        let mut mode = ResizeMode::new();

        mode.toggle(&mut hotkeys);
        assert!(mode.is_active());
        mode.toggle(&mut hotkeys);
        assert!(!mode.is_active());
        assert_eq!(hotkeys.binding_count(), 0);
    }

    #[test]
    fn test_temporary_bindings_do_not_disturb_existing_ones() {
        let mut hotkeys = HotkeyManager::new();
        let permanent = hotkeys
            .register_combo("alt+1", Command::SwitchWorkspace(1))
            .unwrap();

        let mut mode = ResizeMode::new();
        mode.enter(&mut hotkeys);
        mode.exit(&mut hotkeys);

        assert_eq!(
            hotkeys.command_for(permanent),
            Some(&Command::SwitchWorkspace(1))
        );
    }
}
