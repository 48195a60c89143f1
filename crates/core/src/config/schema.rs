//! Configuration schema.
//!
//! Everything is optional in the TOML file; missing sections fall back to
//! the defaults below, and a missing `[[keybinds]]` table gets the full
//! default binding set, so an empty file yields a fully working setup.

use serde::{Deserialize, Serialize};

use crate::window_manager::layout::{DEFAULT_GAP, DEFAULT_MASTER_RATIO};
use crate::workspace::DEFAULT_WORKSPACE_COUNT;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Hotkey table: combo string -> command name (+ args).
    #[serde(default = "default_keybinds")]
    pub keybinds: Vec<Keybind>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            general: GeneralConfig::default(),
            keybinds: default_keybinds(),
        }
    }
}

/// General engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// How many workspaces to create at startup
    #[serde(default = "default_workspace_count")]
    pub workspace_count: usize,

    /// Initial master area ratio for every layout
    #[serde(default = "default_master_ratio")]
    pub master_ratio: f32,

    /// Initial gap between windows, in pixels
    #[serde(default = "default_gap")]
    pub gap: i32,
}

fn default_workspace_count() -> usize {
    DEFAULT_WORKSPACE_COUNT
}

fn default_master_ratio() -> f32 {
    DEFAULT_MASTER_RATIO
}

fn default_gap() -> i32 {
    DEFAULT_GAP
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            workspace_count: default_workspace_count(),
            master_ratio: default_master_ratio(),
            gap: default_gap(),
        }
    }
}

/// One hotkey binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keybind {
    /// e.g. `"alt+shift+4"`
    pub combo: String,
    /// Command name, resolved by `Command::parse`
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Keybind {
    fn new(combo: &str, command: &str) -> Self {
        Keybind {
            combo: combo.to_string(),
            command: command.to_string(),
            args: Vec::new(),
        }
    }

    fn with_args(combo: &str, command: &str, args: &[&str]) -> Self {
        Keybind {
            combo: combo.to_string(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// The built-in binding set, dwm-flavored on the Alt modifier.
pub fn default_keybinds() -> Vec<Keybind> {
    let mut binds = Vec::new();

    // alt+N switches, alt+shift+N moves the focused window.
    for n in 1..=9 {
        binds.push(Keybind::new(
            &format!("alt+{n}"),
            &format!("switch_workspace_{n}"),
        ));
        binds.push(Keybind::new(
            &format!("alt+shift+{n}"),
            &format!("move_to_workspace_{n}"),
        ));
    }

    binds.extend([
        Keybind::new("alt+left", "focus_left"),
        Keybind::new("alt+right", "focus_right"),
        Keybind::new("alt+up", "focus_up"),
        Keybind::new("alt+down", "focus_down"),
        Keybind::new("alt+shift+left", "move_window_left"),
        Keybind::new("alt+shift+right", "move_window_right"),
        Keybind::new("alt+shift+up", "move_window_up"),
        Keybind::new("alt+shift+down", "move_window_down"),
        Keybind::new("alt+enter", "swap_master"),
        Keybind::new("alt+space", "next_layout"),
        Keybind::new("alt+shift+space", "prev_layout"),
        Keybind::new("alt+bracketright", "rotate_next"),
        Keybind::new("alt+bracketleft", "rotate_prev"),
        Keybind::new("alt+equals", "grow_master"),
        Keybind::new("alt+minus", "shrink_master"),
        Keybind::new("alt+shift+equals", "increase_gap"),
        Keybind::new("alt+shift+minus", "decrease_gap"),
        Keybind::new("alt+r", "resize_mode"),
        Keybind::new("alt+shift+q", "close_window"),
        Keybind::new("alt+shift+m", "move_to_next_monitor"),
        Keybind::with_args("alt+shift+enter", "spawn", &["wt.exe"]),
        Keybind::new("alt+shift+t", "retile_all"),
        Keybind::new("alt+shift+e", "quit"),
    ]);

    binds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.workspace_count, 9);
        assert!((config.general.master_ratio - 0.55).abs() < f32::EPSILON);
        assert_eq!(config.general.gap, 4);
        assert!(!config.keybinds.is_empty());
    }

    #[test]
    fn test_empty_toml_gets_full_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.workspace_count, 9);
        assert_eq!(config.keybinds.len(), default_keybinds().len());
    }

    #[test]
    fn test_partial_general_section() {
        let config: Config = toml::from_str("[general]\nworkspace_count = 4\n").unwrap();
        assert_eq!(config.general.workspace_count, 4);
        assert_eq!(config.general.gap, 4);
    }

    #[test]
    fn test_explicit_keybinds_replace_defaults() {
        let toml = r#"
            [[keybinds]]
            combo = "win+1"
            command = "switch_workspace_1"

            [[keybinds]]
            combo = "win+x"
            command = "spawn"
            args = ["wt.exe", "-d", "."]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.keybinds.len(), 2);
        assert_eq!(config.keybinds[1].args, vec!["wt.exe", "-d", "."]);
    }

    #[test]
    fn test_default_keybinds_cover_workspaces() {
        let binds = default_keybinds();
        for n in 1..=9 {
            assert!(binds
                .iter()
                .any(|b| b.command == format!("switch_workspace_{n}")));
            assert!(binds
                .iter()
                .any(|b| b.command == format!("move_to_workspace_{n}")));
        }
    }
}
