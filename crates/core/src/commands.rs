//! The command vocabulary.
//!
//! Every operation a keybinding can trigger is a [`Command`] variant. The
//! config file refers to commands by name ("switch_workspace_3",
//! "close_window"); [`Command::parse`] is the single place that resolves
//! those names. An unknown name is a configuration mistake, never a fatal
//! error: the caller logs it and skips the binding.

use crate::window_manager::directional::Direction;

/// One arrow press inside resize mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStep {
    /// Grow the master area
    Wider,
    /// Shrink the master area
    Narrower,
    /// Shrink the gap, giving windows more room
    Taller,
    /// Grow the gap
    Shorter,
}

/// Everything the hotkey layer can ask the manager to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SwitchWorkspace(usize),
    MoveToWorkspace(usize),

    Focus(Direction),
    MoveWindow(Direction),

    CloseWindow,
    MinimizeWindow,
    MaximizeWindow,
    RestoreWindow,

    SwapMaster,
    RotateNext,
    RotatePrev,

    NextLayout,
    PrevLayout,
    GrowMaster,
    ShrinkMaster,
    IncreaseGap,
    DecreaseGap,

    EnterResizeMode,
    ExitResizeMode,
    ToggleResizeMode,
    Resize(ResizeStep),

    MoveToNextMonitor,
    Spawn(String),

    Retile,
    RetileAll,
    Quit,
}

impl Command {
    /// Resolve a config-file command name (plus optional arguments) to a
    /// command. Returns `None` for unknown names or malformed arguments.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::commands::Command;
    ///
    /// assert_eq!(
    ///     Command::parse("switch_workspace_3", &[]),
    ///     Some(Command::SwitchWorkspace(3))
    /// );
    /// assert_eq!(
    ///     Command::parse("spawn", &["wt.exe".to_string()]),
    ///     Some(Command::Spawn("wt.exe".to_string()))
    /// );
    /// assert_eq!(Command::parse("do_a_barrel_roll", &[]), None);
    /// ```
    pub fn parse(name: &str, args: &[String]) -> Option<Command> {
        // Numbered forms first: "switch_workspace_4", "move_to_workspace_2".
        if let Some(n) = name.strip_prefix("switch_workspace_") {
            return n.parse().ok().map(Command::SwitchWorkspace);
        }
        if let Some(n) = name.strip_prefix("move_to_workspace_") {
            return n.parse().ok().map(Command::MoveToWorkspace);
        }

        let command = match name {
            "switch_workspace" => Command::SwitchWorkspace(args.first()?.parse().ok()?),
            "move_to_workspace" => Command::MoveToWorkspace(args.first()?.parse().ok()?),

            "focus_left" => Command::Focus(Direction::Left),
            "focus_right" => Command::Focus(Direction::Right),
            "focus_up" => Command::Focus(Direction::Up),
            "focus_down" => Command::Focus(Direction::Down),

            "move_window_left" => Command::MoveWindow(Direction::Left),
            "move_window_right" => Command::MoveWindow(Direction::Right),
            "move_window_up" => Command::MoveWindow(Direction::Up),
            "move_window_down" => Command::MoveWindow(Direction::Down),

            "close_window" => Command::CloseWindow,
            "minimize_window" => Command::MinimizeWindow,
            "maximize_window" => Command::MaximizeWindow,
            "restore_window" => Command::RestoreWindow,

            "swap_master" => Command::SwapMaster,
            "rotate_next" => Command::RotateNext,
            "rotate_prev" => Command::RotatePrev,

            "next_layout" => Command::NextLayout,
            "prev_layout" => Command::PrevLayout,
            "grow_master" => Command::GrowMaster,
            "shrink_master" => Command::ShrinkMaster,
            "increase_gap" => Command::IncreaseGap,
            "decrease_gap" => Command::DecreaseGap,

            "enter_resize_mode" => Command::EnterResizeMode,
            "exit_resize_mode" => Command::ExitResizeMode,
            "resize_mode" => Command::ToggleResizeMode,

            "move_to_next_monitor" => Command::MoveToNextMonitor,

            "spawn" => {
                if args.is_empty() {
                    return None;
                }
                Command::Spawn(args.join(" "))
            }

            "retile" => Command::Retile,
            "retile_all" => Command::RetileAll,
            "quit" | "quit_wm" => Command::Quit,

            _ => return None,
        };

        Some(command)
    }
}

/// The display form is the config-file name, so a command can be logged
/// and parsed back.
///
/// # Example
///
/// ```
/// use tatami_core::commands::Command;
///
/// let command = Command::SwitchWorkspace(5);
/// assert_eq!(command.to_string(), "switch_workspace_5");
/// assert_eq!(Command::parse(&command.to_string(), &[]), Some(command));
/// ```
impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SwitchWorkspace(n) => write!(f, "switch_workspace_{n}"),
            Command::MoveToWorkspace(n) => write!(f, "move_to_workspace_{n}"),
            Command::Focus(d) => write!(f, "focus_{}", d.name()),
            Command::MoveWindow(d) => write!(f, "move_window_{}", d.name()),
            Command::CloseWindow => write!(f, "close_window"),
            Command::MinimizeWindow => write!(f, "minimize_window"),
            Command::MaximizeWindow => write!(f, "maximize_window"),
            Command::RestoreWindow => write!(f, "restore_window"),
            Command::SwapMaster => write!(f, "swap_master"),
            Command::RotateNext => write!(f, "rotate_next"),
            Command::RotatePrev => write!(f, "rotate_prev"),
            Command::NextLayout => write!(f, "next_layout"),
            Command::PrevLayout => write!(f, "prev_layout"),
            Command::GrowMaster => write!(f, "grow_master"),
            Command::ShrinkMaster => write!(f, "shrink_master"),
            Command::IncreaseGap => write!(f, "increase_gap"),
            Command::DecreaseGap => write!(f, "decrease_gap"),
            Command::EnterResizeMode => write!(f, "enter_resize_mode"),
            Command::ExitResizeMode => write!(f, "exit_resize_mode"),
            Command::ToggleResizeMode => write!(f, "resize_mode"),
            Command::Resize(step) => write!(f, "resize:{step:?}"),
            Command::MoveToNextMonitor => write!(f, "move_to_next_monitor"),
            Command::Spawn(cmd) => write!(f, "spawn {cmd}"),
            Command::Retile => write!(f, "retile"),
            Command::RetileAll => write!(f, "retile_all"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Option<Command> {
        Command::parse(name, &[])
    }

    #[test]
    fn test_parse_numbered_workspace_commands() {
        assert_eq!(parse("switch_workspace_1"), Some(Command::SwitchWorkspace(1)));
        assert_eq!(parse("switch_workspace_9"), Some(Command::SwitchWorkspace(9)));
        assert_eq!(parse("move_to_workspace_4"), Some(Command::MoveToWorkspace(4)));
        assert_eq!(parse("switch_workspace_x"), None);
    }

    #[test]
    fn test_parse_workspace_commands_with_argument() {
        assert_eq!(
            Command::parse("switch_workspace", &["3".into()]),
            Some(Command::SwitchWorkspace(3))
        );
        assert_eq!(Command::parse("switch_workspace", &[]), None);
    }

    #[test]
    fn test_parse_directional_commands() {
        assert_eq!(parse("focus_left"), Some(Command::Focus(Direction::Left)));
        assert_eq!(
            parse("move_window_down"),
            Some(Command::MoveWindow(Direction::Down))
        );
    }

    #[test]
    fn test_parse_spawn_joins_arguments() {
        assert_eq!(
            Command::parse("spawn", &["wt.exe".into(), "-d".into(), "C:\\".into()]),
            Some(Command::Spawn("wt.exe -d C:\\".into()))
        );
        assert_eq!(Command::parse("spawn", &[]), None);
    }

    #[test]
    fn test_parse_unknown_command_is_none() {
        assert_eq!(parse("explode"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_quit_alias() {
        assert_eq!(parse("quit"), Some(Command::Quit));
        assert_eq!(parse("quit_wm"), Some(Command::Quit));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let commands = [
            Command::SwitchWorkspace(5),
            Command::Focus(Direction::Up),
            Command::CloseWindow,
            Command::NextLayout,
            Command::Quit,
        ];
        for command in commands {
            let name = command.to_string();
            assert_eq!(Command::parse(&name, &[]), Some(command), "{name}");
        }
    }
}
