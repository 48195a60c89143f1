//! Launching external applications from keybindings.
//!
//! Children are fully detached: no inherited console, no inherited stdio,
//! their own process group. A child must survive the WM exiting.

use std::process::{Command, Stdio};

use tracing::{info, warn};

/// Launch a command line. Returns `true` if the process started; failures
/// are logged and swallowed, a broken binding must never take the WM down.
pub fn spawn(command_line: &str) -> bool {
    let args = split_command_line(command_line);
    let Some((program, rest)) = args.split_first() else {
        warn!("spawn: empty command");
        return false;
    };

    let mut command = Command::new(program);
    command
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};
        command.creation_flags(DETACHED_PROCESS.0 | CREATE_NEW_PROCESS_GROUP.0);
    }

    match command.spawn() {
        Ok(child) => {
            info!("spawned '{}' (pid {})", command_line, child.id());
            true
        }
        Err(err) => {
            warn!("failed to spawn '{}': {}", command_line, err);
            false
        }
    }
}

/// Split a command line into arguments, honoring double quotes:
/// `spawn explorer "C:\Program Files"` keeps the quoted path intact.
fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }

    args
}
