//! The manageability filter.
//!
//! Decides which top-level windows the WM tracks and tiles versus windows
//! that must be ignored (taskbar, desktop, input overlays, cloaked UWP
//! frames, tool windows, ...). These rules are the single source of truth:
//! a handle is managed iff it passes [`is_manageable`].

use crate::window_manager::window::{Window, WindowId};

#[cfg(target_os = "windows")]
use windows::Win32::UI::WindowsAndMessaging::{
    GetDesktopWindow, GetShellWindow, WS_EX_APPWINDOW, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
};

/// Window classes that belong to the shell or to system UI.
#[cfg(target_os = "windows")]
const IGNORED_CLASSES: &[&str] = &[
    "shell_traywnd",
    "shell_secondarytraywnd",
    "progman",
    "workerw",
    "multitaskingviewframe",
    "foregroundstaging",
    "windows.ui.core.corewindow",
    "xamlexplorerhostislandwindow",
    "tooltips_class32",
    "imewnd",
    "msctls_statusbar32",
];

/// Processes whose windows are system surfaces, not applications.
#[cfg(target_os = "windows")]
const IGNORED_PROCESSES: &[&str] = &[
    "searchapp.exe",
    "searchhost.exe",
    "searchui.exe",
    "startmenuexperiencehost.exe",
    "shellexperiencehost.exe",
    "lockapp.exe",
    "gamebar.exe",
    "gamebarftserver.exe",
    "textinputhost.exe",
];

/// Titles of helper windows that slip through the class checks.
#[cfg(target_os = "windows")]
const IGNORED_TITLES: &[&str] = &[
    "program manager",
    "windows input experience",
    "default ime",
    "msctfime ui",
    "gdi+ window",
];

/// Apply the full filter pipeline to a window.
///
/// The checks run cheapest-first; the order is otherwise not significant.
#[cfg(target_os = "windows")]
pub fn is_manageable(window: &Window) -> bool {
    if !window.is_valid() {
        return false;
    }
    if !window.is_visible() {
        return false;
    }
    if window.is_cloaked() {
        return false;
    }
    if window.is_child() {
        return false;
    }

    unsafe {
        let hwnd = window.id().hwnd();
        if hwnd == GetShellWindow() || hwnd == GetDesktopWindow() {
            return false;
        }
    }

    let ex_style = window.ex_style();
    let is_app_window = ex_style & WS_EX_APPWINDOW.0 as isize != 0;
    // Tool windows stay unmanaged unless they explicitly opt in as app
    // windows; no-activate windows cannot take focus and never tile well.
    if ex_style & WS_EX_TOOLWINDOW.0 as isize != 0 && !is_app_window {
        return false;
    }
    if ex_style & WS_EX_NOACTIVATE.0 as isize != 0 {
        return false;
    }

    match window.rect() {
        Some(rect) if rect.w > 0 && rect.h > 0 => {}
        _ => return false,
    }

    let class = window.class_name().to_lowercase();
    if IGNORED_CLASSES.iter().any(|c| class.contains(c)) {
        return false;
    }

    let process = window.process_name().to_lowercase();
    if IGNORED_PROCESSES.iter().any(|p| process == *p) {
        return false;
    }

    let title = window.title().to_lowercase();
    if IGNORED_TITLES.iter().any(|t| title.contains(t)) {
        return false;
    }

    true
}

#[cfg(not(target_os = "windows"))]
pub fn is_manageable(_window: &Window) -> bool {
    false
}

/// Enumerate every top-level handle that passes the filter.
pub fn enumerate_manageable() -> Vec<WindowId> {
    crate::utils::win32::enumerate_top_level()
        .into_iter()
        .filter(|id| is_manageable(&Window::new(*id)))
        .collect()
}
