//! Process-wide Win32 primitives.
//!
//! Per-window calls live on [`Window`](crate::window_manager::Window); this
//! module wraps the handful of global primitives the engine needs:
//! top-level enumeration, the foreground query, and the COM apartment that
//! the compositor probes require.

use crate::error::InitError;
use crate::window_manager::window::WindowId;

#[cfg(target_os = "windows")]
use windows::Win32::{
    Foundation::{BOOL, HWND, LPARAM},
    System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED},
    UI::WindowsAndMessaging::{EnumWindows, GetForegroundWindow},
};

/// Enumerate every top-level window handle in the system, unfiltered.
#[cfg(target_os = "windows")]
pub fn enumerate_top_level() -> Vec<WindowId> {
    let mut ids: Vec<WindowId> = Vec::new();

    unsafe {
        // The callback runs synchronously inside EnumWindows, so the
        // pointer to our Vec outlives every invocation.
        let _ = EnumWindows(
            Some(enum_windows_callback),
            LPARAM(&mut ids as *mut Vec<WindowId> as isize),
        );
    }

    ids
}

#[cfg(not(target_os = "windows"))]
pub fn enumerate_top_level() -> Vec<WindowId> {
    Vec::new()
}

#[cfg(target_os = "windows")]
unsafe extern "system" fn enum_windows_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let ids = &mut *(lparam.0 as *mut Vec<WindowId>);
    ids.push(WindowId(hwnd.0));
    true.into()
}

/// The current foreground window, if any.
#[cfg(target_os = "windows")]
pub fn foreground_window() -> Option<WindowId> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.0 != 0 {
        Some(WindowId(hwnd.0))
    } else {
        None
    }
}

#[cfg(not(target_os = "windows"))]
pub fn foreground_window() -> Option<WindowId> {
    None
}

/// Scoped per-thread COM initialization. The DWM attribute probes used by
/// the window filter want an initialized apartment on the calling thread;
/// the guard uninitializes it when the event loop winds down.
pub struct ComGuard {
    #[cfg(target_os = "windows")]
    initialized: bool,
}

impl ComGuard {
    #[cfg(target_os = "windows")]
    pub fn initialize() -> Result<Self, InitError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_ok() {
            Ok(ComGuard { initialized: true })
        } else {
            Err(InitError::Com(format!("{hr:?}")))
        }
    }

    #[cfg(not(target_os = "windows"))]
    pub fn initialize() -> Result<Self, InitError> {
        Ok(ComGuard {})
    }
}

#[cfg(target_os = "windows")]
impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}
