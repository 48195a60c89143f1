//! Display monitor detection.
//!
//! Each monitor exposes two rectangles: the full area and the work area,
//! which excludes the taskbar and other reserved strips. Layouts tile into
//! the work area; fullscreen windows cover the full area.

use crate::error::InitError;
use crate::window_manager::geometry::Rect;

#[cfg(target_os = "windows")]
use windows::Win32::{
    Foundation::{BOOL, LPARAM, RECT},
    Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
        MONITORINFOF_PRIMARY,
    },
};

/// A connected display monitor.
#[derive(Debug, Clone)]
pub struct Monitor {
    /// Device name, e.g. `\\.\DISPLAY1`
    pub name: String,
    /// Full monitor rectangle, including reserved strips
    pub full_rect: Rect,
    /// Usable rectangle, excluding the taskbar
    pub work_rect: Rect,
    pub is_primary: bool,
}

impl Monitor {
    pub fn new(name: impl Into<String>, full_rect: Rect, work_rect: Rect, is_primary: bool) -> Self {
        Monitor {
            name: name.into(),
            full_rect,
            work_rect,
            is_primary,
        }
    }
}

/// Enumerate connected monitors, sorted left-to-right then top-to-bottom so
/// monitor indices are stable across runs.
///
/// # Errors
///
/// [`InitError::NoMonitors`] if the OS reports no displays; the manager
/// cannot start without at least one.
#[cfg(target_os = "windows")]
pub fn detect_monitors() -> Result<Vec<Monitor>, InitError> {
    let mut monitors: Vec<Monitor> = Vec::new();

    unsafe {
        // The callback runs synchronously within this call, so the pointer
        // to our Vec stays valid for the whole enumeration.
        let _ = EnumDisplayMonitors(
            HDC(0),
            None,
            Some(enum_monitors_callback),
            LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
        );
    }

    if monitors.is_empty() {
        return Err(InitError::NoMonitors);
    }

    monitors.sort_by_key(|m| (m.full_rect.x, m.full_rect.y));
    Ok(monitors)
}

#[cfg(not(target_os = "windows"))]
pub fn detect_monitors() -> Result<Vec<Monitor>, InitError> {
    let full = Rect::new(0, 0, 1920, 1080);
    let work = Rect::new(0, 0, 1920, 1040);
    Ok(vec![Monitor::new("DISPLAY1", full, work, true)])
}

#[cfg(target_os = "windows")]
unsafe extern "system" fn enum_monitors_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<Monitor>);
    if let Some(monitor) = query_monitor(hmonitor) {
        monitors.push(monitor);
    }
    true.into()
}

#[cfg(target_os = "windows")]
fn query_monitor(hmonitor: HMONITOR) -> Option<Monitor> {
    let mut info = MONITORINFOEXW {
        monitorInfo: MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFOEXW>() as u32,
            ..Default::default()
        },
        ..Default::default()
    };

    unsafe {
        if !GetMonitorInfoW(hmonitor, &mut info.monitorInfo as *mut _ as *mut _).as_bool() {
            return None;
        }
    }

    let full_rect = rect_from_win32(&info.monitorInfo.rcMonitor);
    let work_rect = rect_from_win32(&info.monitorInfo.rcWork);
    let name = String::from_utf16_lossy(&info.szDevice)
        .trim_end_matches('\0')
        .to_string();
    let is_primary = info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0;

    Some(Monitor::new(name, full_rect, work_rect, is_primary))
}

#[cfg(target_os = "windows")]
fn rect_from_win32(rect: &RECT) -> Rect {
    Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)
}
