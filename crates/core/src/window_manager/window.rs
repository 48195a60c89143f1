//! Managed window identity and operations.
//!
//! A [`WindowId`] is the opaque handle the OS uses for a top-level window;
//! equality and hashing are on that value alone. A [`Window`] wraps the id
//! and re-reads every display attribute from the OS on access, so the data
//! is never stale. The only state a `Window` carries is the WM-fullscreen
//! record: the style bits and rectangle saved when the manager put the
//! window into borderless fullscreen.
//!
//! Every operation is fail-soft: a handle can be destroyed by the OS at any
//! moment, so methods report success with a `bool` and never panic on a
//! window that disappeared mid-call.

use crate::window_manager::geometry::Rect;

#[cfg(target_os = "windows")]
use windows::Win32::{
    Foundation::{HWND, LPARAM, RECT, WPARAM},
    Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED},
    System::Threading::{
        OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_FORMAT,
        PROCESS_QUERY_LIMITED_INFORMATION,
    },
    UI::WindowsAndMessaging::{
        GetClassNameW, GetWindow, GetWindowLongPtrW, GetWindowRect, GetWindowTextLengthW,
        GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, IsZoomed,
        PostMessageW, SetForegroundWindow, SetWindowLongPtrW, SetWindowPos, ShowWindow,
        GWL_EXSTYLE, GWL_STYLE, GW_OWNER, HWND_BOTTOM, HWND_TOP, SHOW_WINDOW_CMD,
        SWP_FRAMECHANGED, SWP_HIDEWINDOW, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
        SWP_SHOWWINDOW, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, WM_CLOSE,
        WS_CAPTION, WS_CHILD, WS_EX_CLIENTEDGE, WS_EX_DLGMODALFRAME, WS_EX_STATICEDGE,
        WS_EX_WINDOWEDGE, WS_THICKFRAME, WS_VISIBLE,
    },
};

/// Where hidden windows are parked, far outside any plausible desktop.
pub const OFFSCREEN_X: i32 = -32000;
/// See [`OFFSCREEN_X`].
pub const OFFSCREEN_Y: i32 = -32000;

/// Edge tolerance, in pixels, when deciding whether a window natively covers
/// a whole monitor.
#[cfg(target_os = "windows")]
const FULLSCREEN_EDGE_TOLERANCE: i32 = 5;

/// Opaque OS identity of a top-level window.
///
/// Equality and hashing are on the handle value alone, so ids can be kept
/// in plain collections and compared across containers.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use tatami_core::window_manager::WindowId;
///
/// let id = WindowId(0x1234);
/// assert_eq!(id, WindowId(0x1234));
///
/// let mut seen = HashSet::new();
/// seen.insert(id);
/// assert!(seen.contains(&WindowId(0x1234)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub isize);

impl WindowId {
    /// The raw handle value.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::WindowId;
    ///
    /// assert_eq!(WindowId(42).raw(), 42);
    /// ```
    pub fn raw(self) -> isize {
        self.0
    }

    #[cfg(target_os = "windows")]
    pub(crate) fn hwnd(self) -> HWND {
        HWND(self.0)
    }
}

/// Ids render as fixed-width hex, the way handles appear in debuggers.
///
/// # Example
///
/// ```
/// use tatami_core::window_manager::WindowId;
///
/// assert_eq!(WindowId(0xab).to_string(), "0x000000ab");
/// ```
impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Styles and geometry saved when the WM puts a window into fullscreen,
/// restored verbatim on exit.
#[derive(Debug, Clone, Copy)]
struct FullscreenState {
    style: isize,
    ex_style: isize,
    rect: Rect,
}

/// A live handle to a top-level window.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    fullscreen: Option<FullscreenState>,
}

impl Window {
    /// Wrap a handle. Nothing is read from the OS until a descriptor or an
    /// action is called.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Window, WindowId};
    ///
    /// let window = Window::new(WindowId(0x1234));
    /// assert_eq!(window.id(), WindowId(0x1234));
    /// assert!(!window.is_fullscreen());
    /// ```
    pub fn new(id: WindowId) -> Self {
        Window {
            id,
            fullscreen: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// True while this window is in WM-initiated fullscreen (including the
    /// suspended state used on hidden workspaces).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tatami_core::window_manager::{Rect, Window, WindowId};
    ///
    /// let mut window = Window::new(WindowId(0x1234));
    /// window.enter_fullscreen(Rect::new(0, 0, 1920, 1080));
    /// assert!(window.is_fullscreen());
    /// window.exit_fullscreen();
    /// assert!(!window.is_fullscreen());
    /// ```
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    /// Record the current styles and rectangle as the fullscreen baseline
    /// without touching the OS. Used when adopting a window that is already
    /// borderless.
    ///
    /// # Example
    ///
    /// ```
    /// use tatami_core::window_manager::{Window, WindowId};
    ///
    /// let mut window = Window::new(WindowId(0x1234));
    /// window.mark_as_fullscreen();
    /// assert!(window.is_fullscreen());
    /// ```
    pub fn mark_as_fullscreen(&mut self) {
        if self.fullscreen.is_none() {
            self.fullscreen = Some(FullscreenState {
                style: self.style(),
                ex_style: self.ex_style(),
                rect: self.rect().unwrap_or_default(),
            });
        }
    }
}

#[cfg(target_os = "windows")]
impl Window {
    pub fn is_valid(&self) -> bool {
        unsafe { IsWindow(self.id.hwnd()).as_bool() }
    }

    pub fn title(&self) -> String {
        unsafe {
            let length = GetWindowTextLengthW(self.id.hwnd());
            if length == 0 {
                return String::new();
            }
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.id.hwnd(), &mut buffer);
            if copied > 0 {
                String::from_utf16_lossy(&buffer[..copied as usize])
            } else {
                String::new()
            }
        }
    }

    pub fn class_name(&self) -> String {
        unsafe {
            let mut buffer = [0u16; 256];
            let copied = GetClassNameW(self.id.hwnd(), &mut buffer);
            if copied > 0 {
                String::from_utf16_lossy(&buffer[..copied as usize])
            } else {
                String::new()
            }
        }
    }

    /// Image name of the owning process (e.g. `"firefox.exe"`), or an empty
    /// string if the process cannot be queried.
    pub fn process_name(&self) -> String {
        unsafe {
            let mut process_id = 0u32;
            GetWindowThreadProcessId(self.id.hwnd(), Some(&mut process_id));
            if process_id == 0 {
                return String::new();
            }

            let Ok(handle) = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, process_id)
            else {
                return String::new();
            };

            let mut buffer = vec![0u16; 260];
            let mut size = buffer.len() as u32;
            let result = QueryFullProcessImageNameW(
                handle,
                PROCESS_NAME_FORMAT(0),
                windows::core::PWSTR(buffer.as_mut_ptr()),
                &mut size,
            );
            let _ = windows::Win32::Foundation::CloseHandle(handle);

            if result.is_err() {
                return String::new();
            }
            let path = String::from_utf16_lossy(&buffer[..size as usize]);
            path.rsplit('\\').next().unwrap_or(&path).to_string()
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        unsafe {
            let mut rect = RECT::default();
            GetWindowRect(self.id.hwnd(), &mut rect).ok()?;
            Some(Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom))
        }
    }

    pub fn style(&self) -> isize {
        unsafe { GetWindowLongPtrW(self.id.hwnd(), GWL_STYLE) }
    }

    pub fn ex_style(&self) -> isize {
        unsafe { GetWindowLongPtrW(self.id.hwnd(), GWL_EXSTYLE) }
    }

    pub fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.id.hwnd()).as_bool() }
    }

    pub fn is_minimized(&self) -> bool {
        unsafe { IsIconic(self.id.hwnd()).as_bool() }
    }

    pub fn is_maximized(&self) -> bool {
        unsafe { IsZoomed(self.id.hwnd()).as_bool() }
    }

    pub fn is_child(&self) -> bool {
        self.style() & WS_CHILD.0 as isize != 0
    }

    pub fn has_owner(&self) -> bool {
        unsafe { GetWindow(self.id.hwnd(), GW_OWNER).0 != 0 }
    }

    /// Whether the compositor has cloaked this window (common for background
    /// UWP frames that report themselves as visible).
    pub fn is_cloaked(&self) -> bool {
        unsafe {
            let mut cloaked = 0u32;
            DwmGetWindowAttribute(
                self.id.hwnd(),
                DWMWA_CLOAKED,
                &mut cloaked as *mut u32 as *mut std::ffi::c_void,
                std::mem::size_of::<u32>() as u32,
            )
            .map(|_| cloaked != 0)
            .unwrap_or(false)
        }
    }

    fn show(&self, cmd: SHOW_WINDOW_CMD) -> bool {
        unsafe {
            let _ = ShowWindow(self.id.hwnd(), cmd);
        }
        self.is_valid()
    }

    /// Restore if minimized, then bring to the foreground.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tatami_core::utils::win32::foreground_window;
    /// use tatami_core::window_manager::Window;
    ///
    /// if let Some(id) = foreground_window() {
    ///     let window = Window::new(id);
    ///     assert!(window.focus());
    /// }
    /// ```
    pub fn focus(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        if self.is_minimized() {
            self.show(SW_RESTORE);
        }
        unsafe { SetForegroundWindow(self.id.hwnd()).as_bool() }
    }

    pub fn minimize(&self) -> bool {
        self.show(SW_MINIMIZE)
    }

    pub fn maximize(&self) -> bool {
        self.show(SW_MAXIMIZE)
    }

    pub fn restore(&self) -> bool {
        self.show(SW_RESTORE)
    }

    /// Request a graceful close. Asynchronous: the target decides when (and
    /// whether) to honor it.
    pub fn close(&self) -> bool {
        unsafe { PostMessageW(self.id.hwnd(), WM_CLOSE, WPARAM(0), LPARAM(0)).is_ok() }
    }

    /// Absolute placement. Minimized or maximized windows are restored first,
    /// otherwise the OS ignores the new geometry.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tatami_core::window_manager::{Window, WindowId};
    ///
    /// let window = Window::new(WindowId(0x1234));
    /// window.move_resize(0, 0, 960, 540);
    /// assert_eq!(window.rect().map(|r| (r.w, r.h)), Some((960, 540)));
    /// ```
    pub fn move_resize(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        if !self.is_valid() {
            return false;
        }
        if self.is_minimized() || self.is_maximized() {
            self.show(SW_RESTORE);
        }
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                None,
                x,
                y,
                w,
                h,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
            .is_ok()
        }
    }

    /// Park the window off-screen and drop it to the bottom of the Z-order,
    /// keeping its size. This is how inactive workspaces hide windows: a
    /// real hide call would fire events that feed back into the managed set,
    /// and is unreliable for borderless windows.
    pub fn park_offscreen(&self) -> bool {
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                HWND_BOTTOM,
                OFFSCREEN_X,
                OFFSCREEN_Y,
                0,
                0,
                SWP_NOSIZE | SWP_NOACTIVATE,
            )
            .is_ok()
        }
    }

    /// Put the window back at a previously saved position, on top but
    /// without stealing focus.
    pub fn restore_position(&self, rect: Rect) -> bool {
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                HWND_TOP,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                SWP_NOACTIVATE,
            )
            .is_ok()
        }
    }

    /// Raise to the top of the Z-order without moving or activating.
    pub fn raise_no_activate(&self) -> bool {
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                HWND_TOP,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
            .is_ok()
        }
    }

    /// Save the current styles and rectangle, strip the decorations and
    /// cover `mon_rect`. No-op if the window is already WM-fullscreen.
    pub fn enter_fullscreen(&mut self, mon_rect: Rect) -> bool {
        if self.fullscreen.is_some() || !self.is_valid() {
            return false;
        }

        let style = self.style();
        let ex_style = self.ex_style();
        let Some(rect) = self.rect() else {
            return false;
        };
        self.fullscreen = Some(FullscreenState {
            style,
            ex_style,
            rect,
        });

        if self.is_minimized() || self.is_maximized() {
            self.show(SW_RESTORE);
        }

        self.apply_stripped_styles();
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                HWND_TOP,
                mon_rect.x,
                mon_rect.y,
                mon_rect.w,
                mon_rect.h,
                SWP_FRAMECHANGED | SWP_SHOWWINDOW,
            )
            .is_ok()
        }
    }

    /// Restore the styles and rectangle saved by
    /// [`enter_fullscreen`](Self::enter_fullscreen), bit-exact.
    pub fn exit_fullscreen(&mut self) -> bool {
        if !self.is_valid() {
            return false;
        }
        let Some(saved) = self.fullscreen.take() else {
            return false;
        };

        unsafe {
            SetWindowLongPtrW(self.id.hwnd(), GWL_STYLE, saved.style);
            SetWindowLongPtrW(self.id.hwnd(), GWL_EXSTYLE, saved.ex_style);
            SetWindowPos(
                self.id.hwnd(),
                HWND_TOP,
                saved.rect.x,
                saved.rect.y,
                saved.rect.w,
                saved.rect.h,
                SWP_FRAMECHANGED | SWP_SHOWWINDOW,
            )
            .is_ok()
        }
    }

    /// Take a fullscreen window off screen while its workspace is hidden.
    /// The fullscreen record stays, so a later
    /// [`reapply_fullscreen`](Self::reapply_fullscreen) can bring it back.
    pub fn suspend_fullscreen(&mut self) -> bool {
        if self.fullscreen.is_none() || !self.is_valid() {
            return false;
        }

        unsafe {
            let style = GetWindowLongPtrW(self.id.hwnd(), GWL_STYLE);
            SetWindowLongPtrW(self.id.hwnd(), GWL_STYLE, style & !(WS_VISIBLE.0 as isize));
            SetWindowPos(
                self.id.hwnd(),
                None,
                OFFSCREEN_X,
                OFFSCREEN_Y,
                1,
                1,
                SWP_HIDEWINDOW | SWP_NOACTIVATE | SWP_NOZORDER,
            )
            .is_ok()
        }
    }

    /// Re-cover the monitor after a suspend. Decorations are stripped again
    /// in case the suspend round-trip altered the styles.
    pub fn reapply_fullscreen(&mut self, mon_rect: Rect) -> bool {
        if self.fullscreen.is_none() || !self.is_valid() {
            return false;
        }

        self.apply_stripped_styles();
        unsafe {
            SetWindowPos(
                self.id.hwnd(),
                HWND_TOP,
                mon_rect.x,
                mon_rect.y,
                mon_rect.w,
                mon_rect.h,
                SWP_SHOWWINDOW | SWP_FRAMECHANGED,
            )
            .is_ok()
        }
    }

    /// Detect a window that is already fullscreen on its own (exclusive
    /// fullscreen games, borderless players): no caption, no sizing frame,
    /// and a rectangle covering `mon_rect` within a few pixels.
    pub fn is_native_fullscreen(&self, mon_rect: Rect) -> bool {
        if !self.is_valid() {
            return false;
        }
        let style = self.style();
        if style & WS_CAPTION.0 as isize != 0 || style & WS_THICKFRAME.0 as isize != 0 {
            return false;
        }
        let Some(rect) = self.rect() else {
            return false;
        };

        let t = FULLSCREEN_EDGE_TOLERANCE;
        (rect.left() - mon_rect.left()).abs() <= t
            && (rect.top() - mon_rect.top()).abs() <= t
            && (rect.right() - mon_rect.right()).abs() <= t
            && (rect.bottom() - mon_rect.bottom()).abs() <= t
    }

    fn apply_stripped_styles(&self) {
        unsafe {
            let style = GetWindowLongPtrW(self.id.hwnd(), GWL_STYLE);
            let stripped = style & !((WS_CAPTION.0 | WS_THICKFRAME.0) as isize);
            SetWindowLongPtrW(self.id.hwnd(), GWL_STYLE, stripped);

            let ex_style = GetWindowLongPtrW(self.id.hwnd(), GWL_EXSTYLE);
            let ex_stripped = ex_style
                & !((WS_EX_DLGMODALFRAME.0
                    | WS_EX_WINDOWEDGE.0
                    | WS_EX_CLIENTEDGE.0
                    | WS_EX_STATICEDGE.0) as isize);
            SetWindowLongPtrW(self.id.hwnd(), GWL_EXSTYLE, ex_stripped);
        }
    }
}

// Non-Windows builds treat every handle as live and every OS mutation as a
// successful no-op, so the bookkeeping layers above stay exercised.
#[cfg(not(target_os = "windows"))]
impl Window {
    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn title(&self) -> String {
        String::new()
    }

    pub fn class_name(&self) -> String {
        String::new()
    }

    pub fn process_name(&self) -> String {
        String::new()
    }

    pub fn rect(&self) -> Option<Rect> {
        None
    }

    pub fn style(&self) -> isize {
        0
    }

    pub fn ex_style(&self) -> isize {
        0
    }

    pub fn is_visible(&self) -> bool {
        true
    }

    pub fn is_minimized(&self) -> bool {
        false
    }

    pub fn is_maximized(&self) -> bool {
        false
    }

    pub fn is_child(&self) -> bool {
        false
    }

    pub fn has_owner(&self) -> bool {
        false
    }

    pub fn is_cloaked(&self) -> bool {
        false
    }

    pub fn focus(&self) -> bool {
        true
    }

    pub fn minimize(&self) -> bool {
        true
    }

    pub fn maximize(&self) -> bool {
        true
    }

    pub fn restore(&self) -> bool {
        true
    }

    pub fn close(&self) -> bool {
        true
    }

    pub fn move_resize(&self, _x: i32, _y: i32, _w: i32, _h: i32) -> bool {
        true
    }

    pub fn park_offscreen(&self) -> bool {
        true
    }

    pub fn restore_position(&self, _rect: Rect) -> bool {
        true
    }

    pub fn raise_no_activate(&self) -> bool {
        true
    }

    pub fn enter_fullscreen(&mut self, _mon_rect: Rect) -> bool {
        if self.fullscreen.is_some() {
            return false;
        }
        self.fullscreen = Some(FullscreenState {
            style: 0,
            ex_style: 0,
            rect: Rect::default(),
        });
        true
    }

    pub fn exit_fullscreen(&mut self) -> bool {
        self.fullscreen.take().is_some()
    }

    pub fn suspend_fullscreen(&mut self) -> bool {
        self.fullscreen.is_some()
    }

    pub fn reapply_fullscreen(&mut self, _mon_rect: Rect) -> bool {
        self.fullscreen.is_some()
    }

    pub fn is_native_fullscreen(&self, _mon_rect: Rect) -> bool {
        false
    }
}
