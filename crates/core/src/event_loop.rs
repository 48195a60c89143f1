//! The OS event pump.
//!
//! One thread owns the message queue. `SetWinEventHook` with
//! `WINEVENT_OUTOFCONTEXT` delivers window events as callbacks *on that
//! same thread*, during message retrieval, so every mutation of WM state
//! happens on the loop thread and nothing needs a lock. The loop suspends
//! only inside the blocking `GetMessageW`; hotkey messages are intercepted
//! there before normal dispatch.
//!
//! [`stop`] is the single cross-thread entry point: it posts `WM_QUIT` to
//! the loop thread, which makes the next fetch return false and the loop
//! unwind (unhook, unregister hotkeys, release COM).

#[cfg(target_os = "windows")]
mod windows_impl {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tracing::info;
    use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::Accessibility::{SetWinEventHook, UnhookWinEvent, HWINEVENTHOOK};
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, PostThreadMessageW, TranslateMessage, EVENT_OBJECT_DESTROY,
        EVENT_OBJECT_HIDE, EVENT_OBJECT_NAMECHANGE, EVENT_OBJECT_SHOW, EVENT_SYSTEM_FOREGROUND,
        EVENT_SYSTEM_MINIMIZEEND, EVENT_SYSTEM_MINIMIZESTART, EVENT_SYSTEM_MOVESIZEEND, MSG,
        OBJID_WINDOW, WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS, WM_HOTKEY, WM_QUIT,
    };

    use crate::error::InitError;
    use crate::utils::win32::ComGuard;
    use crate::window_manager::{OsEvent, WindowId, WindowManager};

    /// Thread id of the running loop, for the cross-thread wake. Zero when
    /// no loop is active.
    static LOOP_THREAD_ID: AtomicU32 = AtomicU32::new(0);

    /// The manager the WinEvent callback dispatches into.
    ///
    /// # Safety
    ///
    /// The pointer is set on entry to [`run`] and cleared before it
    /// returns, and the callback only ever fires on the loop thread while
    /// that thread sits inside `GetMessageW`/`DispatchMessageW` — never
    /// while a `&mut WindowManager` method is on the stack. One loop per
    /// process.
    static mut ACTIVE_MANAGER: *mut WindowManager = std::ptr::null_mut();

    /// Map a raw WinEvent to the engine's taxonomy. Events outside it are
    /// dropped here, before any filtering work.
    fn translate(event: u32) -> Option<OsEvent> {
        match event {
            EVENT_OBJECT_SHOW => Some(OsEvent::Shown),
            EVENT_OBJECT_HIDE => Some(OsEvent::Hidden),
            EVENT_OBJECT_DESTROY => Some(OsEvent::Destroyed),
            EVENT_SYSTEM_FOREGROUND => Some(OsEvent::Foreground),
            EVENT_SYSTEM_MINIMIZESTART => Some(OsEvent::MinimizeStart),
            EVENT_SYSTEM_MINIMIZEEND => Some(OsEvent::MinimizeEnd),
            EVENT_SYSTEM_MOVESIZEEND => Some(OsEvent::MoveSizeEnd),
            EVENT_OBJECT_NAMECHANGE => Some(OsEvent::TitleChanged),
            _ => None,
        }
    }

    unsafe extern "system" fn win_event_proc(
        _hook: HWINEVENTHOOK,
        event: u32,
        hwnd: HWND,
        id_object: i32,
        _id_child: i32,
        _event_thread: u32,
        _event_time: u32,
    ) {
        // Only whole-window notifications matter; child object events
        // (scrollbars, carets) reuse the same codes.
        if hwnd.0 == 0 || id_object != OBJID_WINDOW.0 {
            return;
        }
        let Some(os_event) = translate(event) else {
            return;
        };

        if ACTIVE_MANAGER.is_null() {
            return;
        }
        let manager = &mut *ACTIVE_MANAGER;
        manager.handle_os_event(os_event, WindowId(hwnd.0));
    }

    /// Install the hook, adopt the existing desktop, and pump messages
    /// until [`stop`] or an OS quit message ends the loop.
    pub fn run(wm: &mut WindowManager) -> anyhow::Result<()> {
        let _com = ComGuard::initialize()?;

        // One hook covering [foreground .. name-change] catches every event
        // in the taxonomy; SKIPOWNPROCESS keeps our own console out.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_OBJECT_NAMECHANGE,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };
        if hook.is_invalid() {
            return Err(InitError::HookInstall.into());
        }

        LOOP_THREAD_ID.store(unsafe { GetCurrentThreadId() }, Ordering::SeqCst);
        unsafe {
            ACTIVE_MANAGER = wm as *mut WindowManager;
        }

        // Hotkeys are thread-affine: they must be registered on the thread
        // whose queue receives WM_HOTKEY, which is this one.
        wm.bind_hotkeys();
        wm.initial_scan();
        info!("event loop running");

        let mut msg = MSG::default();
        while unsafe { GetMessageW(&mut msg, None, 0, 0) }.as_bool() {
            if msg.message == WM_HOTKEY {
                wm.handle_hotkey(msg.wParam.0 as i32);
                continue;
            }
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        unsafe {
            ACTIVE_MANAGER = std::ptr::null_mut();
        }
        LOOP_THREAD_ID.store(0, Ordering::SeqCst);
        unsafe {
            let _ = UnhookWinEvent(hook);
        }
        wm.unbind_hotkeys();
        info!("event loop stopped");
        Ok(())
    }

    /// Wake the loop thread and make it exit. Safe to call from any thread
    /// (it is the only cross-thread entry point) and from signal handlers.
    pub fn stop() {
        let thread_id = LOOP_THREAD_ID.load(Ordering::SeqCst);
        if thread_id != 0 {
            unsafe {
                let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod stub_impl {
    use crate::window_manager::WindowManager;

    pub fn run(_wm: &mut WindowManager) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("the event loop only runs on Windows"))
    }

    pub fn stop() {}
}

#[cfg(target_os = "windows")]
pub use windows_impl::{run, stop};

#[cfg(not(target_os = "windows"))]
pub use stub_impl::{run, stop};
