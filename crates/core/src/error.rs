//! Fatal startup errors.
//!
//! Everything that can go wrong after startup is logged and skipped; only
//! these conditions abort the process with a nonzero exit code.

/// Errors that prevent the window manager from starting at all.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to install the WinEvent hook")]
    HookInstall,

    #[error("no display monitors detected")]
    NoMonitors,

    #[error("COM initialization failed: {0}")]
    Com(String),
}
