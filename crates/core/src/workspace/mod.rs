//! Workspaces and the monitor multiplexer.
//!
//! - [`Workspace`]: one virtual workspace with its window lists and layouts
//! - [`WorkspaceManager`]: the monitor -> active-workspace mapping and every
//!   cross-workspace operation (switch, swap, move, shutdown restore)

pub mod core;
pub mod manager;

pub use core::Workspace;
pub use manager::{WorkspaceChangedCallback, WorkspaceManager, DEFAULT_WORKSPACE_COUNT};
