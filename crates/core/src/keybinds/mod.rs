//! Global hotkeys: combo parsing and OS registration.

pub mod manager;
pub mod parser;

pub use manager::HotkeyManager;
pub use parser::{parse_combo, Combo};
