//! Keyboard combo parsing.
//!
//! Turns readable combo strings like `"alt+shift+4"` into the
//! `(modifier mask, virtual key)` pair `RegisterHotKey` expects. Parsing is
//! case-insensitive and accepts the usual aliases (`win`/`super`,
//! `ctrl`/`control`, `esc`/`escape`). The numeric values are defined here
//! rather than pulled from the OS bindings so the parser stays pure and
//! platform-independent.

/// Modifier flags, matching the Win32 `MOD_*` constants.
pub mod modifiers {
    pub const ALT: u32 = 0x0001;
    pub const CONTROL: u32 = 0x0002;
    pub const SHIFT: u32 = 0x0004;
    pub const WIN: u32 = 0x0008;
}

/// Virtual key codes for the keys the resize mode registers directly.
pub mod vk {
    pub const LEFT: u32 = 0x25;
    pub const UP: u32 = 0x26;
    pub const RIGHT: u32 = 0x27;
    pub const DOWN: u32 = 0x28;
    pub const RETURN: u32 = 0x0D;
    pub const ESCAPE: u32 = 0x1B;
}

/// A parsed hotkey combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo {
    /// OR-ed `MOD_*` flags
    pub modifiers: u32,
    /// Virtual key code
    pub vk: u32,
}

/// Parse a combo string of the form `mod+mod+key`.
///
/// The last `+`-separated token is the key; everything before it must be a
/// modifier. At least one modifier is required: an unmodified global hotkey
/// would swallow ordinary typing.
///
/// # Example
///
/// ```
/// use tatami_core::keybinds::parser::{parse_combo, modifiers};
///
/// let combo = parse_combo("alt+shift+Q").unwrap();
/// assert_eq!(combo.modifiers, modifiers::ALT | modifiers::SHIFT);
/// assert_eq!(combo.vk, 0x51);
/// ```
pub fn parse_combo(combo: &str) -> Result<Combo, String> {
    let tokens: Vec<&str> = combo.split('+').map(str::trim).collect();
    if tokens.len() < 2 {
        return Err(format!("combo '{combo}' needs at least one modifier"));
    }
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(format!("combo '{combo}' has an empty token"));
    }

    let mut mods = 0u32;
    for token in &tokens[..tokens.len() - 1] {
        mods |= parse_modifier(token).ok_or_else(|| {
            format!("combo '{combo}': unknown modifier '{token}'")
        })?;
    }

    let key_token = tokens[tokens.len() - 1];
    let vk = parse_key(key_token)
        .ok_or_else(|| format!("combo '{combo}': unknown key '{key_token}'"))?;

    Ok(Combo {
        modifiers: mods,
        vk,
    })
}

fn parse_modifier(token: &str) -> Option<u32> {
    match token.to_lowercase().as_str() {
        "alt" | "menu" => Some(modifiers::ALT),
        "ctrl" | "control" => Some(modifiers::CONTROL),
        "shift" => Some(modifiers::SHIFT),
        "win" | "super" | "windows" => Some(modifiers::WIN),
        _ => None,
    }
}

fn parse_key(token: &str) -> Option<u32> {
    let upper = token.to_uppercase();

    // Single letters and digits map straight to their VK values.
    if upper.len() == 1 {
        let c = upper.bytes().next()?;
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            return Some(c as u32);
        }
    }

    // Function keys F1..F24.
    if let Some(n) = upper.strip_prefix('F') {
        if let Ok(n) = n.parse::<u32>() {
            if (1..=24).contains(&n) {
                return Some(0x70 + n - 1);
            }
        }
    }

    let vk = match upper.as_str() {
        "LEFT" => vk::LEFT,
        "RIGHT" => vk::RIGHT,
        "UP" => vk::UP,
        "DOWN" => vk::DOWN,

        "SPACE" => 0x20,
        "ENTER" | "RETURN" => vk::RETURN,
        "ESCAPE" | "ESC" => vk::ESCAPE,
        "TAB" => 0x09,
        "BACKSPACE" | "BACK" => 0x08,
        "DELETE" | "DEL" => 0x2E,
        "INSERT" | "INS" => 0x2D,
        "HOME" => 0x24,
        "END" => 0x23,
        "PAGEUP" | "PGUP" => 0x21,
        "PAGEDOWN" | "PGDN" => 0x22,

        "MINUS" | "-" => 0xBD,
        "EQUALS" | "=" => 0xBB,
        "COMMA" | "," => 0xBC,
        "PERIOD" | "." => 0xBE,
        "SEMICOLON" | ";" => 0xBA,
        "SLASH" | "/" => 0xBF,
        "BACKSLASH" | "\\" => 0xDC,
        "BRACKETLEFT" | "[" => 0xDB,
        "BRACKETRIGHT" | "]" => 0xDD,
        "QUOTE" | "'" => 0xDE,
        "GRAVE" | "`" => 0xC0,

        _ => return None,
    };

    Some(vk)
}
