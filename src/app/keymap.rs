//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the TUI. It supports:
//! - Loading custom keybindings from a config file
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//!
//! The config file is only ever read.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Multiple key combinations can map to the same action (e.g. both 'j' and Down
/// move down). What an action does can depend on the input mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start another fetch cycle.
    Reload,
    /// Open the record selector popup.
    OpenSelector,
    /// Open the selector in normal mode; confirm the highlighted entry inside it.
    Activate,
    /// Close the selector without choosing.
    Cancel,
    /// Move up in the current list.
    MoveUp,
    /// Move down in the current list.
    MoveDown,
    /// Move one page up.
    PageUp,
    /// Move one page down.
    PageDown,
    /// Ignore this key.
    Ignore,
}

/// Canonical mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    ///
    /// Arrow keys and vim-style keys navigate, `Enter` activates, `s` opens the
    /// selector, `r` reloads, `q` quits.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('r')), KeyAction::Reload);
        bindings.insert((M::NONE, Char('s')), KeyAction::OpenSelector);
        bindings.insert((M::NONE, Enter), KeyAction::Activate);
        bindings.insert((M::NONE, Esc), KeyAction::Cancel);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        Self { bindings }
    }

    /// Load a keymap from `path` if given, otherwise defaults.
    ///
    /// An unreadable file is logged and the defaults are used.
    pub fn load(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|| {
                tracing::warn!(path = p, "keybinds file unreadable, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load a keymap from a configuration file.
    ///
    /// Returns `None` if the file cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse `<Action> = <KeySpec>` lines (or the reversed `<KeySpec> = <Action>`)
    /// on top of the defaults. Unrecognised lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            tracing::debug!(line, "skipping unrecognised keybind line");
        }
        map
    }

    /// Resolve a key event to its corresponding action.
    ///
    /// Shifted characters are matched with and without the SHIFT modifier,
    /// since terminals disagree on whether they report it.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*action);
        }
        if key.modifiers == KeyModifiers::SHIFT {
            if let KeyCode::Char(_) = key.code {
                return self.bindings.get(&(KeyModifiers::NONE, key.code)).copied();
            }
        }
        None
    }

    /// Keys bound to `action`, formatted for display and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+c", "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "Reload" => Some(KeyAction::Reload),
        "OpenSelector" => Some(KeyAction::OpenSelector),
        "Activate" => Some(KeyAction::Activate),
        "Cancel" => Some(KeyAction::Cancel),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}
