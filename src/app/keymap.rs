//! Keybinding configuration: defaults, `keybinds.conf` parsing, and key → action resolution.
//!
//! The file format is one `<Action> = <KeySpec>` per line, e.g. `Refresh = Ctrl+r`.
//! Entries override the defaults; unknown actions or keys are skipped.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::error::Result;

/// Semantic actions of the list and detail screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the search bar on the list screen.
    StartSearch,
    /// Open the create-user form.
    NewUser,
    /// Open the edit form for the user on screen.
    EditSelection,
    /// Ask to delete the selected (or displayed) user.
    DeleteSelection,
    /// Re-fetch the list, or retry loading the detail screen.
    Refresh,
    /// Leave the detail screen.
    Back,
    /// Show the help overlay with the current bindings.
    OpenHelp,
    /// Open the detail screen of the selected user.
    EnterAction,
    /// Select the previous user card.
    MoveUp,
    /// Select the next user card.
    MoveDown,
    /// Move the selection up by one screenful of cards.
    PageUp,
    /// Move the selection down by one screenful of cards.
    PageDown,
    /// Does nothing; mapping a key to it in the config disables that key.
    Ignore,
}

const ACTION_NAMES: [(KeyAction, &str); 14] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::NewUser, "NewUser"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::Refresh, "Refresh"),
    (KeyAction::Back, "Back"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::EnterAction, "EnterAction"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::Ignore, "Ignore"),
];

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let bindings = HashMap::from([
            ((M::NONE, Char('q')), KeyAction::Quit),
            ((M::CONTROL, Char('c')), KeyAction::Quit),
            ((M::NONE, Char('/')), KeyAction::StartSearch),
            ((M::NONE, Char('n')), KeyAction::NewUser),
            ((M::NONE, Char('e')), KeyAction::EditSelection),
            ((M::NONE, Delete), KeyAction::DeleteSelection),
            ((M::NONE, Char('d')), KeyAction::DeleteSelection),
            ((M::NONE, Char('r')), KeyAction::Refresh),
            ((M::NONE, Esc), KeyAction::Back),
            ((M::NONE, Backspace), KeyAction::Back),
            ((M::NONE, Char('?')), KeyAction::OpenHelp),
            ((M::NONE, Enter), KeyAction::EnterAction),
            ((M::NONE, Up), KeyAction::MoveUp),
            ((M::NONE, Down), KeyAction::MoveDown),
            ((M::NONE, Char('k')), KeyAction::MoveUp),
            ((M::NONE, Char('j')), KeyAction::MoveDown),
            ((M::NONE, PageUp), KeyAction::PageUp),
            ((M::NONE, PageDown), KeyAction::PageDown),
        ]);
        Self { bindings }
    }

    /// Defaults overridden by `contents`.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::new_defaults();
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed = line
                .split_once('=')
                .and_then(|(a, k)| Some((parse_action(a)?, parse_key(k)?)));
            match parsed {
                Some((action, key)) => {
                    map.bindings.insert(key, action);
                }
                None => warn!(line, "ignoring keybinding entry"),
            }
        }
        map
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of `keybinds.conf`.
    ///
    /// # Returns
    ///
    /// The parsed keymap, or an error when the file cannot be read or written.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read keybindings {}", path.display()))?;
            return Ok(Self::parse(&contents));
        }
        let km = Self::new_defaults();
        std::fs::write(path, km.to_config())
            .with_context(|| format!("write keybindings {}", path.display()))?;
        Ok(km)
    }

    pub fn to_config(&self) -> String {
        let mut out = String::from("# userdash keybindings\n# Format: <Action> = <KeySpec>\n");
        out.push_str("# KeySpec: a single character, Ctrl+<char>, Enter, Esc, Backspace,\n");
        out.push_str("#          Delete, Tab, Up, Down, PageUp, PageDown\n\n");
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                format!("{} = {}", format_action(*action), Self::format_key(*mods, *code))
            })
            .collect();
        lines.sort();
        out.push_str(&lines.join("\n"));
        out.push('\n');
        out
    }

    /// Map a key press to its action. Only Ctrl and Alt take part in matching.
    ///
    /// # Arguments
    ///
    /// * `key` - The key event to resolve.
    ///
    /// # Returns
    ///
    /// `Some(action)` when the key is bound; `None` otherwise.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        let mods = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        self.bindings.get(&(mods, key.code)).copied()
    }

    /// All keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys
    }

    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Backspace => "Backspace".to_string(),
            Delete => "Delete".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
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
    let spec = spec.trim();
    let (mods, rest) = match spec.strip_prefix("Ctrl+") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::NONE, spec),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Backspace" => Backspace,
        "Delete" => Delete,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
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
    let s = s.trim();
    ACTION_NAMES.iter().find(|(_, n)| *n == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES
        .iter()
        .find(|(x, _)| *x == a)
        .map_or("Ignore", |&(_, n)| n)
}
