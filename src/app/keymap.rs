//! Keybindings for the grid: default bindings and key-to-action resolution.
//!
//! Dialog and search input are handled directly in `update`; this map only
//! covers the normal (grid) mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions available on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Fetch the whole collection again.
    Refresh,
    /// Start typing a search query.
    StartSearch,
    /// Open the insert dialog.
    NewUsuario,
    /// Open the edit dialog for the row under the cursor.
    EditSelection,
    /// Open the delete confirmation for the row under the cursor.
    DeleteSelection,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows plus vim-style `hjkl`, `n`/`e`/`d` for the
    /// dialogs, `r` to reload, `/` to search.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, F(5)), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);

        bindings.insert((M::NONE, Char('n')), KeyAction::NewUsuario);
        bindings.insert((M::NONE, Insert), KeyAction::NewUsuario);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);

        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);

        Self { bindings }
    }

    /// Resolve a key event to its action, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted for display.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        // shortest first; the header shows only the first key
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys
    }

    /// One-line key hint for the header.
    pub fn help_line(&self) -> String {
        let entries = [
            (KeyAction::NewUsuario, "new"),
            (KeyAction::EditSelection, "edit"),
            (KeyAction::DeleteSelection, "delete"),
            (KeyAction::Refresh, "reload"),
            (KeyAction::StartSearch, "search"),
            (KeyAction::Quit, "quit"),
        ];
        entries
            .iter()
            .filter_map(|(action, label)| {
                let keys = self.keys_for(*action);
                keys.first().map(|k| format!("{k}: {label}"))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Format a key (modifiers + code) into a label like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Insert => "Insert".to_string(),
            Esc => "Esc".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            F(n) => format!("F{n}"),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_cover_crud_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyCode::Char('n'), KeyModifiers::NONE)), Some(KeyAction::NewUsuario));
        assert_eq!(km.resolve(&press(KeyCode::Enter, KeyModifiers::NONE)), Some(KeyAction::EditSelection));
        assert_eq!(km.resolve(&press(KeyCode::Delete, KeyModifiers::NONE)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn help_line_lists_short_keys_first() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::NewUsuario), vec!["n".to_string(), "Insert".to_string()]);
        let help = km.help_line();
        assert!(help.starts_with("n: new; e: edit; d: delete; r: reload; /: search; q: quit"));
    }

    #[test]
    fn format_key_prefixes_ctrl() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('c')), "Ctrl+c");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::F(5)), "F5");
    }
}
