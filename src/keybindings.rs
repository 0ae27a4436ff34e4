use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NewTab,
    CloseTab,
    NextTab,
    PrevTab,
    CycleBorder,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::NewTab => "New tab",
            Action::CloseTab => "Close selected tab",
            Action::NextTab => "Select next tab",
            Action::PrevTab => "Select previous tab",
            Action::CycleBorder => "Cycle content border",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::empty();
        kb.add(Quit, KeyCombo::ctrl('q'));
        kb.add(NewTab, KeyCombo::ctrl('t'));
        kb.add(CloseTab, KeyCombo::ctrl('w'));
        kb.add(NextTab, KeyCombo::ctrl('n'));
        kb.add(NextTab, KeyCombo::new(KeyCode::Right, KeyModifiers::ALT));
        kb.add(PrevTab, KeyCombo::ctrl('p'));
        kb.add(PrevTab, KeyCombo::new(KeyCode::Left, KeyModifiers::ALT));
        kb.add(CycleBorder, KeyCombo::ctrl('b'));
        kb
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// Resolve a key press to its bound action. Release and repeat events
    /// never resolve, so holding a key does not close a row of tabs.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }

    /// One-line summary such as `Ctrl+T New tab · Ctrl+W Close selected tab`.
    pub fn hint_line(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .filter_map(|act| self.first_combo(*act).map(|c| format!("{} {}", c, act)))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        assert_eq!(kb.action_for_key(&ev), Some(Action::Quit));
    }

    #[test]
    fn release_events_do_not_resolve() {
        let kb = KeyBindings::default();
        let mut ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        ev.kind = KeyEventKind::Release;
        assert_eq!(kb.action_for_key(&ev), None);
    }

    #[test]
    fn hint_line_lists_first_combos() {
        let kb = KeyBindings::default();
        let hint = kb.hint_line(&[Action::NewTab, Action::CloseTab]);
        assert_eq!(hint, "Ctrl+T New tab · Ctrl+W Close selected tab");
    }
}
