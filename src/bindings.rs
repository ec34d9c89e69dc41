use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "quit"),
        }
    }
}

/// Key label to action map, kept in insertion order so the controls window
/// lists bindings the way they were registered.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    entries: Vec<(String, Action)>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any earlier action for the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, action: Action) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = action,
            None => self.entries.push((key, action)),
        }
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, action)| action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Action)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"<key>: <action>, <key>: <action>"`
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(key, action)| format!("{key}: {action}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl KeyBindings {
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        bindings.insert("q", Action::Quit);
        bindings.insert("esc", Action::Quit);
        bindings.insert("ctrl+c", Action::Quit);
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_bindings_in_order() {
        assert_eq!(
            KeyBindings::with_defaults().summary(),
            "q: quit, esc: quit, ctrl+c: quit"
        );
    }

    #[test]
    fn empty_summary_is_empty() {
        let bindings = KeyBindings::new();
        assert!(bindings.is_empty());
        assert_eq!(bindings.summary(), "");
    }

    #[test]
    fn single_binding_has_no_separator() {
        let mut bindings = KeyBindings::new();
        bindings.insert("q", Action::Quit);
        assert_eq!(bindings.summary(), "q: quit");
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut bindings = KeyBindings::with_defaults();
        bindings.insert("q", Action::Quit);
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.iter().next(), Some(("q", Action::Quit)));
    }

    #[test]
    fn lookup_by_label() {
        let bindings = KeyBindings::with_defaults();
        assert_eq!(bindings.action_for("esc"), Some(Action::Quit));
        assert_eq!(bindings.action_for("w"), None);
    }
}
