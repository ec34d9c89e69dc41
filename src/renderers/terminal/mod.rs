// src/renderers/terminal/mod.rs
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use std::io::{self, stdout};
use std::panic;
use std::time::Duration;

use crate::bindings::{Action, KeyBindings};
use crate::engine::Shell;
use crate::error::Result;

/// Puts the terminal into raw mode on an alternate screen for as long as it
/// lives, and puts it back on drop or panic.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        // Set up panic hook for terminal cleanup
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = Self::cleanup_terminal();
            eprintln!("\n=== Panic Occurred ===");
            original_hook(panic_info);
            error!("Panic occurred: {:?}", panic_info);
        }));

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }

    fn cleanup_terminal() -> io::Result<()> {
        let mut stdout = stdout();
        disable_raw_mode()?;
        execute!(stdout, Show, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = Self::cleanup_terminal();
    }
}

/// The label a key press is looked up under in [`KeyBindings`].
pub fn key_label(code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(format!("ctrl+{}", c.to_ascii_lowercase()))
        }
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(c) => Some(c.to_ascii_lowercase().to_string()),
        KeyCode::Esc => Some("esc".to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Tab => Some("tab".to_string()),
        KeyCode::Left => Some("left".to_string()),
        KeyCode::Right => Some("right".to_string()),
        KeyCode::Up => Some("up".to_string()),
        KeyCode::Down => Some("down".to_string()),
        _ => None,
    }
}

/// Input straight from the terminal, no auxiliary display.
#[derive(Debug, Default)]
pub struct TerminalShell;

impl TerminalShell {
    pub fn new() -> Self {
        Self
    }
}

impl Shell for TerminalShell {
    fn poll(&mut self, bindings: &KeyBindings) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(action) =
                    key_label(key.code, key.modifiers).and_then(|label| bindings.action_for(&label))
                {
                    actions.push(action);
                }
            }
        }
        Ok(actions)
    }

    fn refresh(&mut self, _summary: &str) -> Result<()> {
        Ok(())
    }

    fn viewport(&self) -> Result<Option<(usize, usize)>> {
        let (width, height) = terminal::size()?;
        Ok(Some((width as usize, height as usize)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_default_bindings() {
        let bindings = KeyBindings::with_defaults();
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Char('Q'), KeyModifiers::SHIFT),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let label = key_label(code, modifiers).unwrap();
            assert_eq!(bindings.action_for(&label), Some(Action::Quit), "{label}");
        }
    }

    #[test]
    fn unbound_keys_have_no_action() {
        let bindings = KeyBindings::with_defaults();
        let label = key_label(KeyCode::Char('c'), KeyModifiers::NONE).unwrap();
        assert_eq!(label, "c");
        assert_eq!(bindings.action_for(&label), None);
        assert_eq!(key_label(KeyCode::F(5), KeyModifiers::NONE), None);
        assert_eq!(key_label(KeyCode::Char(' '), KeyModifiers::NONE).as_deref(), Some("space"));
    }
}
