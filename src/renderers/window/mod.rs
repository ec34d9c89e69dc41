mod winbuffer;
pub use winbuffer::{load_font, wrap_text, WinBuffer};

use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::Path;

use crate::bindings::{Action, KeyBindings};
use crate::core::Color;
use crate::engine::Shell;
use crate::error::Result;
use crate::renderers::terminal::TerminalShell;

pub const TITLE: &str = "ascii-rasterizer - controls";

/// Label for a key pressed while the controls window has focus.
pub fn window_key_label(key: Key) -> Option<String> {
    let label = match key {
        Key::Escape => "esc".to_string(),
        Key::Space => "space".to_string(),
        Key::Enter => "enter".to_string(),
        Key::Tab => "tab".to_string(),
        Key::Left => "left".to_string(),
        Key::Right => "right".to_string(),
        Key::Up => "up".to_string(),
        Key::Down => "down".to_string(),
        // letters and digits: minifb names them "A".."Z", "Key0".."Key9"
        other => {
            let name = format!("{other:?}");
            let name = name.strip_prefix("Key").unwrap_or(&name);
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_lowercase().to_string(),
                _ => return None,
            }
        }
    };
    Some(label)
}

/// Small window that lists the active key bindings.
pub struct ControlsWindow {
    window: Window,
    buffer: WinBuffer,
    shown: Option<String>,
}

impl ControlsWindow {
    pub fn new(font_path: &Path, font_size: f32, width: usize, height: usize) -> Result<Self> {
        let font = load_font(font_path, font_size)?;
        let window = Window::new(TITLE, width, height, WindowOptions::default())?;
        info!("controls window opened ({width}x{height}, font {})", font_path.display());
        Ok(Self {
            window,
            buffer: WinBuffer::new(width, height, font, font_size),
            shown: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn pressed_labels(&self) -> Vec<String> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(window_key_label)
            .collect()
    }

    /// Re-render the text when it changed and present the window, which is
    /// also what pumps its event queue.
    pub fn show(&mut self, text: &str) -> Result<()> {
        if self.shown.as_deref() != Some(text) {
            self.buffer.clear(Color::WHITE);
            self.buffer.draw_text(text, Color::BLACK);
            self.shown = Some(text.to_string());
        }
        self.window
            .update_with_buffer(&self.buffer.data, self.buffer.width, self.buffer.height)?;
        Ok(())
    }
}

/// Terminal input plus the controls window.
pub struct WindowShell {
    term: TerminalShell,
    controls: ControlsWindow,
}

impl WindowShell {
    pub fn new(term: TerminalShell, controls: ControlsWindow) -> Self {
        Self { term, controls }
    }
}

impl Shell for WindowShell {
    fn poll(&mut self, bindings: &KeyBindings) -> Result<Vec<Action>> {
        let mut actions = self.term.poll(bindings)?;
        if !self.controls.is_open() {
            info!("controls window closed");
            actions.push(Action::Quit);
        }
        actions.extend(
            self.controls
                .pressed_labels()
                .iter()
                .filter_map(|label| bindings.action_for(label)),
        );
        Ok(actions)
    }

    fn refresh(&mut self, summary: &str) -> Result<()> {
        self.controls.show(summary)
    }

    fn viewport(&self) -> Result<Option<(usize, usize)>> {
        self.term.viewport()
    }
}
