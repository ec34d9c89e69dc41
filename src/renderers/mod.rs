pub mod terminal;
pub mod window;

pub use terminal::{TerminalGuard, TerminalShell};
pub use window::{ControlsWindow, WindowShell};
