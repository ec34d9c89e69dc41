use std::io::stdout;
use std::process::ExitCode;

use ascii_rasterizer::{
    create_clap_command, init_logging,
    renderers::{ControlsWindow, TerminalGuard, TerminalShell, WindowShell},
    Config, Engine, KeyBindings, Result, Shell,
};
use log::{error, info};

fn main() -> ExitCode {
    let matches = create_clap_command().get_matches();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // stdout is the framebuffer, so logs go to a file
    if let Err(e) = init_logging(&config) {
        eprintln!("warning: no logging to {}: {e}", config.log_file.display());
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    info!("config: {config:?}");

    // open the controls window before touching the terminal so a missing
    // font is reported on a clean screen
    let controls = if config.window {
        let (w, h) = config.window_size;
        Some(ControlsWindow::new(&config.font, config.font_size, w, h)?)
    } else {
        None
    };

    let guard = TerminalGuard::new()?;
    let result = match controls {
        Some(controls) => drive(WindowShell::new(TerminalShell::new(), controls), config),
        None => drive(TerminalShell::new(), config),
    };
    drop(guard);
    result
}

fn drive<S: Shell>(shell: S, config: &Config) -> Result<()> {
    let (width, height) = config.grid_size(shell.viewport()?);

    let mut engine = Engine::new(shell, config.scene, KeyBindings::with_defaults(), width, height)
        .with_frame_time(config.frame_time())
        .with_auto_resize(config.follows_terminal());

    engine.run(&mut stdout().lock())
}
