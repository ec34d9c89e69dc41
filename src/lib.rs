use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use simplelog::{Config as LogConfig, WriteLogger};

pub mod bindings;
pub mod core;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod renderers;
pub mod scene;

pub use bindings::{Action, KeyBindings};
pub use crate::core::Color;
pub use engine::{Engine, FrameStatus, Shell};
pub use error::{Error, Result};
pub use pipeline::{Buffer, TermBuffer};
pub use scene::{ActiveScene, Scene, SceneDescriptor, SceneFlags};

pub const DEFAULT_FONT: &str = "tff/terminus.ttf";
pub const DEFAULT_LOG_FILE: &str = "ascii_rasterizer.log";
/// Grid size used when neither the flags nor the terminal give one.
pub const FALLBACK_GRID: (usize, usize) = (80, 24);
/// Upper bound for `--width` and `--height`.
pub const MAX_GRID_DIM: u16 = 4096;

#[derive(Debug, Clone)]
pub struct Config {
    pub scene: SceneDescriptor,
    pub fps: u32,
    /// Fixed grid width. `None` takes it from the terminal.
    pub width: Option<usize>,
    /// Fixed grid height. `None` takes it from the terminal.
    pub height: Option<usize>,
    pub font: PathBuf,
    pub font_size: f32,
    pub window: bool,
    pub window_size: (usize, usize),
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: scene::cube::DESCRIPTOR,
            fps: 15,
            width: None,
            height: None,
            font: PathBuf::from(DEFAULT_FONT),
            font_size: 32.0,
            window: true,
            window_size: (600, 200),
            log_level: LevelFilter::Info,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps.max(1) as f32)
    }

    /// Grid size for a terminal currently `viewport` cells big. A dimension
    /// given on the command line wins over the terminal's.
    pub fn grid_size(&self, viewport: Option<(usize, usize)>) -> (usize, usize) {
        let (cols, rows) = viewport.unwrap_or(FALLBACK_GRID);
        (self.width.unwrap_or(cols), self.height.unwrap_or(rows))
    }

    /// Whether the grid should track terminal resizes.
    pub fn follows_terminal(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let mut config = Config::default();

        if let Some(name) = matches.get_one::<String>("scene") {
            config.scene =
                scene::find_scene(name).ok_or_else(|| Error::UnknownScene(name.clone()))?;
        }
        if let Some(&fps) = matches.get_one::<u32>("fps") {
            config.fps = fps;
        }
        config.width = matches.get_one::<u16>("width").map(|&w| w as usize);
        config.height = matches.get_one::<u16>("height").map(|&h| h as usize);
        if let Some(font) = matches.get_one::<PathBuf>("font") {
            config.font = font.clone();
        }
        if let Some(&size) = matches.get_one::<f32>("font-size") {
            config.font_size = size;
        }
        config.window = !matches.get_flag("no-window");
        if let Some(level) = matches.get_one::<String>("log-level") {
            config.log_level = level.parse().unwrap_or(LevelFilter::Info);
        }
        if let Some(file) = matches.get_one::<PathBuf>("log-file") {
            config.log_file = file.clone();
        }
        Ok(config)
    }
}

/// Send log records to the configured file, appending. Fails when the file
/// can't be opened or a logger is already installed.
pub fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    WriteLogger::init(config.log_level, LogConfig::default(), log_file)?;
    Ok(())
}

pub fn create_clap_command() -> Command {
    let scene_names: Vec<&'static str> = scene::SCENES.iter().map(|s| s.name).collect();

    Command::new("ascii_rasterizer")
        .about("Spinning wireframes drawn in ASCII, right in the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("scene")
                .short('s')
                .long("scene")
                .value_name("SCENE")
                .help("Scene to run")
                .value_parser(scene_names),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("N")
                .help("Target frames per second (default 15)")
                .value_parser(value_parser!(u32).range(1..=240)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("COLS")
                .help("Fixed grid width; follows the terminal when neither width nor height is set")
                .value_parser(value_parser!(u16).range(1..=MAX_GRID_DIM as i64)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("ROWS")
                .help("Fixed grid height")
                .value_parser(value_parser!(u16).range(1..=MAX_GRID_DIM as i64)),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .value_name("FILE")
                .help("TrueType font for the controls window")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("font-size")
                .long("font-size")
                .value_name("PX")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("no-window")
                .long("no-window")
                .help("Skip the controls window and only draw to the terminal")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let matches = create_clap_command()
            .try_get_matches_from(std::iter::once("ascii_rasterizer").chain(args.iter().copied()))
            .expect("arguments parse");
        Config::from_matches(&matches)
    }

    #[test]
    fn defaults_without_flags() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.scene.name, "cube");
        assert_eq!(config.fps, 15);
        assert_eq!((config.width, config.height), (None, None));
        assert!(config.follows_terminal());
        assert_eq!(config.font, PathBuf::from(DEFAULT_FONT));
        assert!(config.window);
        assert_eq!(config.window_size, (600, 200));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--scene",
            "star",
            "--fps",
            "30",
            "--width",
            "100",
            "--height",
            "40",
            "--no-window",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.scene.name, "star");
        assert_eq!(config.fps, 30);
        assert_eq!(config.grid_size(Some((120, 50))), (100, 40));
        assert!(!config.follows_terminal());
        assert!(!config.window);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.frame_time(), Duration::from_secs_f32(1.0 / 30.0));
    }

    #[test]
    fn unknown_scene_is_rejected_by_parser() {
        let result = create_clap_command().try_get_matches_from(["ascii_rasterizer", "--scene", "teapot"]);
        assert!(result.is_err());
    }

    #[test]
    fn oversized_or_empty_grid_is_rejected_by_parser() {
        for args in [
            ["ascii_rasterizer", "--width", "4294967296"],
            ["ascii_rasterizer", "--height", "4097"],
            ["ascii_rasterizer", "--width", "0"],
        ] {
            assert!(create_clap_command().try_get_matches_from(args).is_err(), "{args:?}");
        }
        let config = parse(&["--width", "4096", "--height", "4096"]).unwrap();
        assert_eq!(config.grid_size(None), (4096, 4096));
    }

    #[test]
    fn missing_dimension_comes_from_the_terminal() {
        let config = parse(&["--width", "100"]).unwrap();
        assert_eq!(config.grid_size(Some((132, 43))), (100, 43));
        assert!(!config.follows_terminal());

        let config = parse(&["--height", "30"]).unwrap();
        assert_eq!(config.grid_size(Some((132, 43))), (132, 30));
        assert_eq!(config.grid_size(None), (80, 30));

        assert_eq!(parse(&[]).unwrap().grid_size(None), FALLBACK_GRID);
    }

    #[test]
    fn logging_reports_failures_instead_of_swallowing_them() {
        let mut config = Config::default();
        config.log_file = PathBuf::from("definitely/not/here/ascii_rasterizer.log");
        assert!(matches!(init_logging(&config), Err(Error::Io(_))));

        config.log_file = std::env::temp_dir().join("ascii_rasterizer_test.log");
        // only one logger per process, so a second install always fails
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(Error::Logger(_))));
    }
}
