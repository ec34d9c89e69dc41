use std::io::Write;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::bindings::{Action, KeyBindings};
use crate::error::Result;
use crate::pipeline::{Buffer, TermBuffer};
use crate::scene::{ActiveScene, SceneDescriptor};

/// The world outside the core: where input comes from, where the binding
/// summary is shown, and how big the terminal currently is.
pub trait Shell {
    /// Drain pending input and return the actions it maps to.
    fn poll(&mut self, bindings: &KeyBindings) -> Result<Vec<Action>>;
    /// Redraw the auxiliary display with the current binding summary.
    fn refresh(&mut self, summary: &str) -> Result<()>;
    /// Current viewport in cells, if the shell knows it.
    fn viewport(&self) -> Result<Option<(usize, usize)>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

pub struct Engine<S: Shell> {
    pub shell: S,
    scene: ActiveScene,
    bindings: KeyBindings,
    buffer: TermBuffer,
    frame_time: Duration,
    auto_resize: bool,
    frames: u64,
    failed_flushes: u64,
}

impl<S: Shell> Engine<S> {
    pub fn new(
        shell: S,
        scene: SceneDescriptor,
        bindings: KeyBindings,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            shell,
            scene: ActiveScene::new(scene),
            bindings,
            buffer: TermBuffer::new(width, height),
            frame_time: Duration::from_secs_f32(1.0 / 15.0),
            auto_resize: false,
            frames: 0,
            failed_flushes: 0,
        }
    }

    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Follow the shell's viewport size between frames.
    pub fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    pub fn buffer(&self) -> &TermBuffer {
        &self.buffer
    }

    pub fn scene(&self) -> &ActiveScene {
        &self.scene
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames whose output could not be written.
    pub fn failed_flushes(&self) -> u64 {
        self.failed_flushes
    }

    pub fn start(&mut self) -> Result<()> {
        info!(
            "starting scene '{}' on a {}x{} grid",
            self.scene.name(),
            self.buffer.width(),
            self.buffer.height()
        );
        self.scene.create()?;
        Ok(())
    }

    /// One full frame: input, auxiliary display, scene, flush.
    ///
    /// Returns [`FrameStatus::Quit`] without drawing when a quit was polled.
    pub fn frame<W: Write>(&mut self, out: &mut W) -> Result<FrameStatus> {
        let actions = self.shell.poll(&self.bindings)?;
        if actions.contains(&Action::Quit) {
            info!("quit requested after {} frames", self.frames);
            return Ok(FrameStatus::Quit);
        }

        self.shell.refresh(&self.bindings.summary())?;

        if self.auto_resize {
            if let Some((width, height)) = self.shell.viewport()? {
                if (width, height) != (self.buffer.width(), self.buffer.height()) {
                    debug!("viewport resized to {width}x{height}");
                    self.buffer.resize(width, height);
                }
            }
        }

        self.buffer.clear();
        self.scene.update(&mut self.buffer)?;
        // output is best effort, the next frame repaints everything anyway
        if let Err(e) = self.buffer.flush_to(out) {
            if self.failed_flushes == 0 {
                warn!("frame {} could not be written: {e}", self.frames);
            }
            self.failed_flushes += 1;
        }
        self.frames += 1;

        Ok(FrameStatus::Continue)
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.scene.destroy()?;
        info!("shut down after {} frames", self.frames);
        Ok(())
    }

    /// Create the scene, run frames until quit, then destroy it. The scene is
    /// destroyed even when a frame fails; the frame's error wins.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.start()?;
        let result = self.frames_until_quit(out);
        if let Err(e) = &result {
            warn!("frame loop stopped: {e}");
        }
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    fn frames_until_quit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        loop {
            let started = Instant::now();
            if self.frame(out)? == FrameStatus::Quit {
                return Ok(());
            }
            if let Some(rest) = self.frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scene::{cube, CubeScene, Lifecycle, Scene};
    use std::io;

    /// Quits on the `quit_on`th poll and records every refresh.
    struct ScriptedShell {
        polls: usize,
        quit_on: usize,
        refreshed: Vec<String>,
        size: Option<(usize, usize)>,
        refresh_fails: bool,
    }

    /// Output that is gone, like stdout after the terminal closed.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    impl ScriptedShell {
        fn quitting_on(quit_on: usize) -> Self {
            Self {
                polls: 0,
                quit_on,
                refreshed: Vec::new(),
                size: None,
                refresh_fails: false,
            }
        }
    }

    impl Shell for ScriptedShell {
        fn poll(&mut self, _bindings: &KeyBindings) -> Result<Vec<Action>> {
            self.polls += 1;
            Ok(if self.polls >= self.quit_on {
                vec![Action::Quit]
            } else {
                Vec::new()
            })
        }

        fn refresh(&mut self, summary: &str) -> Result<()> {
            if self.refresh_fails {
                return Err(Error::Window("controls window went away".to_string()));
            }
            self.refreshed.push(summary.to_string());
            Ok(())
        }

        fn viewport(&self) -> Result<Option<(usize, usize)>> {
            Ok(self.size)
        }
    }

    fn engine(shell: ScriptedShell) -> Engine<ScriptedShell> {
        Engine::new(shell, cube::DESCRIPTOR, KeyBindings::with_defaults(), 80, 24)
            .with_frame_time(Duration::ZERO)
    }

    #[test]
    fn frame_draws_and_flushes() {
        let mut engine = engine(ScriptedShell::quitting_on(usize::MAX));
        engine.start().unwrap();

        let mut out = Vec::new();
        assert_eq!(engine.frame(&mut out).unwrap(), FrameStatus::Continue);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1B[1;1H"));
        assert!(text.ends_with("\x1B[H"));
        assert!(text.contains('.'));
        assert!(engine.buffer().filled() > 0);
        assert_eq!(engine.shell.refreshed, vec!["q: quit, esc: quit, ctrl+c: quit".to_string()]);
        assert_eq!(engine.frames(), 1);
    }

    #[test]
    fn frame_before_start_is_an_error() {
        let mut engine = engine(ScriptedShell::quitting_on(usize::MAX));
        assert!(engine.frame(&mut std::io::sink()).is_err());
    }

    #[test]
    fn quit_stops_before_drawing() {
        let mut engine = engine(ScriptedShell::quitting_on(1));
        engine.start().unwrap();
        let mut out = Vec::<u8>::new();
        assert_eq!(engine.frame(&mut out).unwrap(), FrameStatus::Quit);
        assert!(out.is_empty());
        assert!(engine.shell.refreshed.is_empty());
    }

    #[test]
    fn run_renders_until_quit_then_destroys_scene() {
        let mut engine = engine(ScriptedShell::quitting_on(4));
        let mut out = Vec::new();
        engine.run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1B[1;1H").count(), 3);
        assert_eq!(engine.frames(), 3);
        assert_eq!(engine.shell.refreshed.len(), 3);
        assert_eq!(engine.scene().lifecycle(), Lifecycle::Destroyed);
    }

    #[test]
    fn each_frame_starts_from_a_clear_buffer() {
        let mut engine = engine(ScriptedShell::quitting_on(usize::MAX));
        engine.start().unwrap();
        engine.frame(&mut std::io::sink()).unwrap();
        engine.frame(&mut std::io::sink()).unwrap();

        // second frame alone, rendered by a fresh cube into a fresh grid
        let mut reference = CubeScene::new();
        reference.update(&mut TermBuffer::new(80, 24));
        let mut expected = TermBuffer::new(80, 24);
        reference.update(&mut expected);

        let grid = |b: &TermBuffer| b.rows().flatten().collect::<String>();
        assert_eq!(grid(engine.buffer()), grid(&expected));
    }

    #[test]
    fn auto_resize_follows_viewport() {
        let mut shell = ScriptedShell::quitting_on(usize::MAX);
        shell.size = Some((40, 12));
        let mut engine = engine(shell).with_auto_resize(true);
        engine.start().unwrap();
        engine.frame(&mut std::io::sink()).unwrap();
        assert_eq!((engine.buffer().width(), engine.buffer().height()), (40, 12));
    }

    #[test]
    fn fixed_size_ignores_viewport() {
        let mut shell = ScriptedShell::quitting_on(usize::MAX);
        shell.size = Some((40, 12));
        let mut engine = engine(shell);
        engine.start().unwrap();
        engine.frame(&mut std::io::sink()).unwrap();
        assert_eq!((engine.buffer().width(), engine.buffer().height()), (80, 24));
    }

    #[test]
    fn failed_output_is_skipped_and_scene_still_destroyed() {
        let mut engine = engine(ScriptedShell::quitting_on(3));
        engine.run(&mut ClosedPipe).unwrap();
        assert_eq!(engine.frames(), 2);
        assert_eq!(engine.failed_flushes(), 2);
        assert_eq!(engine.scene().lifecycle(), Lifecycle::Destroyed);
    }

    #[test]
    fn frame_error_still_destroys_scene() {
        let mut shell = ScriptedShell::quitting_on(usize::MAX);
        shell.refresh_fails = true;
        let mut engine = engine(shell);

        match engine.run(&mut std::io::sink()) {
            Err(Error::Window(msg)) => assert_eq!(msg, "controls window went away"),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(engine.frames(), 0);
        assert_eq!(engine.scene().lifecycle(), Lifecycle::Destroyed);
    }
}
