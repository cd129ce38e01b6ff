//! Terminal front end: drives the frame loop and shows the rendered solid
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tilt3d_core::{FrameState, OrientationSource, SolidKind};

pub mod config;
pub mod logging;
pub mod ports;
pub mod renderer;
pub mod source;

pub use config::{AppConfig, Args, SourceConfig};
pub use renderer::TerminalPresenter;

/// `q`, `Esc` and `Ctrl+C` end the frame loop
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Step frames until `on_frame` asks to stop or the source fails.
///
/// Returns how many frames were stepped. A source error ends the loop right
/// away, before the failed frame is shown.
pub fn run_frames<F>(
    state: &mut FrameState,
    source: &mut dyn OrientationSource,
    mut on_frame: F,
) -> anyhow::Result<u64>
where
    F: FnMut(&FrameState) -> anyhow::Result<bool>,
{
    let mut frames = 0;
    loop {
        state.step(source)?;
        frames += 1;
        if !on_frame(state)? {
            return Ok(frames);
        }
    }
}

/// Terminal side of a frame: presenting, input, pacing
struct Screen {
    presenter: TerminalPresenter,
    solid: SolidKind,
    label: String,
    frame_time: Duration,
    frame_start: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl Screen {
    /// Show one rendered frame; `false` once the user asked to quit.
    fn frame(&mut self, state: &FrameState) -> anyhow::Result<bool> {
        self.render(state)?;
        let running = self.handle_input()?;

        // Frame timing
        self.frame_count += 1;
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_time {
            std::thread::sleep(self.frame_time - elapsed);
        } else {
            tracing::debug!(?elapsed, "frame over budget");
        }
        self.frame_start = Instant::now();

        // Update FPS counter
        let now = self.frame_start;
        if (now - self.last_fps_sample).as_secs() >= 1 {
            self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
            self.frame_count = 0;
            self.last_fps_sample = now;
        }

        Ok(running)
    }

    /// Drain pending terminal events without waiting
    fn handle_input(&mut self) -> io::Result<bool> {
        let mut running = true;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => running = false,
                Event::Resize(cols, rows) => {
                    self.presenter.resize(cols as usize, rows as usize);
                    execute!(stdout(), terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }
        Ok(running)
    }

    fn render(&mut self, state: &FrameState) -> io::Result<()> {
        self.presenter.sample(state.framebuffer());

        let mut stdout = stdout();
        self.presenter.draw(&mut stdout)?;

        // Status line
        let (x, y, z) = state.orientation().degrees();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "tilt3d | {} | {} | FPS: {:.1} | x {:6.1}° y {:6.1}° z {:6.1}° | Q=Quit",
                self.solid.name(),
                self.label,
                self.fps,
                x,
                y,
                z
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}

/// The running application: frame state, its sensor, and the terminal
pub struct TiltApp {
    frame: FrameState,
    source: Box<dyn OrientationSource>,
    screen: Screen,
}

impl TiltApp {
    pub fn new(config: &AppConfig, source: Box<dyn OrientationSource>) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            frame: FrameState::with_kind(config.solid, config.width, config.height),
            screen: Screen {
                presenter: TerminalPresenter::new(cols as usize, rows as usize),
                solid: config.solid,
                label: source.label().to_string(),
                frame_time: config.frame_time(),
                frame_start: now,
                last_fps_sample: now,
                frame_count: 0,
                fps: 0.0,
            },
            source,
        })
    }

    /// Take over the terminal, run until quit, then hand it back.
    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), ResetColor, terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            solid = self.screen.solid.name(),
            source = %self.screen.label,
            frame_time = ?self.screen.frame_time,
            "frame loop started"
        );

        self.screen.frame_start = Instant::now();
        let screen = &mut self.screen;
        let frames = run_frames(&mut self.frame, self.source.as_mut(), |state| {
            screen.frame(state)
        })?;

        tracing::info!(frames, "frame loop stopped");
        Ok(())
    }
}
