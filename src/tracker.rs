use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ProviderError;
use crate::geometry::Geometry;
use crate::graphics::{Canvas, WHITE};
use crate::provider::PositionProvider;
use crate::scene::Scene;
use crate::state::{Location, Phase, SunState};

/// Display and input side of the update loop
pub trait Frontend {
    /// Shows a fully composed frame together with a one-line status
    fn present(&mut self, canvas: &Canvas, status: &str) -> io::Result<()>;

    /// Drains pending input without blocking; `true` when quit was requested
    fn poll_quit(&mut self) -> io::Result<bool>;

    /// Blocks until the next tick is due; `true` when quit was requested meanwhile
    fn sleep(&mut self, interval: Duration) -> io::Result<bool>;
}

/// Longest uninterrupted nap while waiting for the next headless tick
const HEADLESS_SLICE: Duration = Duration::from_millis(50);

/// Frontend that draws nothing; quits when its flag is raised
#[derive(Debug, Default)]
pub struct Headless {
    quit: Arc<AtomicBool>,
}

impl Headless {
    /// Headless frontend that quits on Ctrl+C / SIGINT.
    ///
    /// Installs a process-wide handler, so call it at most once.
    pub fn on_interrupt() -> Result<Self, ctrlc::Error> {
        let headless = Headless::default();
        let quit = headless.quit_flag();
        ctrlc::set_handler(move || quit.store(true, Ordering::SeqCst))?;
        Ok(headless)
    }

    /// Shared flag; storing `true` stops the loop at the next check
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }
}

impl Frontend for Headless {
    fn present(&mut self, _canvas: &Canvas, _status: &str) -> io::Result<()> {
        Ok(())
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        Ok(self.quit_requested())
    }

    fn sleep(&mut self, interval: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + interval;
        loop {
            if self.quit_requested() {
                return Ok(true);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }
            thread::sleep(remaining.min(HEADLESS_SLICE));
        }
    }
}

/// Loop pacing
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Time between ticks
    pub interval: Duration,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            interval: Duration::from_secs(1),
            max_ticks: None,
        }
    }
}

/// Polls the sun position and redraws the diagrams once per tick
pub struct Tracker<P> {
    provider: P,
    location: Location,
    scene: Scene,
    canvas: Canvas,
    sun: SunState,
    phase: Phase,
    status: String,
    ticks: u64,
}

impl<P: PositionProvider> Tracker<P> {
    pub fn new(provider: P, location: Location, scene: Scene) -> Self {
        let Geometry { width, height, .. } = *scene.geometry();
        Tracker {
            provider,
            location,
            scene,
            canvas: Canvas::new(width, height, WHITE),
            sun: SunState::default(),
            phase: Phase::Running,
            status: String::new(),
            ticks: 0,
        }
    }

    pub fn sun(&self) -> SunState {
        self.sun
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Latest log line, shown in the status row
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queries the provider for `now` and stores the result.
    ///
    /// On failure the previous position is kept and the error is returned
    /// after being logged.
    pub fn update(&mut self, now: DateTime<Utc>) -> Result<SunState, ProviderError> {
        let stamp = now
            .with_timezone(&self.location.timezone)
            .format("%Y-%m-%d %H:%M:%S");
        match self.provider.position(&self.location, now) {
            Ok(sun) => {
                self.sun = sun;
                self.status = format!(
                    "[{stamp}] Altitude: {:.2} deg, Azimuth: {:.2} deg",
                    sun.altitude, sun.azimuth
                );
                info!(altitude = sun.altitude, azimuth = sun.azimuth, "{}", self.status);
                Ok(sun)
            }
            Err(err) => {
                self.status = format!("[{stamp}] An error occurred: {err}");
                warn!(error = %err, "{}", self.status);
                Err(err)
            }
        }
    }

    /// Runs one iteration: update, render, present, then input
    pub fn tick<F: Frontend>(&mut self, now: DateTime<Utc>, frontend: &mut F) -> io::Result<Phase> {
        if self.phase == Phase::Stopped {
            return Ok(Phase::Stopped);
        }
        self.ticks += 1;

        // Provider failures are already logged; the stale position is drawn
        let _ = self.update(now);

        self.scene.render(&self.sun, &mut self.canvas);
        frontend.present(&self.canvas, &self.status)?;

        if frontend.poll_quit()? {
            self.stop();
        }
        Ok(self.phase)
    }

    /// Ticks until the frontend asks to quit or the tick budget runs out
    pub fn run<F: Frontend>(&mut self, frontend: &mut F, options: RunOptions) -> io::Result<()> {
        info!(
            latitude = self.location.latitude,
            longitude = self.location.longitude,
            timezone = %self.location.timezone,
            "tracking sun position"
        );
        while self.phase == Phase::Running {
            if self.tick(Utc::now(), frontend)? == Phase::Stopped {
                break;
            }
            if options.max_ticks.is_some_and(|max| self.ticks >= max) {
                debug!(ticks = self.ticks, "tick limit reached");
                self.stop();
                break;
            }
            if frontend.sleep(options.interval)? {
                self.stop();
            }
        }
        Ok(())
    }

    fn stop(&mut self) {
        debug!(ticks = self.ticks, "stopping");
        self.phase = Phase::Stopped;
    }
}
