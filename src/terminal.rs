use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use tracing::debug;

use crate::graphics::{Canvas, Rgb};
use crate::tracker::Frontend;

/// Window title
pub const TITLE: &str = "SunPosition";

const QUIT_HINT: &str = "  (Esc/q: quit)";
const FALLBACK_SIZE: (u16, u16) = (80, 24);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// How the canvas maps onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    /// Sub-pixel columns, one per terminal column
    pub grid_width: usize,
    /// Sub-pixel rows, two per terminal row
    pub grid_height: usize,
    /// Left margin in terminal columns
    pub offset: u16,
    /// Canvas pixels per sub-pixel
    pub scale: f64,
}

impl FrameLayout {
    /// Fits a canvas into `cols` x `rows` cells, keeping the last row for status
    pub fn fit(canvas_width: usize, canvas_height: usize, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1) as usize;
        let sub_rows = (rows.saturating_sub(1).max(1) as usize) * 2;
        let scale = (canvas_width as f64 / cols as f64).max(canvas_height as f64 / sub_rows as f64);
        let grid_width = ((canvas_width as f64 / scale).round() as usize).clamp(1, cols);
        // Whole terminal rows only
        let grid_height = ((canvas_height as f64 / scale).round() as usize).clamp(2, sub_rows) & !1;
        FrameLayout {
            grid_width,
            grid_height,
            offset: ((cols - grid_width) / 2) as u16,
            scale,
        }
    }

    /// Terminal cell for a canvas position
    pub fn cell(&self, position: [f64; 2]) -> (u16, u16) {
        let col = (position[0].max(0.0) / self.scale) as u16;
        let row = (position[1].max(0.0) / self.scale / 2.0) as u16;
        (self.offset.saturating_add(col), row)
    }
}

/// Whether an input event asks the loop to stop
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

/// Terminal presenter drawing frames with half-block cells
pub struct Terminal<W: Write> {
    out: W,
    /// Fixed size instead of querying the terminal
    size: Option<(u16, u16)>,
    raw: bool,
}

impl Terminal<Stdout> {
    /// Switches stdout to the alternate screen in raw mode
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut term = Terminal {
            out: io::stdout(),
            size: None,
            raw: true,
        };
        execute!(
            term.out,
            EnterAlternateScreen,
            Hide,
            SetTitle(TITLE),
            Clear(ClearType::All)
        )?;
        debug!("terminal entered");
        Ok(term)
    }
}

impl<W: Write> Terminal<W> {
    /// Presenter over an arbitrary writer with a fixed size, without raw mode
    pub fn with_writer(out: W, cols: u16, rows: u16) -> Self {
        Terminal {
            out,
            size: Some((cols, rows)),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn size(&self) -> (u16, u16) {
        self.size
            .or_else(|| termsize::get().map(|size| (size.cols, size.rows)))
            .unwrap_or(FALLBACK_SIZE)
    }

    /// Writes a whole frame inside one synchronized update and flushes once
    pub fn draw(&mut self, canvas: &Canvas, status: &str) -> io::Result<()> {
        let (cols, rows) = self.size();
        let layout = FrameLayout::fit(canvas.width(), canvas.height(), cols, rows);
        let cells = canvas.downsample(layout.grid_width, layout.grid_height);

        queue!(self.out, BeginSynchronizedUpdate, ResetColor, Clear(ClearType::All))?;

        for row in 0..layout.grid_height / 2 {
            queue!(self.out, MoveTo(layout.offset, row as u16))?;
            let mut current: Option<(Rgb, Rgb)> = None;
            for col in 0..layout.grid_width {
                let top = cells[2 * row * layout.grid_width + col];
                let bottom = cells[(2 * row + 1) * layout.grid_width + col];
                if current != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(top.into()),
                        SetBackgroundColor(bottom.into())
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print('▀'))?;
            }
        }

        let right_edge = layout.offset as usize + layout.grid_width;
        let last_row = (layout.grid_height / 2) as u16;
        for label in canvas.labels() {
            let (col, row) = layout.cell(label.position);
            if row >= last_row || col as usize >= right_edge {
                continue;
            }
            let text: String = label.text.chars().take(right_edge - col as usize).collect();
            queue!(
                self.out,
                MoveTo(col, row),
                SetForegroundColor(label.color.into()),
                SetBackgroundColor(canvas.background().into()),
                Print(text)
            )?;
        }

        let line: String = format!("{status}{QUIT_HINT}")
            .chars()
            .take(cols as usize)
            .collect();
        queue!(
            self.out,
            ResetColor,
            MoveTo(0, rows.saturating_sub(1)),
            Print(line),
            EndSynchronizedUpdate
        )?;
        self.out.flush()
    }

    /// Leaves the alternate screen and raw mode if they were entered
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl<W: Write> Frontend for Terminal<W> {
    fn present(&mut self, canvas: &Canvas, status: &str) -> io::Result<()> {
        self.draw(canvas, status)
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            quit |= is_quit(&event::read()?);
        }
        Ok(quit)
    }

    fn sleep(&mut self, interval: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }
            if event::poll(remaining)? && is_quit(&event::read()?) {
                return Ok(true);
            }
        }
    }
}
