//! Crossterm rendering of a grid, driven only by search events.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{GridModel, Pos};
use gridpath_search::{SearchEvent, SearchStats};

/// How a cell is painted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shade {
    Empty,
    Wall,
    Start,
    End,
    Frontier,
    Visited,
    Path,
}

impl Shade {
    fn color(self) -> Color {
        match self {
            Self::Empty => Color::Rgb { r: 40, g: 40, b: 48 },
            Self::Wall => Color::Rgb { r: 120, g: 120, b: 130 },
            Self::Start => Color::Rgb { r: 34, g: 197, b: 94 },
            Self::End => Color::Rgb { r: 239, g: 68, b: 68 },
            Self::Frontier => Color::Rgb { r: 30, g: 64, b: 120 },
            Self::Visited => Color::Rgb { r: 56, g: 130, b: 220 },
            Self::Path => Color::Rgb { r: 250, g: 204, b: 21 },
        }
    }
}

/// Terminal surface for one grid. Restores the terminal when dropped.
pub struct TerminalView {
    out: Stdout,
    size: i32,
    start: Pos,
    end: Pos,
}

impl TerminalView {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn open(grid: &GridModel) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        queue!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        out.flush()?;
        Ok(Self {
            out,
            size: grid.size(),
            start: grid.start(),
            end: grid.end(),
        })
    }

    /// Paint every cell from the grid's current flags.
    pub fn draw_grid(&mut self, grid: &GridModel) -> io::Result<()> {
        for p in grid.range().iter() {
            let Some(c) = grid.cell(p) else {
                continue;
            };
            let shade = if c.is_start() {
                Shade::Start
            } else if c.is_end() {
                Shade::End
            } else if c.is_path() {
                Shade::Path
            } else if c.is_visited() {
                Shade::Visited
            } else if c.is_wall() {
                Shade::Wall
            } else {
                Shade::Empty
            };
            self.put(p, shade)?;
        }
        self.out.flush()
    }

    /// Update the cells named by one step's events.
    pub fn apply(&mut self, events: &[SearchEvent]) -> io::Result<()> {
        let mut visited = None;
        for ev in events {
            let Some(p) = ev.pos() else {
                continue;
            };
            if let SearchEvent::Visited { visited_count, .. } = *ev {
                self.paint(p, Shade::Visited)?;
                visited = Some(visited_count);
            } else {
                self.paint(p, Shade::Frontier)?;
            }
        }
        if let Some(n) = visited {
            self.status(&format!("visited {n}  (q to stop)"))?;
        }
        self.out.flush()
    }

    /// Paint a cell, leaving start and end in their role colours.
    pub fn paint(&mut self, p: Pos, shade: Shade) -> io::Result<()> {
        if p == self.start || p == self.end {
            return Ok(());
        }
        self.put(p, shade)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Write a line of text under the grid.
    pub fn status(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, self.size as u16 + 1),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    /// Final statistics line.
    pub fn show_stats(&mut self, stats: &SearchStats) -> io::Result<()> {
        let distance = stats
            .total_distance
            .map_or_else(|| "inf".to_string(), |d| d.to_string());
        self.status(&format!(
            "visited {}  discarded {}  path length {}  distance {}  (any key to exit)",
            stats.visited, stats.discarded, stats.path_length, distance
        ))?;
        self.out.flush()
    }

    /// Non-blocking check for a quit key.
    pub fn quit_requested(&self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Block until any key is pressed.
    pub fn wait_key(&self) -> io::Result<()> {
        loop {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }

    fn put(&mut self, p: Pos, shade: Shade) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(p.col as u16 * 2, p.row as u16),
            SetForegroundColor(shade.color()),
            SetBackgroundColor(shade.color()),
            Print("  ")
        )
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = queue!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}
