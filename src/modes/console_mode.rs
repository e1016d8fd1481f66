use crossterm::{
    cursor::{self, Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use fps_clock::FpsClock;
use tracing::info;

use std::{
    io::{stdout, Stdout, Write},
    time::Duration,
};

use crate::{
    data::*,
    graphics::{
        blend::{grayb, Argb, Blend},
        Canvas,
    },
    modes::Mode,
};

pub type Flusher = fn(&Canvas, (u16, u16), &mut Stdout) -> std::io::Result<()>;

// Channel difference tolerated inside one printed run.
const ERROR: u8 = 6;
const CHARSET_OPAC_EXP: &[u8] = b" `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ\
    5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// A run of cells sharing (nearly) the same colors.
struct ColoredString {
    string: String,
    fg: Argb,
    bg: Argb,
}

fn close(c1: Argb, c2: Argb) -> bool {
    let [_, r, g, b] = c1.decompose();
    let [_, nr, ng, nb] = c2.decompose();

    r.abs_diff(nr) <= ERROR && g.abs_diff(ng) <= ERROR && b.abs_diff(nb) <= ERROR
}

/// Compress similar cells into one string with the same
/// color, so fewer escape codes get written.
#[derive(Default)]
struct StyledLine(Vec<ColoredString>);

impl StyledLine {
    fn push(&mut self, ch: char, fg: Argb, bg: Argb) {
        if let Some(last) = self.0.last_mut() {
            if close(last.fg, fg) && close(last.bg, bg) {
                last.string.push(ch);
                return;
            }
        }

        self.0.push(ColoredString {
            string: ch.to_string(),
            fg,
            bg,
        });
    }

    fn queue_print(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        for ColoredString { string, fg, bg } in self.0.drain(..) {
            queue!(
                stdout,
                SetForegroundColor(rgb(fg)),
                SetBackgroundColor(rgb(bg)),
                Print(string)
            )?;
        }

        Ok(())
    }
}

fn rgb(c: Argb) -> Color {
    let [_, r, g, b] = c.decompose();
    Color::Rgb { r, g, b }
}

/// Nearest neighbour lookup of the canvas on a `cols x rows` grid.
fn sample(pix: &Canvas, x: usize, y: usize, cols: usize, rows: usize) -> Argb {
    let px = x * pix.width() / cols.max(1);
    let py = y * pix.height() / rows.max(1);

    pix.pixel_xy(px, py).unwrap_or(Argb::compose([0xFF, 0, 0, 0]))
}

fn to_ascii_art(table: &[u8], x: usize) -> char {
    table[(x * table.len()) >> 8] as char
}

impl Mode {
    pub fn get_flusher(&self) -> Flusher {
        match *self {
            Mode::ConAscii => print_ascii,
            _ => print_block,
        }
    }
}

/// Two vertical pixels per cell: the upper one in the foreground
/// of a half block, the lower one in the background.
pub fn print_block(pix: &Canvas, grid: (u16, u16), stdout: &mut Stdout) -> std::io::Result<()> {
    let (cols, rows) = (grid.0 as usize, grid.1 as usize);
    let mut line = StyledLine::default();

    for y in 0..rows {
        queue!(stdout, cursor::MoveTo(0, y as u16))?;

        for x in 0..cols {
            let top = sample(pix, x, y * 2, cols, rows * 2);
            let bottom = sample(pix, x, y * 2 + 1, cols, rows * 2);

            line.push('▀', top, bottom);
        }

        line.queue_print(stdout)?;
    }

    Ok(())
}

pub fn print_ascii(pix: &Canvas, grid: (u16, u16), stdout: &mut Stdout) -> std::io::Result<()> {
    let (cols, rows) = (grid.0 as usize, grid.1 as usize);
    let mut line = StyledLine::default();
    let black = Argb::compose([0xFF, 0, 0, 0]);

    for y in 0..rows {
        queue!(stdout, cursor::MoveTo(0, y as u16))?;

        for x in 0..cols {
            let c = sample(pix, x, y, cols, rows);
            let [_, r, g, b] = c.decompose();

            line.push(to_ascii_art(CHARSET_OPAC_EXP, grayb(r, g, b) as usize), c, black);
        }

        line.queue_print(stdout)?;
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Drains pending input. Returns true when the user asked to quit.
fn control_key_events_con(grid: &mut (u16, u16), stdout: &mut Stdout) -> std::io::Result<bool> {
    while poll(Duration::ZERO)? {
        match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(&key) => {
                return Ok(true);
            }

            Event::Resize(w, h) => {
                *grid = (w, h);
                queue!(stdout, Clear(ClearType::All))?;
            }

            _ => {}
        }
    }

    Ok(false)
}

fn run(prog: &mut Program, stdout: &mut Stdout) -> std::io::Result<()> {
    let flusher = prog.mode().get_flusher();
    let mut grid = size()?;

    let fps = (prog.get_milli_hz() / 1000).max(1);
    let mut clock = FpsClock::new(fps);

    info!(fps, cols = grid.0, rows = grid.1, "drawing into the terminal");

    queue!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    loop {
        if control_key_events_con(&mut grid, stdout)? {
            break;
        }

        prog.update();
        prog.render();

        flusher(&prog.pix, grid, stdout)?;
        stdout.flush()?;

        clock.tick();
    }

    Ok(())
}

pub fn con_main(mut prog: Program) -> std::io::Result<()> {
    prog.print_startup_info();

    let mut stdout = stdout();

    enable_raw_mode()?;

    let result = run(&mut prog, &mut stdout);

    // Restore the terminal even when drawing failed.
    let _ = queue!(stdout, ResetColor, LeaveAlternateScreen, Show);
    let _ = stdout.flush();
    disable_raw_mode()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similar_cells_share_a_run() {
        let mut line = StyledLine::default();

        line.push('a', 0xFF_10_10_10, 0);
        line.push('b', 0xFF_12_10_10, 0);
        line.push('c', 0xFF_80_10_10, 0);

        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0].string, "ab");
    }

    #[test]
    fn ascii_ramp_covers_the_table() {
        assert_eq!(to_ascii_art(CHARSET_OPAC_EXP, 0), ' ');
        assert_eq!(to_ascii_art(CHARSET_OPAC_EXP, 255), '@');
    }

    #[test]
    fn sampling_stretches_the_canvas() {
        let mut canvas = Canvas::new(4, 2);
        canvas.paint_backdrop(&crate::field::surface::BackgroundStyle::default());
        canvas.begin_frame();

        assert_eq!(sample(&canvas, 0, 0, 2, 1), canvas.pixel(0));
        assert_eq!(sample(&canvas, 1, 0, 2, 1), canvas.pixel(2));
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_quit(&key));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
