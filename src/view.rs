use std::{
    fmt,
    io::{self, BufRead, Write},
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{clear, cursor};

use crate::{sim::Pace, Grid};

use canvas::Canvas;
mod canvas;

/// Characters used when rendering a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: '■',
            dead: ' ',
        }
    }
}

impl Grid {
    /// One line per row of the live bounding box, newline terminated.
    pub fn render(&self, glyphs: &Glyphs) -> String {
        let Some(bounds) = self.bounds() else {
            return String::new();
        };
        let mut canvas = Canvas::covering(bounds, glyphs.dead);
        canvas.layer(|pos| self.is_alive(pos).then_some(glyphs.alive));
        canvas.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Glyphs::default()))
    }
}

/// Writes a rendered generation followed by a blank separator line.
pub fn write_frame(out: &mut impl Write, grid: &Grid, glyphs: &Glyphs, clear: bool) -> io::Result<()> {
    if clear {
        write!(out, "{}{}", clear::All, cursor::Goto(1, 1))?;
    }
    writeln!(out, "{}", grid.render(glyphs))?;
    out.flush()
}

/// Pacer blocking until a line is read from `input`.
pub struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl Prompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Pace for Prompt<R> {
    fn pace(&mut self) -> io::Result<()> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while waiting")),
            _ => Ok(()),
        }
    }
}

/// Cosmetic animation drawn in place while the driver waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    pub frames: Vec<String>,
    pub interval: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            frames: ["-", "\\", "|", "/"].map(String::from).to_vec(),
            interval: Duration::from_millis(100),
        }
    }
}

impl Spinner {
    pub fn spawn<W>(&self, out: W) -> SpinnerHandle<W>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let frames = self.frames.clone();
        let interval = self.interval;
        let thread = thread::spawn(move || spin_loop(receiver, frames, interval, out));
        SpinnerHandle { sender, thread }
    }
}

pub struct SpinnerHandle<W> {
    sender: mpsc::Sender<()>,
    thread: JoinHandle<io::Result<W>>,
}

impl<W> SpinnerHandle<W> {
    /// Stops the animation and waits for it to erase itself, handing the writer back.
    pub fn stop(self) -> io::Result<W> {
        // the thread may already be gone after a failed write
        let _ = self.sender.send(());
        self.thread
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "spinner thread panicked"))?
    }
}

fn spin_loop<W: Write>(
    receiver: mpsc::Receiver<()>,
    frames: Vec<String>,
    interval: Duration,
    mut out: W,
) -> io::Result<W> {
    let mut index = 0;
    let mut drawn = 0;
    while let Err(RecvTimeoutError::Timeout) = receiver.recv_timeout(interval) {
        let Some(frame) = frames.get(index) else {
            continue;
        };
        index = (index + 1) % frames.len();
        drawn = frame.chars().count();
        write!(out, "{frame}")?;
        back(&mut out, drawn)?;
        out.flush()?;
    }
    write!(out, "{}", " ".repeat(drawn))?;
    back(&mut out, drawn)?;
    out.flush()?;
    Ok(out)
}

fn back(out: &mut impl Write, width: usize) -> io::Result<()> {
    if width > 0 {
        write!(out, "{}", cursor::Left(width as u16))?;
    }
    Ok(())
}
