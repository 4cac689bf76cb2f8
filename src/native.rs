//! Terminal front-end.
//!
//! Reads commands line by line (each character is one key press, an empty
//! line flips the color) and paints the widget with 24-bit ANSI colors.
//! There is no system clipboard here: "copy" prints the bare hex on its own
//! line so it can be selected or piped.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use web_time::Instant;

use crate::app::FlipperApp;
use crate::color::Rgb;
use crate::config::AppConfig;
use crate::copy_feedback::CopyOutcome;
use crate::error::{ClipboardError, FrontendError};
use crate::message::{CopyMessage, Effect, Message};
use crate::view::{RenderSink, ViewModel};

/// Width of the big swatch, in columns.
const SWATCH_WIDTH: usize = 13;

fn term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Draws view models to any writer.
///
/// `RenderSink::render` cannot fail, so the first I/O error is kept and
/// surfaced by [`TerminalRenderer::take_error`].
pub struct TerminalRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn draw(&mut self, view: &ViewModel) -> io::Result<()> {
        let bg = term_color(view.color);
        let fg = term_color(view.text_tone.rgb());
        let blank = " ".repeat(SWATCH_WIDTH);
        let labels = [&view.hex_label, &view.rgb_label, &view.hsl_label];

        queue!(self.out, Print("\n"))?;
        for (row, label) in labels.iter().enumerate() {
            let cell = if row == 1 {
                format!("{:^width$}", view.hex, width = SWATCH_WIDTH)
            } else {
                blank.clone()
            };
            queue!(
                self.out,
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(cell),
                ResetColor,
                Print(format!("  {label}\n"))
            )?;
        }

        queue!(
            self.out,
            Print(format!("{}  [{}]\n", view.lock_label, view.copy_label)),
            Print("history:")
        )?;
        for swatch in &view.history {
            queue!(
                self.out,
                Print(format!(" {}", swatch.index + 1)),
                SetBackgroundColor(term_color(swatch.color)),
                Print("   "),
                ResetColor
            )?;
        }
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Print the hex as the "clipboard" of a terminal session.
    pub fn write_clipboard(&mut self, hex: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{hex}")
            .and_then(|()| self.out.flush())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, view: &ViewModel) {
        if let Err(e) = self.draw(view) {
            log::warn!("Failed to draw: {}", e);
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

/// Run the terminal front-end on stdin/stdout until quit or end of input.
pub fn run(config: &AppConfig) -> Result<(), FrontendError> {
    let mut app = FlipperApp::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(&mut app, stdin.lock(), stdout.lock())
}

/// Drive `app` from `input`, drawing to `output`.
pub fn run_with<R: BufRead, W: Write>(
    app: &mut FlipperApp,
    input: R,
    output: W,
) -> Result<(), FrontendError> {
    let mut terminal = TerminalRenderer::new(output);
    let mut revert_at: Option<Instant> = None;

    print_help(app, &mut terminal)?;
    app.present(&mut terminal);
    terminal.take_error()?;

    for line in input.lines() {
        let line = line?;

        if revert_at.is_some_and(|deadline| Instant::now() >= deadline) {
            revert_at = None;
            let expired = Message::Copy(CopyMessage::Expired);
            dispatch(app, expired, &mut terminal, &mut revert_at)?;
        }

        let keys: Vec<char> = match line.trim() {
            "" => vec![app.keybindings().generate],
            keys => keys.chars().filter(|c| !c.is_whitespace()).collect(),
        };

        for key in keys {
            if app.keybindings().is_quit(key) {
                log::debug!("Quit requested");
                return Ok(());
            }
            match app.keybindings().message_for_key(key) {
                Some(message) => dispatch(app, message, &mut terminal, &mut revert_at)?,
                None => {
                    log::debug!("Unbound key {:?}", key);
                    print_help(app, &mut terminal)?;
                }
            }
        }
    }

    Ok(())
}

/// Handle one message and every message its effects produce.
fn dispatch<W: Write>(
    app: &mut FlipperApp,
    message: Message,
    terminal: &mut TerminalRenderer<W>,
    revert_at: &mut Option<Instant>,
) -> Result<(), FrontendError> {
    let mut queue = VecDeque::from([message]);

    while let Some(message) = queue.pop_front() {
        for effect in app.update(message) {
            match effect {
                Effect::Render => {
                    app.present(terminal);
                    terminal.take_error()?;
                }
                Effect::WriteClipboard(hex) => {
                    let outcome = match terminal.write_clipboard(&hex) {
                        Ok(()) => CopyOutcome::Copied,
                        Err(e) => {
                            log::warn!("{}", e);
                            CopyOutcome::Failed
                        }
                    };
                    queue.push_back(Message::Copy(CopyMessage::Finished(outcome)));
                }
                Effect::ScheduleRevert(delay) => {
                    *revert_at = Some(Instant::now() + delay);
                }
            }
        }
    }

    Ok(())
}

fn print_help<W: Write>(
    app: &FlipperApp,
    terminal: &mut TerminalRenderer<W>,
) -> Result<(), FrontendError> {
    let keys = app.keybindings();
    writeln!(
        terminal.out,
        "keys: {} / enter = flip, {} = lock, {} = shade, {} = copy, 1-8 = history, {} = quit",
        keys.generate, keys.lock, keys.shade, keys.copy, keys.quit
    )?;
    Ok(())
}
