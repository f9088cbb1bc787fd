#[cfg(feature = "tui")]
use crossterm::{
    event::{poll, read, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::error::Error;
use std::io::{self, IsTerminal, Write};
#[cfg(feature = "tui")]
use std::time::Duration;

/// Decides whether to go ahead with an optional step, e.g. writing the error report.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Answers every question the same way without asking.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, question: &str) -> bool {
        log::debug!("auto-answering {:?} with {}", question, self.0);
        self.0
    }
}

/// Asks on the terminal. Anything but `y` is a no, and so is a non-interactive stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> bool {
        match prompt(&format!("\n{} [y/N]: ", question)) {
            Ok(answer) => answer.as_deref().is_some_and(is_yes),
            Err(e) => {
                log::warn!("prompt failed: {}", e);
                false
            }
        }
    }
}

/// Prints `message` and reads the answer.
/// Returns `Ok(None)` when stdin is not a terminal or nothing was typed.
pub fn prompt(message: &str) -> Result<Option<String>, Box<dyn Error>> {
    if !io::stdin().is_terminal() {
        println!("{}", message.trim_end());
        println!("Non-interactive mode detected; skipping prompt.");
        return Ok(None);
    }
    print!("{}", message);
    io::stdout().flush()?;

    // With the "tui" feature a single key press answers.
    #[cfg(feature = "tui")]
    {
        while poll(Duration::from_millis(0))? {
            let _ = read()?;
        }
        enable_raw_mode()?;
        let answer = loop {
            match read() {
                Ok(Event::Key(key)) => match key.code {
                    KeyCode::Char(c) => break Ok(Some(c.to_string())),
                    KeyCode::Enter | KeyCode::Esc => break Ok(None),
                    _ => continue,
                },
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        disable_raw_mode()?;
        println!();
        Ok(answer?)
    }

    // Otherwise, use normal line input.
    #[cfg(not(feature = "tui"))]
    {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let line = line.trim();
        Ok((!line.is_empty()).then(|| line.to_string()))
    }
}

/// Only a lone `y` (either case) is a yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
