//! Rendering seam between run logic and the terminal.
//!
//! The orchestrator and reporter only ever talk to a [`Render`]
//! implementation, never to stdout directly. `ConsoleRender` is the real
//! surface; `BufferRender` captures lines for deterministic assertions and
//! `NullRender` silences progress narration when stdout must carry pure JSON.

use crate::core::report::CheckOutcome;
use colored::Colorize;

pub trait Render {
    fn line(&mut self, text: &str);

    fn header(&mut self, title: &str) {
        self.line(&format!("=== {} ===", title));
    }

    fn step(&mut self, text: &str) {
        self.line(&format!("▸ {}", text));
    }

    fn success(&mut self, text: &str) {
        self.line(&format!("✓ {}", text));
    }

    fn warn(&mut self, text: &str) {
        self.line(&format!("⚠ {}", text));
    }

    fn error(&mut self, text: &str) {
        self.line(&format!("✗ {}", text));
    }

    fn outcome_row(&mut self, outcome: CheckOutcome, text: &str) {
        self.line(&format!("[{:<7}] {}", outcome.label(), text));
    }
}

/// Renders to stdout with color. `colored` already downgrades to plain text
/// on non-tty output and under NO_COLOR.
#[derive(Debug, Default)]
pub struct ConsoleRender;

impl Render for ConsoleRender {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn header(&mut self, title: &str) {
        println!("{}", format!("=== {} ===", title).bright_white().bold());
    }

    fn step(&mut self, text: &str) {
        println!("{} {}", "▸".bright_cyan(), text);
    }

    fn success(&mut self, text: &str) {
        println!("{} {}", "✓".bright_green(), text);
    }

    fn warn(&mut self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text);
    }

    fn error(&mut self, text: &str) {
        println!("{} {}", "✗".bright_red(), text);
    }

    fn outcome_row(&mut self, outcome: CheckOutcome, text: &str) {
        let label = format!("[{:<7}]", outcome.label());
        let painted = match outcome {
            CheckOutcome::Passed => label.bright_green(),
            CheckOutcome::Failed | CheckOutcome::Errored => label.bright_red(),
            CheckOutcome::TimedOut => label.bright_red().bold(),
            CheckOutcome::Skipped => label.bright_yellow(),
        };
        println!("{} {}", painted, text);
    }
}

/// Collects plain lines in memory. Used by tests.
#[derive(Debug, Default)]
pub struct BufferRender {
    pub lines: Vec<String>,
}

impl Render for BufferRender {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullRender;

impl Render for NullRender {
    fn line(&mut self, _text: &str) {}
}
