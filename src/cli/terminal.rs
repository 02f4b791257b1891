//! Terminal capability detection and styling

use owo_colors::{OwoColorize, Style, colors::css};

/// Whether stdout accepts ANSI colours.
fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is narrower than 60 columns.
///
/// Tables switch to a stacked layout when it is.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 60)
}

fn paint(text: &str, style: Style) -> String {
    if supports_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for styling report output
pub trait Colorize {
    /// Green, for checks that passed.
    fn success(&self) -> String;
    /// Amber, for values that need attention.
    fn warning(&self) -> String;
    /// Blue, for identifiers and headings.
    fn info(&self) -> String;
    /// Dimmed, for placeholders and hints.
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().fg::<css::Green>())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().fg::<css::Orange>())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Style::new().fg::<css::LightBlue>())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}
