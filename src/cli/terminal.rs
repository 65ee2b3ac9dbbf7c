//! Coloured terminal output, disabled when stdout is not a colour terminal.

use owo_colors::{colors::css, OwoColorize};

fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// How a piece of output should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Course headings
    Heading,
    /// Operators and empty requisites
    Muted,
    /// Unresolved subjects and failures
    Warning,
    /// Summaries of successful work
    Done,
}

/// Extension trait for painting text in a [`Tone`].
pub trait Paint {
    /// Returns the text styled for `tone`, or unstyled without colour support.
    fn paint(&self, tone: Tone) -> String;
}

impl<T: AsRef<str> + ?Sized> Paint for T {
    fn paint(&self, tone: Tone) -> String {
        let text = self.as_ref();
        if !color_enabled() {
            return text.to_string();
        }
        match tone {
            Tone::Heading => text.fg::<css::LightBlue>().bold().to_string(),
            Tone::Muted => text.dimmed().to_string(),
            Tone::Warning => text.fg::<css::Orange>().to_string(),
            Tone::Done => text.fg::<css::Green>().to_string(),
        }
    }
}
