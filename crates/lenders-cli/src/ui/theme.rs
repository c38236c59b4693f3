//! Theme definitions for styles, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Separator between inline fields.
pub const DOT: SymbolPair = SymbolPair::new("|", "\u{00B7}");

/// Marker for overdue items.
pub const OVERDUE: SymbolPair = SymbolPair::new("!", "\u{23F0}");

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",
            Self::Warn => "[\u{26A0}]",
            Self::Err => "[\u{2717}]",
            Self::Info => "[\u{2139}]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Err => Style::new().red(),
            Self::Info => Style::new().cyan(),
        }
    }
}

/// Common text styles.
pub mod styles {
    use owo_colors::Style;

    /// Labels and metadata
    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    /// Titles and values
    pub fn bold() -> Style {
        Style::new().bold()
    }

    /// Overdue markers
    pub fn alert() -> Style {
        Style::new().red().bold()
    }

    /// Tags
    pub fn tag() -> Style {
        Style::new().cyan()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
