//! # Output Configuration
//!
//! Controls how the CLI decorates the progress lines it prints. CI logs are
//! often rendered without a TTY, so decoration follows the usual
//! conventions:
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables decoration when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables decoration
//! - `CLICOLOR_FORCE=1` - Forces decoration even in non-TTY
//! - `TERM=dumb` - Disables decoration for dumb terminals

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` and `never` are taken at face value; anything else detects
    /// support from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Prefix for a progress line of the given kind.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    /// Render `text` in the color associated with `marker`, if enabled.
    pub fn paint(&self, marker: Marker, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let style = match marker {
            Marker::Compare | Marker::Files => console::Style::new().cyan(),
            Marker::Done => console::Style::new().green(),
            Marker::Halt => console::Style::new().yellow(),
            Marker::Error => console::Style::new().red().bold(),
        };
        style.force_styling(true).apply_to(text).to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kinds of progress lines printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Which revisions are compared
    Compare,
    /// A list of fragment files
    Files,
    /// Output written
    Done,
    /// Pipeline halted
    Halt,
    /// Fatal problem
    Error,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Compare => "🔍",
            Marker::Files => "📄",
            Marker::Done => "✅",
            Marker::Halt => "⏹️",
            Marker::Error => "❌",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Compare => "[COMPARE]",
            Marker::Files => "[FILES]",
            Marker::Done => "[OK]",
            Marker::Halt => "[HALT]",
            Marker::Error => "[ERROR]",
        }
    }
}
