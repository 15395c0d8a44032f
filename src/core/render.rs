//! Colorized rendering of levels and logger names for console output

use super::log_level::LogLevel;
use colored::{Color, ColoredString, Colorize};

/// Column width logger names are padded to
pub const NAME_COLUMN_WIDTH: usize = 12;

/// Maps a severity to its display text and color.
///
/// Total over [`LogLevel`]; raw values outside the known range render as
/// `INVALID` so rendering never fails.
pub struct LevelRenderer;

impl LevelRenderer {
    pub fn color(level: LogLevel) -> Color {
        match level {
            LogLevel::Debug => Color::BrightWhite,
            LogLevel::Info => Color::BrightCyan,
            LogLevel::Warn => Color::BrightYellow,
            LogLevel::Error | LogLevel::DPanic => Color::BrightRed,
            LogLevel::Panic | LogLevel::Fatal | LogLevel::Invalid => Color::BrightMagenta,
        }
    }

    /// Level text without color
    pub fn plain(level: LogLevel) -> &'static str {
        level.to_str()
    }

    pub fn render(level: LogLevel) -> ColoredString {
        Self::plain(level).color(Self::color(level))
    }

    pub fn render_raw(raw: i8) -> ColoredString {
        Self::render(LogLevel::from_raw(raw))
    }
}

/// Pads logger names to a fixed column and paints them green.
pub struct NameRenderer;

impl NameRenderer {
    pub const COLOR: Color = Color::BrightGreen;

    /// Right-pad `name` with spaces to [`NAME_COLUMN_WIDTH`] characters.
    /// Longer names are returned unchanged.
    pub fn pad(name: &str) -> String {
        format!("{:<width$}", name, width = NAME_COLUMN_WIDTH)
    }

    pub fn render(name: &str) -> ColoredString {
        Self::pad(name).color(Self::COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colors() {
        assert_eq!(LevelRenderer::color(LogLevel::Debug), Color::BrightWhite);
        assert_eq!(LevelRenderer::color(LogLevel::Info), Color::BrightCyan);
        assert_eq!(LevelRenderer::color(LogLevel::Warn), Color::BrightYellow);
        assert_eq!(LevelRenderer::color(LogLevel::Error), Color::BrightRed);
        assert_eq!(LevelRenderer::color(LogLevel::DPanic), Color::BrightRed);
        assert_eq!(LevelRenderer::color(LogLevel::Panic), Color::BrightMagenta);
        assert_eq!(LevelRenderer::color(LogLevel::Fatal), Color::BrightMagenta);
        assert_eq!(LevelRenderer::color(LogLevel::Invalid), Color::BrightMagenta);
    }

    #[test]
    fn test_render_carries_text_and_color() {
        let rendered = LevelRenderer::render(LogLevel::Warn);
        assert_eq!(&*rendered, "WARN");
        assert_eq!(rendered.fgcolor(), Some(Color::BrightYellow));
    }

    #[test]
    fn test_unknown_raw_level_is_invalid() {
        let rendered = LevelRenderer::render_raw(99);
        assert_eq!(&*rendered, "INVALID");
        assert_eq!(rendered.fgcolor(), Some(Color::BrightMagenta));
    }

    #[test]
    fn test_name_padding() {
        assert_eq!(NameRenderer::pad("db"), "db          ");
        assert_eq!(NameRenderer::pad(""), " ".repeat(NAME_COLUMN_WIDTH));
        assert_eq!(NameRenderer::pad("exactly12chr"), "exactly12chr");
        assert_eq!(NameRenderer::pad("a.much.longer.name"), "a.much.longer.name");
    }

    #[test]
    fn test_name_color() {
        let rendered = NameRenderer::render("http");
        assert_eq!(&*rendered, "http        ");
        assert_eq!(rendered.fgcolor(), Some(Color::BrightGreen));
    }
}
