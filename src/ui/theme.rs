use crossterm::style::Color;

/// A symbol with its plain-ASCII fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub unicode: &'static str,
    pub ascii: &'static str,
    pub color: Color,
}

impl Glyph {
    const fn new(unicode: &'static str, ascii: &'static str, color: Color) -> Self {
        Self {
            unicode,
            ascii,
            color,
        }
    }

    pub fn symbol(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

// Every symbol a view prints comes from this table.
pub const DONE: Glyph = Glyph::new("✓", "[OK]", Color::Green);
pub const FAILED: Glyph = Glyph::new("✗", "[FAIL]", Color::Red);
pub const WARN: Glyph = Glyph::new("⚠", "[WARN]", Color::Yellow);
pub const BUSY: Glyph = Glyph::new("●", "[..]", Color::Yellow);
pub const CHANGE: Glyph = Glyph::new("↳", "->", Color::DarkGrey);
pub const WATCH: Glyph = Glyph::new("⟳", "[~]", Color::Cyan);
pub const SERVER: Glyph = Glyph::new("▶", "[>]", Color::Cyan);
pub const REMOVE: Glyph = Glyph::new("🗑", "[-]", Color::Yellow);
