use crossterm::style::Stylize;

use crate::ui::theme::{self, Glyph};

/// Status marker at the start of an event line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Watch,
    Server,
    Trash,
}

impl Icon {
    fn glyph(self) -> Glyph {
        match self {
            Icon::Success => theme::DONE,
            Icon::Error => theme::FAILED,
            Icon::Warning => theme::WARN,
            Icon::Progress => theme::BUSY,
            Icon::Arrow => theme::CHANGE,
            Icon::Watch => theme::WATCH,
            Icon::Server => theme::SERVER,
            Icon::Trash => theme::REMOVE,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        self.glyph().symbol(supports_unicode)
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let glyph = self.glyph();
        let symbol = glyph.symbol(supports_unicode);
        if supports_color {
            symbol.with(glyph.color).to_string()
        } else {
            symbol.to_string()
        }
    }
}
