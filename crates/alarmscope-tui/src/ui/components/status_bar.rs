use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

/// Bottom bar: key hints on the left, table range summary on the right
pub struct StatusBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
    summary: Option<String>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            summary: None,
        }
    }

    /// Keyboard hints as (key, description) pairs
    pub fn hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.hints = hints.into_iter().collect();
        self
    }

    /// Right-aligned summary text (page/range info)
    pub fn summary<S: Into<String>>(mut self, text: S) -> Self {
        self.summary = Some(text.into());
        self
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::status_bar());

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (key, desc) in &self.hints {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{key}]"), Theme::status_bar_key()));
            spans.push(Span::styled(format!(" {desc}"), Theme::status_bar()));
        }
        let hints = Line::from(spans);
        let hints_width = hints.width() as u16;
        buf.set_line(area.x + 1, area.y, &hints, area.width.saturating_sub(2));

        // The summary is dropped entirely when the hints leave no room for
        // it, rather than overlapping.
        if let Some(summary) = &self.summary {
            let width = summary.width() as u16;
            let x = area.x + area.width.saturating_sub(width + 1);
            if x > area.x + hints_width + 2 {
                let span = Span::styled(summary.as_str(), Theme::status_bar());
                buf.set_span(x, area.y, &span, width);
            }
        }
    }
}
