use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use alarmscope_types::FlashMessage;

use crate::ui::Theme;

/// Bar of transient flash notifications, oldest on top
pub struct FlashBar<'a> {
    messages: Vec<&'a FlashMessage>,
}

impl<'a> FlashBar<'a> {
    pub fn new<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a FlashMessage>,
    {
        Self {
            messages: messages.into_iter().collect(),
        }
    }
}

impl Widget for FlashBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, message) in self.messages.iter().enumerate() {
            if i as u16 >= area.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(" ▌ ", Theme::flash(message.category)),
                Span::styled(message.text.as_str(), Theme::flash(message.category)),
                Span::styled("  [x] dismiss", Theme::text_dim()),
            ]);
            buf.set_line(area.x, area.y + i as u16, &line, area.width);
        }
    }
}
