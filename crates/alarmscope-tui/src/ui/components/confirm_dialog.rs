use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::ConfirmDialog;
use crate::ui::{Layout, Theme};

/// Modal yes/no dialog rendered over the event log
pub struct ConfirmDialogView;

impl ConfirmDialogView {
    pub fn render(frame: &mut Frame, dialog: &ConfirmDialog) {
        let popup_area = Layout::centered_popup(frame.area(), 44, 7);

        frame.render_widget(Clear, popup_area);

        let body = vec![
            Line::from(""),
            Line::from(Span::styled(dialog.body, Theme::text())).centered(),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y] ", Theme::text_highlight()),
                Span::styled(dialog.confirm_label, Theme::text()),
                Span::styled("    ", Theme::text()),
                Span::styled("[n] ", Theme::text_highlight()),
                Span::styled(dialog.cancel_label, Theme::text()),
            ])
            .centered(),
        ];

        let widget = Paragraph::new(body).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_alert())
                .title(Span::styled(format!(" {} ", dialog.title), Theme::title())),
        );

        frame.render_widget(widget, popup_area);
    }
}
