use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use unicode_width::UnicodeWidthChar;

use alarmscope_intake::EventTable;

use crate::app::AppState;
use crate::ui::components::{FlashBar, StatusBar};
use crate::ui::{Layout, Theme};

/// Width of the timestamp column (fits `DD/MM/YYYY HH:MM:SS`)
const TIMESTAMP_WIDTH: u16 = 19;

/// At most this many flash lines are shown at once
const MAX_FLASH_LINES: usize = 3;

/// The live event log screen
pub struct EventLogScreen;

impl EventLogScreen {
    pub fn render(frame: &mut Frame, state: &AppState, table: &EventTable) {
        let flash_lines = state.flash.len().min(MAX_FLASH_LINES) as u16;
        let (header_area, flash_area, table_area, status_area) =
            Layout::main(frame.area(), flash_lines);

        Self::render_header(frame, header_area, state);

        if let Some(flash_area) = flash_area {
            frame.render_widget(FlashBar::new(state.flash.messages()), flash_area);
        }

        Self::render_table(frame, table_area, table);
        Self::render_status_bar(frame, status_area, state, table);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled("alarmscope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(state.panel_addr.as_str(), Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
        ];

        if state.paused {
            spans.push(Span::styled("PAUSED", Theme::paused()));
            if state.backlog_len > 0 {
                spans.push(Span::styled(
                    format!(" ({} held back)", state.backlog_len),
                    Theme::text_dim(),
                ));
            }
        } else {
            spans.push(Span::styled("LIVE", Theme::running()));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_table(frame: &mut Frame, area: Rect, table: &EventTable) {
        let message_width = area
            .width
            .saturating_sub(TIMESTAMP_WIDTH + 3) // borders and spacing
            .max(1) as usize;

        let rows: Vec<Row> = table
            .page_rows()
            .into_iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(Span::styled(row.timestamp, Theme::timestamp())),
                    Cell::from(Span::styled(
                        fit_to_width(&row.message, message_width),
                        Theme::text(),
                    )),
                ])
            })
            .collect();

        let widget = Table::new(
            rows,
            [
                Constraint::Length(TIMESTAMP_WIDTH),
                Constraint::Min(1),
            ],
        )
        .header(Row::new(vec!["Timestamp", "Message"]).style(Theme::table_header()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(" Event Log ", Theme::title())),
        );

        frame.render_widget(widget, area);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, table: &EventTable) {
        let hints = vec![
            ("p", state.pause_label),
            ("c", "Clear"),
            ("n/b", "Page"),
            ("F1-F4", "Emergency"),
            ("?", "Help"),
            ("q", "Quit"),
        ];

        let summary = format!(
            "{}  ·  page {}/{}",
            table.range_label(),
            table.page() + 1,
            table.page_count()
        );

        frame.render_widget(StatusBar::new().hints(hints).summary(summary), area);
    }
}

/// Truncate to a display width, appending an ellipsis when cut
fn fit_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
