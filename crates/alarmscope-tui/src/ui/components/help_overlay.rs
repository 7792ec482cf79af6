use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Layout;

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let popup_area = Layout::centered_popup(frame.area(), 52, 22);

        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Live log",
                Style::default().fg(Color::Yellow),
            )]),
            Self::key_line("p", "Pause / unpause the live log"),
            Self::key_line("c", "Clear the event log"),
            Self::key_line("n / PgDn", "Next page"),
            Self::key_line("b / PgUp", "Previous page"),
            Self::key_line("g / Home", "First page"),
            Self::key_line("G / End", "Last page"),
            Self::key_line("x", "Dismiss oldest notification"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Keypad",
                Style::default().fg(Color::Yellow),
            )]),
            Self::key_line("0-9 * #", "Send key to the panel"),
            Self::key_line("F1", "Fire (asks first)"),
            Self::key_line("F2", "Police (asks first)"),
            Self::key_line("F3", "Medical (asks first)"),
            Self::key_line("F4", "Custom alert (asks first)"),
            Line::from(""),
            Self::key_line("?", "Toggle this help"),
            Self::key_line("q", "Quit"),
        ];

        let help_widget = Paragraph::new(help_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    " Help ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(help_widget, popup_area);
    }

    fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {:>9}", key), Style::default().fg(Color::Green)),
            Span::styled(format!("  {}", desc), Style::default().fg(Color::White)),
        ])
    }
}
