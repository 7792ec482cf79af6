use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Main screen: header, optional flash bar, content, status bar.
    ///
    /// The flash area is absent when `flash_lines` is zero.
    pub fn main(area: Rect, flash_lines: u16) -> (Rect, Option<Rect>, Rect, Rect) {
        let mut constraints = vec![Constraint::Length(3)]; // Header
        if flash_lines > 0 {
            constraints.push(Constraint::Length(flash_lines));
        }
        constraints.push(Constraint::Min(1)); // Event table
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        if flash_lines > 0 {
            (chunks[0], Some(chunks[1]), chunks[2], chunks[3])
        } else {
            (chunks[0], None, chunks[1], chunks[2])
        }
    }

    /// A centered popup area for dialogs and overlays
    pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
        let popup_width = width.min(area.width.saturating_sub(4));
        let popup_height = height.min(area.height.saturating_sub(4));

        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        Rect::new(x, y, popup_width, popup_height)
    }
}
