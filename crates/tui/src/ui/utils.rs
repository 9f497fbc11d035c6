//! Layout helpers shared by UI components.

use ratatui::prelude::*;

/// Centers a `percent_x` wide, `height` rows tall rectangle in `r`.
/// The height is clamped to `r`.
pub fn centered_rect_with_height(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = r.y + (r.height - height) / 2;
    horizontally_centered(percent_x, Rect::new(r.x, top, r.width, height))
}

fn horizontally_centered(percent_x: u16, r: Rect) -> Rect {
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r);
    area[1]
}
