//! Shared helpers for pane rendering

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::ui::theme::DEFAULT_THEME;

/// Bordered block with the panel title, highlighted when active.
pub fn panel_block(title: &str, is_active: bool) -> Block<'_> {
    let border_style = if is_active {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered block.
pub fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}
