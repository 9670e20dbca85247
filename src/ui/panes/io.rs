//! I/O pane rendering: program output lines

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use crate::panels::IoPanel;
use crate::ui::panes::util::{inner_height, panel_block};
use crate::ui::theme::DEFAULT_THEME;

pub fn render_io_pane(frame: &mut Frame, area: Rect, panel: &IoPanel, is_active: bool) {
    let block = panel_block("I/O", is_active);

    if panel.lines().is_empty() {
        let hint = Paragraph::new("(no program output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(hint, area);
        return;
    }

    let height = inner_height(area);
    let skip = panel.lines().len().saturating_sub(height);
    let items: Vec<ListItem> = panel.lines()[skip..]
        .iter()
        .map(|line| ListItem::new(line.as_str()).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
