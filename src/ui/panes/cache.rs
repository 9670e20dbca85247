//! Cache pane rendering: line-granular view around the focus address

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panels::cache::{CachePanel, LINE_BYTES};
use crate::ui::panes::util::{inner_height, panel_block};
use crate::ui::theme::DEFAULT_THEME;

pub fn render_cache_pane(frame: &mut Frame, area: Rect, panel: &CachePanel, is_active: bool) {
    let block = panel_block("Cache", is_active);
    let height = inner_height(area);
    let focus = panel.focus_address();
    let first = focus.saturating_sub(LINE_BYTES * (height as u64 / 2));

    let lines: Vec<Line> = (0..height as u64)
        .map(|row| {
            let addr = first + row * LINE_BYTES;
            let set = (addr / LINE_BYTES) % 64;
            let tag = addr / (LINE_BYTES * 64);
            let marker = if addr == focus { ">" } else { " " };
            let style = if addr == focus {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            Line::from(Span::styled(
                format!("{marker} {addr:#012x}  set {set:>2}  tag {tag:#x}"),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
