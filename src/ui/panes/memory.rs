//! Memory pane rendering: hex rows centered on the view address
//!
//! Rows show the loaded program image where one is mapped; everything else
//! renders as zero fill. The view re-centers whenever the cache panel moves
//! its focus address.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panels::MemoryPanel;
use crate::ui::panes::util::{inner_height, panel_block};
use crate::ui::theme::DEFAULT_THEME;

/// Base address program images are mapped at.
pub const IMAGE_BASE: u64 = 0x1_0000;

pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    panel: &MemoryPanel,
    image: Option<&[u8]>,
    is_active: bool,
) {
    let block = panel_block("Memory", is_active);
    let height = inner_height(area);
    let central = panel.central_address() & !0xf;
    let first = central.saturating_sub(16 * (height as u64 / 2));

    let lines: Vec<Line> = (0..height as u64)
        .map(|row| {
            let addr = first + row * 16;
            let mut hex = String::with_capacity(3 * 16);
            for i in 0..16u64 {
                let byte = image
                    .and_then(|img| {
                        (addr + i)
                            .checked_sub(IMAGE_BASE)
                            .and_then(|off| img.get(off as usize))
                    })
                    .copied()
                    .unwrap_or(0);
                hex.push_str(&format!("{byte:02x} "));
            }
            let style = if addr == central {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            Line::from(vec![
                Span::styled(format!("{addr:#012x}  "), style),
                Span::styled(hex, style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
