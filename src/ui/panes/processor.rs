//! Processor pane rendering: run state and execution log

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use crate::panels::processor::{ProcessorPanel, RunState};
use crate::ui::panes::util::{inner_height, panel_block};
use crate::ui::theme::DEFAULT_THEME;

pub fn render_processor_pane(
    frame: &mut Frame,
    area: Rect,
    panel: &ProcessorPanel,
    processor_name: &str,
    is_running: bool,
    is_active: bool,
) {
    let block = panel_block("Processor", is_active);

    let state = if is_running {
        Span::styled(
            " RUNNING ",
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        match panel.run_state() {
            RunState::Idle => Span::styled(" idle ", Style::default().fg(DEFAULT_THEME.comment)),
            RunState::Paused => {
                Span::styled(" paused ", Style::default().fg(DEFAULT_THEME.secondary))
            }
            RunState::Finished => {
                Span::styled(" finished ", Style::default().fg(DEFAULT_THEME.primary))
            }
        }
    };
    let header = Line::from(vec![
        Span::styled(processor_name.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        Span::raw("  "),
        state,
    ]);

    if panel.log().is_empty() {
        let body = Paragraph::new(vec![header, Line::raw(""), Line::from(Span::styled(
            "(no execution log; 'r' runs the loaded program)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))])
        .block(block);
        frame.render_widget(body, area);
        return;
    }

    // Header row plus the tail of the log that fits.
    let height = inner_height(area).saturating_sub(2);
    let skip = panel.log().len().saturating_sub(height.max(1));
    let mut items = vec![ListItem::new(header), ListItem::new("")];
    items.extend(
        panel.log()[skip..]
            .iter()
            .map(|line| ListItem::new(line.as_str()).style(Style::default().fg(DEFAULT_THEME.fg))),
    );
    frame.render_widget(List::new(items).block(block), area);
}
