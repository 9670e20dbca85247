//! Status bar rendering: document state, status channels, keybindings

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::document::DocumentState;
use crate::session::status::{StatusAggregator, StatusChannel};
use crate::ui::theme::DEFAULT_THEME;

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    document: &DocumentState,
    status: &StatusAggregator,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // Left side: document state and the most recent workflow message.
    let doc_text = match (document.is_dirty(), document.has_location()) {
        (true, _) => " * unsaved ",
        (false, true) => " saved ",
        (false, false) => " new ",
    };
    let doc_style = if document.is_dirty() {
        Style::default().bg(DEFAULT_THEME.secondary).fg(Color::Black)
    } else {
        Style::default().bg(DEFAULT_THEME.primary).fg(Color::Black)
    };
    let mut left_spans = vec![
        Span::styled(doc_text, doc_style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {message} "),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];
    for channel in StatusChannel::ALL {
        let text = status.text(channel);
        if !text.is_empty() {
            left_spans.push(Span::styled(
                format!(" {}: {} ", channel.label(), text),
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .fg(DEFAULT_THEME.comment),
            ));
        }
    }
    let left = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left, layout[0]);

    // Right side: keybinds.
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let right_spans = vec![
        Span::styled(" 1-5 ", key_style),
        Span::styled(" panel ", desc_style),
        Span::styled(" ^N/^O/^S ", key_style),
        Span::styled(" new/load/save ", desc_style),
        Span::styled(" ^E ", key_style),
        Span::styled(" examples ", desc_style),
        Span::styled(" ^R ", key_style),
        Span::styled(" run ", desc_style),
        Span::styled(" ^Q ", key_style),
        Span::styled(" quit ", desc_style),
    ];
    let right = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right, layout[1]);
}
