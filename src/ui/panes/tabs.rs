//! Tab bar rendering: the five panels with the active one highlighted

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::panel::PanelKind;
use crate::ui::theme::DEFAULT_THEME;

pub fn render_tab_bar(frame: &mut Frame, area: Rect, active: Option<PanelKind>) {
    let mut spans = vec![Span::raw(" ")];
    for (i, kind) in PanelKind::ALL.iter().enumerate() {
        let style = if Some(*kind) == active {
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, kind.title()), style));
        spans.push(Span::styled("│", Style::default().fg(DEFAULT_THEME.comment)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
