//! Editor pane rendering with assembly highlighting
//!
//! Displays the program buffer with line numbers, a cursor marker, and the
//! execution-position highlight. A simple word tokenizer colors mnemonics,
//! registers, immediates, labels, and comments; no full lexer required.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panels::EditorPanel;
use crate::session::panel::EditableDocumentPanel;
use crate::ui::panes::util::{inner_height, panel_block};
use crate::ui::theme::DEFAULT_THEME;

const MNEMONICS: &[&str] = &[
    "add", "addi", "sub", "mul", "div", "and", "or", "xor", "sll", "srl", "sra", "li", "la", "mv",
    "ld", "sd", "lw", "sw", "lb", "sb", "beq", "bne", "blt", "bge", "beqz", "bnez", "j", "jal",
    "jalr", "ret", "call", "ecall", "ebreak", "nop",
];

fn is_register(word: &str) -> bool {
    matches!(word.chars().next(), Some('x' | 'a' | 't' | 's'))
        && word.len() <= 3
        && word[1..].chars().all(|c| c.is_ascii_digit())
        || matches!(word, "zero" | "ra" | "sp" | "gp" | "tp" | "fp")
}

fn highlight_line(line: &str) -> Line<'_> {
    if let Some(idx) = line.find('#') {
        let (code, comment) = line.split_at(idx);
        let mut spans = highlight_code(code);
        spans.push(Span::styled(
            comment,
            Style::default().fg(DEFAULT_THEME.comment),
        ));
        return Line::from(spans);
    }
    Line::from(highlight_code(line))
}

fn highlight_code(code: &str) -> Vec<Span<'_>> {
    let trimmed = code.trim_end();
    if trimmed.ends_with(':') || trimmed.trim_start().starts_with('.') {
        return vec![Span::styled(
            code,
            Style::default().fg(DEFAULT_THEME.label),
        )];
    }
    let mut spans = Vec::new();
    let mut rest = code;
    while !rest.is_empty() {
        let word_len = rest
            .find(|c: char| !c.is_alphanumeric() && c != '_' && c != '-')
            .unwrap_or(rest.len());
        if word_len == 0 {
            let (sep, tail) = rest.split_at(1);
            spans.push(Span::raw(sep));
            rest = tail;
            continue;
        }
        let (word, tail) = rest.split_at(word_len);
        let style = if MNEMONICS.contains(&word) {
            Style::default().fg(DEFAULT_THEME.keyword)
        } else if word.chars().all(|c| c.is_ascii_digit() || c == '-') {
            Style::default().fg(DEFAULT_THEME.number)
        } else if is_register(word) {
            Style::default().fg(DEFAULT_THEME.secondary)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(word, style));
        rest = tail;
    }
    spans
}

pub fn render_editor_pane(frame: &mut Frame, area: Rect, editor: &EditorPanel, is_active: bool) {
    let title = if editor.is_editor_enabled() {
        "Editor"
    } else {
        "Editor (read-only)"
    };
    let block = panel_block(title, is_active);

    let text = editor.text();
    if text.is_empty() {
        let hint = Paragraph::new("(empty program; start typing, or load an example with 'e')")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(hint, area);
        return;
    }

    let cursor_line = text[..editor.cursor()].matches('\n').count();
    let height = inner_height(area);
    let scroll = cursor_line.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, raw)| {
            let number = Span::styled(
                format!("{:>4} ", i + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            );
            let mut line = highlight_line(raw);
            line.spans.insert(0, number);
            if editor.exec_highlight() == Some(i) {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            } else if i == cursor_line && is_active {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
