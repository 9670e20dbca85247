//! Modal dialogs over the terminal
//!
//! [`ModalDialogs`] implements the coordinator's [`DialogService`] boundary
//! with blocking prompts: each dialog draws a centered box and reads keys
//! until answered, mirroring a desktop modal `exec()`. Events produced by
//! the backend while a prompt is open stay queued and are drained by the
//! coordinator after the prompt returns.

use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Terminal;

use crate::assets::{ExampleAsset, EXAMPLES};
use crate::session::coordinator::{ConfirmChoice, DialogService};
use crate::session::document::SavePaths;
use crate::session::panel::{FileSource, LoadFileParams, SourceKind};
use crate::ui::theme::DEFAULT_THEME;

pub struct ModalDialogs<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

/// Infer the source kind from a path extension; anything unknown is treated
/// as a precompiled binary.
pub fn kind_for_path(path: &std::path::Path) -> SourceKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some("s") | Some("S") | Some("asm") => SourceKind::Assembly,
        Some("c") => SourceKind::C,
        _ => SourceKind::ExternalElf,
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

impl<'a, B: Backend> ModalDialogs<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>) -> Self {
        Self { terminal }
    }

    fn draw_box(&mut self, title: &str, body: Vec<Line>, footer: &str) -> io::Result<()> {
        let title = title.to_string();
        let footer = footer.to_string();
        self.terminal.draw(|frame| {
            let height = body.len() as u16 + 4;
            let area = centered_rect(60, height, frame.area());
            frame.render_widget(Clear, area);
            let block = Block::default()
                .title(format!(" {title} "))
                .title_bottom(Line::from(footer.clone()).alignment(Alignment::Right))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DEFAULT_THEME.border_focused));
            let paragraph = Paragraph::new(body.clone()).block(block);
            frame.render_widget(paragraph, area);
        })?;
        Ok(())
    }

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }

    /// Single-line text input. `Ok(None)` on Escape.
    fn prompt_text(&mut self, title: &str, label: &str) -> io::Result<Option<String>> {
        let mut input = String::new();
        loop {
            let body = vec![
                Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(DEFAULT_THEME.fg),
                )),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(DEFAULT_THEME.primary)),
                    Span::styled(input.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                    Span::styled("_", Style::default().fg(DEFAULT_THEME.border_focused)),
                ]),
            ];
            self.draw_box(title, body, " Enter accept · Esc cancel ")?;
            match self.wait_key()?.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Enter => return Ok(Some(input)),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
        }
    }

    fn confirm_save_inner(&mut self, prompt: &str) -> io::Result<ConfirmChoice> {
        let body = vec![
            Line::from(prompt.to_string()),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" [y] ", Style::default().bg(DEFAULT_THEME.success).fg(Color::Black)),
                Span::raw(" save   "),
                Span::styled(" [n] ", Style::default().bg(DEFAULT_THEME.secondary).fg(Color::Black)),
                Span::raw(" discard   "),
                Span::styled(" [esc] ", Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black)),
                Span::raw(" cancel "),
            ]),
        ];
        loop {
            self.draw_box("rvtty", body.clone(), "")?;
            match self.wait_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(ConfirmChoice::Save),
                KeyCode::Char('n') | KeyCode::Char('N') => return Ok(ConfirmChoice::Discard),
                KeyCode::Esc | KeyCode::Char('c') => return Ok(ConfirmChoice::Cancel),
                _ => {}
            }
        }
    }

    /// Pick a bundled example from a flat list grouped by kind.
    pub fn pick_example(&mut self) -> Option<&'static ExampleAsset> {
        let mut selected = 0usize;
        loop {
            let body: Vec<Line> = EXAMPLES
                .iter()
                .enumerate()
                .map(|(i, asset)| {
                    let kind = match asset.kind {
                        SourceKind::Assembly => "assembly",
                        SourceKind::C => "C",
                        SourceKind::ExternalElf => "ELF",
                    };
                    let style = if i == selected {
                        Style::default()
                            .fg(DEFAULT_THEME.border_focused)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.fg)
                    };
                    Line::from(Span::styled(
                        format!("{} {:<16} {}", if i == selected { ">" } else { " " }, asset.name, kind),
                        style,
                    ))
                })
                .collect();
            if self
                .draw_box("Load Example", body, " ↑/↓ select · Enter load · Esc cancel ")
                .is_err()
            {
                return None;
            }
            match self.wait_key() {
                Ok(key) => match key.code {
                    KeyCode::Esc => return None,
                    KeyCode::Enter => return EXAMPLES.get(selected),
                    KeyCode::Up => selected = selected.saturating_sub(1),
                    KeyCode::Down => selected = (selected + 1).min(EXAMPLES.len() - 1),
                    _ => {}
                },
                Err(_) => return None,
            }
        }
    }
}

impl<B: Backend> DialogService for ModalDialogs<'_, B> {
    fn confirm_save(&mut self, prompt: &str) -> ConfirmChoice {
        self.confirm_save_inner(prompt).unwrap_or(ConfirmChoice::Cancel)
    }

    fn load_file(&mut self) -> Option<LoadFileParams> {
        let path = self
            .prompt_text("Load Program", "Path to an assembly, C, or ELF file:")
            .ok()
            .flatten()?;
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        let path = PathBuf::from(trimmed);
        let kind = kind_for_path(&path);
        Some(LoadFileParams {
            source: FileSource::Disk(path),
            kind,
        })
    }

    fn save_paths(&mut self) -> Option<SavePaths> {
        let assembly = self
            .prompt_text("Save File", "Assembly destination (empty to skip):")
            .ok()
            .flatten()?;
        let binary = self
            .prompt_text("Save File", "Binary image destination (empty to skip):")
            .ok()
            .flatten()?;
        let to_path = |s: String| {
            let trimmed = s.trim().to_string();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        };
        Some(SavePaths {
            assembly: to_path(assembly),
            binary: to_path(binary),
        })
    }

    fn warn(&mut self, title: &str, message: &str) {
        let body = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )),
            Line::raw(""),
            Line::from("press any key"),
        ];
        if self.draw_box(title, body, "").is_ok() {
            let _ = self.wait_key();
        }
    }

    fn settings(&mut self) {
        let body = vec![
            Line::from("Processor: RV64 single-cycle"),
            Line::from("Cache: 64 sets × 64-byte lines"),
            Line::raw(""),
            Line::from("press any key"),
        ];
        if self.draw_box("Settings", body, "").is_ok() {
            let _ = self.wait_key();
        }
    }
}
