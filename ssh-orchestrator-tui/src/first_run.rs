//! 首次运行流程
//!
//! 配置目录刚创建时，在进入仪表盘之前询问是否立即打开编辑器。
//! 独立于仪表盘的小循环，不走 Message/Update 那套。

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use ssh_orchestrator_core::config::EditorMode;

use crate::event;
use crate::util::Term;

/// 首次运行界面的结果
pub enum FirstRunOutcome {
    /// 用选定的编辑器打开服务器配置，然后退出
    OpenEditor(EditorMode),
    /// 跳过，直接进入仪表盘
    Continue,
    /// 直接退出
    Quit,
}

/// 编辑器选择界面，阻塞到用户做出选择为止
pub fn run(terminal: &mut Term, config_path: &Path) -> Result<FirstRunOutcome> {
    let mut choice = EditorMode::System;

    loop {
        terminal.draw(|frame| draw(frame, config_path, choice))?;

        let Some(event) = event::poll_event(Duration::from_millis(100))? else {
            continue;
        };
        let Event::Key(key) = event else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if is_ctrl_c(&key) {
            return Ok(FirstRunOutcome::Quit);
        }
        match key.code {
            // 只有两个选项，上下都是切换
            KeyCode::Up | KeyCode::Down | KeyCode::Char('k' | 'j') => {
                choice = match choice {
                    EditorMode::System => EditorMode::Terminal,
                    EditorMode::Terminal => EditorMode::System,
                };
            }
            KeyCode::Enter => return Ok(FirstRunOutcome::OpenEditor(choice)),
            KeyCode::Esc | KeyCode::Char('q') => return Ok(FirstRunOutcome::Continue),
            _ => {}
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c')
}

fn draw(frame: &mut Frame, config_path: &Path, choice: EditorMode) {
    let block = Block::default()
        .title(" Welcome to SSH Orchestrator ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let lines = vec![
        Line::from(""),
        Line::styled(
            "  Config templates have been created:",
            Style::default().fg(Color::White),
        ),
        Line::from(""),
        Line::styled(
            format!("    {}", config_path.display()),
            Style::default().fg(Color::Cyan),
        ),
        Line::from(""),
        Line::styled(
            "  Open the server config now?",
            Style::default().fg(Color::White),
        ),
        Line::from(""),
        choice_line("System editor", choice == EditorMode::System),
        choice_line("Terminal editor ($EDITOR)", choice == EditorMode::Terminal),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑↓", Style::default().fg(Color::Yellow)),
            Span::styled(" Choose | ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" Open | ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" Skip to dashboard", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn choice_line(label: &str, selected: bool) -> Line<'_> {
    if selected {
        Line::from(vec![
            Span::styled("    ▶ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw("      "),
            Span::styled(label, Style::default().fg(Color::White)),
        ])
    }
}
