//! 弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use ssh_orchestrator_core::config::EditorMode;

use crate::model::{ActiveView, App, EditorPromptState, InstallPromptState};

/// 安装中的转轮动画帧
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    match &app.view {
        ActiveView::EditorPrompt(state) => render_editor_prompt(frame, state),
        ActiveView::InstallPrompt(state) => render_install_prompt(frame, state),
        _ => {}
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 渲染编辑器选择弹窗
fn render_editor_prompt(frame: &mut Frame, state: &EditorPromptState) {
    let area = centered_rect(52, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Open Editor ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(block, area);

    let inner = Rect::new(area.x + 2, area.y + 1, area.width - 4, area.height - 2);

    let file_name = state
        .target
        .file_name()
        .map_or_else(|| state.target.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        });

    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("  Open {file_name} with:"),
            Style::default().fg(Color::White),
        ),
        Line::from(""),
        choice_line("System editor", state.choice == EditorMode::System),
        choice_line("Terminal editor ($EDITOR)", state.choice == EditorMode::Terminal),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑↓", Style::default().fg(Color::Yellow)),
            Span::styled(" Choose | ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" Open | ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// 一行编辑器选项
fn choice_line(label: &str, selected: bool) -> Line<'_> {
    if selected {
        Line::from(vec![
            Span::styled("  ▶ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(label, Style::default().fg(Color::White)),
        ])
    }
}

/// 渲染 netcat 安装确认弹窗
fn render_install_prompt(frame: &mut Frame, state: &InstallPromptState) {
    let area = centered_rect(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Netcat Required ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(block, area);

    let inner = Rect::new(area.x + 2, area.y + 1, area.width - 4, area.height - 2);

    let lines = if state.installing {
        let spinner = SPINNER_FRAMES[state.spinner % SPINNER_FRAMES.len()];
        vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {spinner} "), Style::default().fg(Color::Cyan)),
                Span::styled("Installing netcat ...", Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::styled(
                "  This may take a while.",
                Style::default().fg(Color::DarkGray),
            ),
        ]
    } else {
        vec![
            Line::from(""),
            Line::styled(
                "  Proxy tunneling needs netcat (nc) on PATH.",
                Style::default().fg(Color::White),
            ),
            Line::styled("  Install it now?", Style::default().fg(Color::White)),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y", Style::default().fg(Color::Yellow)),
                Span::styled(" Install | ", Style::default().fg(Color::DarkGray)),
                Span::styled("n", Style::default().fg(Color::Yellow)),
                Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
            ]),
        ]
    };

    frame.render_widget(Paragraph::new(lines), inner);
}
