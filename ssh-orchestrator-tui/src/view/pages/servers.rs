//! 服务器列表页面视图

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};

use ssh_orchestrator_core::{HostStatus, ServerEntry};

use crate::model::App;
use crate::view::theme::colors;

/// 渲染服务器列表页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.servers.is_empty() {
        render_empty(frame, area);
    } else {
        render_list(app, frame, area);
    }
}

/// 渲染空状态
fn render_empty(frame: &mut Frame, area: Rect) {
    let c = colors();
    let content = vec![
        Line::from(""),
        Line::styled("  No servers configured", Style::default().fg(c.muted)),
        Line::from(""),
        Line::styled(
            "  Press a to append a template and open the editor",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(content), area);
}

/// 渲染服务器列表
fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let items: Vec<ListItem> = app
        .servers
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == app.cursor;
            let status = app.servers.status_of(&entry.alias);
            let status_icon = match status {
                HostStatus::Online | HostStatus::Offline => "●",
                HostStatus::Checking => "○",
            };
            let status_color = match status {
                HostStatus::Online => c.online,
                HostStatus::Checking => c.checking,
                HostStatus::Offline => c.offline,
            };

            let style = if is_selected {
                Style::default()
                    .fg(c.selected_fg)
                    .bg(c.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(c.fg)
            };
            let status_style = if is_selected {
                Style::default().fg(status_color).bg(c.selected_bg)
            } else {
                Style::default().fg(status_color)
            };
            let dim_style = if is_selected {
                Style::default().fg(c.selected_fg).bg(c.selected_bg)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let line = Line::from(vec![
                Span::raw("  "),
                Span::styled(status_icon, status_style),
                Span::raw(" "),
                Span::styled(format!("{:<16}", entry.alias), style),
                Span::styled(format!("{:<32}", destination(entry)), dim_style),
                Span::styled(status.as_str(), status_style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default());

    let mut state = ListState::default();
    state.select(Some(app.cursor));

    frame.render_stateful_widget(list, area, &mut state);
}

/// 条目的连接目标描述，例如 `root@1.2.3.4:2222 via jump`
fn destination(entry: &ServerEntry) -> String {
    let mut target = match &entry.user {
        Some(user) => format!("{user}@{}", entry.host),
        None => entry.host.clone(),
    };
    if let Some(port) = entry.port {
        target.push_str(&format!(":{port}"));
    }
    if let Some(proxy) = &entry.proxy {
        target.push_str(&format!(" via {proxy}"));
    }
    target
}
