//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{App, Collection};

use super::components;
use super::pages;
use super::theme::colors;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 四层布局：标题栏 + 标签行 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Length(1), // 标签行
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(frame, main_layout[0]);
    render_tabs(app, frame, main_layout[1]);
    render_page_content(app, frame, main_layout[2]);
    components::statusbar::render(app, frame, main_layout[3]);

    // 弹窗在最上层
    components::modal::render(app, frame);
}

/// 渲染标题栏
fn render_title_bar(frame: &mut Frame, area: Rect) {
    let c = colors();
    let title = Paragraph::new(" SSH Orchestrator v0.1.0")
        .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}

/// 渲染 Servers / Proxies 标签行
fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let active = app.active_collection();

    let mut spans = vec![Span::raw(" ")];
    for (i, collection) in [Collection::Servers, Collection::Proxies].iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(c.border)));
        }
        let count = match collection {
            Collection::Servers => app.servers.len(),
            Collection::Proxies => app.proxies.len(),
        };
        let label = format!(" {} ({count}) ", collection.label());
        let style = if *collection == active {
            Style::default()
                .fg(c.selected_fg)
                .bg(c.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.muted)
        };
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// 渲染当前集合的列表
fn render_page_content(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();

    let title = match app.active_collection() {
        Collection::Servers => " Servers ",
        Collection::Proxies => " Proxies ",
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(c.fg).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match app.active_collection() {
        Collection::Servers => pages::servers::render(app, frame, inner_area),
        Collection::Proxies => pages::proxies::render(app, frame, inner_area),
    }
}
