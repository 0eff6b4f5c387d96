//! 事件处理器
//!
//! 把原始终端事件翻译成消息；按键的含义取决于当前视图。

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, DashboardMessage, PromptMessage};
use crate::model::{ActiveView, App, InstallPromptState};

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端尺寸改变下一轮自动重绘
        Event::Resize(_, _) => AppMessage::Noop,
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press，忽略 Release 和 Repeat，
    // 避免 Windows 终端上按键翻倍
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    match &app.view {
        ActiveView::Servers | ActiveView::Proxies => handle_dashboard_keys(key),
        ActiveView::EditorPrompt(_) => handle_editor_prompt_keys(key),
        ActiveView::InstallPrompt(state) => handle_install_prompt_keys(key, state),
    }
}

/// 列表视图的按键
fn handle_dashboard_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::QUIT.matches(&key) || DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::RELOAD.matches(&key) {
        return AppMessage::Dashboard(DashboardMessage::Reload);
    }
    if DefaultKeymap::ADD.matches(&key) {
        return AppMessage::Dashboard(DashboardMessage::Add);
    }
    if DefaultKeymap::EDIT.matches(&key) {
        return AppMessage::Dashboard(DashboardMessage::Edit);
    }

    match key.code {
        KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h' | 'l') => {
            AppMessage::Dashboard(DashboardMessage::ToggleView)
        }
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Dashboard(DashboardMessage::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Dashboard(DashboardMessage::CursorDown),
        KeyCode::Enter => AppMessage::Dashboard(DashboardMessage::Confirm),
        _ => AppMessage::Noop,
    }
}

/// 编辑器选择弹窗的按键
fn handle_editor_prompt_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    match key.code {
        // 只有两个选项，上下都是切换
        KeyCode::Up | KeyCode::Down | KeyCode::Char('k' | 'j') => {
            AppMessage::Prompt(PromptMessage::ToggleChoice)
        }
        KeyCode::Enter => AppMessage::Prompt(PromptMessage::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => AppMessage::Prompt(PromptMessage::Cancel),
        _ => AppMessage::Noop,
    }
}

/// 安装确认弹窗的按键
fn handle_install_prompt_keys(key: KeyEvent, state: &InstallPromptState) -> AppMessage {
    // 安装进行中屏蔽一切按键，避免并发触发第二次安装
    if state.installing {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::CONFIRM_INSTALL.matches(&key) {
        return AppMessage::Prompt(PromptMessage::Confirm);
    }
    if DefaultKeymap::DECLINE_INSTALL.matches(&key) {
        return AppMessage::Prompt(PromptMessage::Cancel);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => AppMessage::Prompt(PromptMessage::Cancel),
        _ => AppMessage::Noop,
    }
}
