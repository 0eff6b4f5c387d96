//! 弹窗更新逻辑
//!
//! 编辑器选择与安装确认两个弹窗的状态转移。取消总是回到
//! Servers 视图；安装成功转到 Proxies，失败回到 Servers。

use crate::message::PromptMessage;
use crate::model::{ActiveView, App};

use ssh_orchestrator_core::config::EditorMode;

/// 处理弹窗消息
pub fn update(app: &mut App, msg: PromptMessage) {
    match msg {
        PromptMessage::ToggleChoice => toggle_choice(app),
        PromptMessage::Confirm => confirm(app),
        PromptMessage::Cancel => cancel(app),
    }
}

fn toggle_choice(app: &mut App) {
    if let ActiveView::EditorPrompt(state) = &mut app.view {
        state.choice = match state.choice {
            EditorMode::System => EditorMode::Terminal,
            EditorMode::Terminal => EditorMode::System,
        };
    }
}

fn confirm(app: &mut App) {
    match &mut app.view {
        ActiveView::EditorPrompt(state) => {
            // 编辑器等主循环退出、终端恢复之后再开，
            // 终端编辑器直接在备用屏幕里启动会画花界面
            let target = state.target.clone();
            let choice = state.choice;
            app.pending_editor = Some((target, choice));
            app.set_status("restart required to pick up changes");
            app.should_quit = true;
        }
        ActiveView::InstallPrompt(state) if !state.installing => {
            state.installing = true;
            state.spinner = 0;
            app.dispatcher.spawn_install(app.netcat.clone());
        }
        _ => {}
    }
}

fn cancel(app: &mut App) {
    match &app.view {
        ActiveView::EditorPrompt(_) => {
            app.set_view(ActiveView::Servers);
        }
        ActiveView::InstallPrompt(state) if !state.installing => {
            app.set_view(ActiveView::Servers);
            app.set_status("installation cancelled");
        }
        _ => {}
    }
}

/// 安装任务的完成事件
pub fn install_finished(app: &mut App, result: Result<(), String>) {
    let ActiveView::InstallPrompt(state) = &app.view else {
        return;
    };
    if !state.installing {
        return;
    }

    match result {
        Ok(()) => {
            app.set_view(ActiveView::Proxies);
            app.set_status("netcat installed");
        }
        Err(err) => {
            app.set_view(ActiveView::Servers);
            app.set_status(format!("netcat install failed: {err}"));
        }
    }
}

/// 心跳推进安装中的转轮动画
pub fn tick(app: &mut App) {
    if let ActiveView::InstallPrompt(state) = &mut app.view {
        if state.installing {
            state.spinner = state.spinner.wrapping_add(1);
        }
    }
}
