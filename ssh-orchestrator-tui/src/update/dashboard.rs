//! 列表视图更新逻辑

use log::{error, warn};

use ssh_orchestrator_core::CoreError;

use crate::message::DashboardMessage;
use crate::model::{ActiveView, App, Collection, EditorPromptState, InstallPromptState};

/// 处理列表视图消息
pub fn update(app: &mut App, msg: DashboardMessage) {
    // 弹窗打开时列表消息一律不生效
    if app.view.is_prompt() {
        return;
    }

    match msg {
        DashboardMessage::ToggleView => {
            let next = match app.view {
                ActiveView::Servers => ActiveView::Proxies,
                _ => ActiveView::Servers,
            };
            app.set_view(next);
            app.cursor = 0;
            app.clear_status();
        }

        DashboardMessage::CursorUp => {
            app.cursor = app.cursor.saturating_sub(1);
        }

        DashboardMessage::CursorDown => {
            if app.cursor + 1 < app.active_len() {
                app.cursor += 1;
            }
        }

        DashboardMessage::Confirm => confirm(app),

        DashboardMessage::Reload => {
            app.refresh(app.active_collection());
        }

        DashboardMessage::Add => open_editor_prompt(app, true),

        DashboardMessage::Edit => open_editor_prompt(app, false),
    }
}

/// Servers 上的 Enter 选中当前服务器并结束主循环；
/// 代理不能直接连接，Proxies 上的 Enter 是空操作。
fn confirm(app: &mut App) {
    if app.view != ActiveView::Servers {
        return;
    }
    if let Some(entry) = app.servers.entries.get(app.cursor) {
        app.selected = Some(entry.clone());
        app.should_quit = true;
    }
}

/// 打开编辑器选择弹窗；`append` 时先把模板块追加进文件。
/// 代理集合先过 netcat 检查，缺失时转安装确认弹窗。
fn open_editor_prompt(app: &mut App, append: bool) {
    let target = match app.active_collection() {
        Collection::Servers => {
            if append {
                if let Err(err) = app.store.append_server_template("new-server") {
                    report_append_failure(app, &err);
                    return;
                }
            }
            app.store.config_path()
        }
        Collection::Proxies => {
            if !app.netcat.is_available() {
                app.set_view(ActiveView::InstallPrompt(InstallPromptState::new()));
                return;
            }
            if append {
                if let Err(err) = app.store.append_proxy_template("new-proxy") {
                    report_append_failure(app, &err);
                    return;
                }
            }
            app.store.proxies_path()
        }
    };

    app.set_view(ActiveView::EditorPrompt(EditorPromptState::new(target)));
}

/// 追加失败是可恢复错误：记日志、挂状态栏消息，停留在列表视图
fn report_append_failure(app: &mut App, err: &CoreError) {
    if err.is_expected() {
        warn!("[CONFIG] Template append rejected: {err}");
    } else {
        error!("[CONFIG] Template append failed: {err}");
    }
    app.set_status(format!("append failed: {err}"));
}
