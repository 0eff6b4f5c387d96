//! SSH Orchestrator TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Dispatch**: 后台探测/安装任务 (`dispatch.rs`)
//!
//! 主循环是同步的单写者循环；探测与安装跑在 tokio runtime 上，
//! 结果通过 mpsc 通道送回主循环消费。ssh 连接与编辑器启动推迟到
//! 主循环退出、终端恢复之后，由 main 收尾执行。

mod app;
mod dispatch;
mod event;
mod first_run;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Builder;

use ssh_orchestrator_core::config::{open_editor, ConfigStore};
use ssh_orchestrator_core::deps::SystemNetcat;
use ssh_orchestrator_core::session;

use dispatch::ProbeDispatcher;
use first_run::FirstRunOutcome;
use model::{App, Collection};
use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    // 1. 准备配置存储；首次运行会创建目录与模板文件
    let store = ConfigStore::new().context("locating config store")?;
    let is_first_run = store.initialize().context("initializing config store")?;

    // 2. 后台任务用的 runtime；主循环本身是同步的
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building async runtime")?;
    let (tx, rx) = mpsc::channel();

    // 3. 初始化终端
    let mut terminal = init_terminal()?;

    // 4. 首次运行：进入仪表盘之前先问要不要直接打开配置
    if is_first_run {
        match first_run::run(&mut terminal, &store.config_path()) {
            Ok(FirstRunOutcome::OpenEditor(mode)) => {
                restore_terminal(&mut terminal)?;
                let path = store.config_path();
                println!("Opening {} ...", path.display());
                if let Err(err) = open_editor(&path, mode) {
                    eprintln!("Could not open editor: {err}");
                }
                return Ok(());
            }
            Ok(FirstRunOutcome::Quit) => {
                restore_terminal(&mut terminal)?;
                return Ok(());
            }
            Ok(FirstRunOutcome::Continue) => {}
            Err(err) => {
                restore_terminal(&mut terminal)?;
                return Err(err);
            }
        }
    }

    // 5. 加载两份配置；出错是致命的，但必须先恢复终端再报
    let servers = match store.load_servers() {
        Ok(entries) => entries,
        Err(err) => {
            restore_terminal(&mut terminal)?;
            return Err(anyhow::Error::new(err).context("loading server config"));
        }
    };
    let proxies = match store.load_proxies() {
        Ok(entries) => entries,
        Err(err) => {
            restore_terminal(&mut terminal)?;
            return Err(anyhow::Error::new(err).context("loading proxy config"));
        }
    };

    // 6. 创建应用实例并发起两个集合的首轮探测
    let dispatcher = ProbeDispatcher::new(runtime.handle().clone(), tx);
    let mut app = App::new(store, Arc::new(SystemNetcat), dispatcher, servers, proxies);
    app.refresh(Collection::Servers);
    app.refresh(Collection::Proxies);

    // 7. 运行主循环
    let result = app::run(&mut terminal, &mut app, &rx);

    // 8. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;
    result?;

    // 9. 收尾：连接选中的服务器，或打开推迟的编辑器
    if let Some(server) = app.selected.take() {
        let proxy = session::resolve_proxy(&server, &app.proxies.entries)
            .context("resolving proxy for connection")?;
        println!("Connecting to {} ...", server.alias);
        session::connect(&server, proxy).context("launching ssh")?;
    } else if let Some((path, mode)) = app.pending_editor.take() {
        println!("Opening {} ...", path.display());
        if let Err(err) = open_editor(&path, mode) {
            eprintln!("Could not open editor: {err}");
        }
        println!("Restart ssh-orchestrator to pick up config changes.");
    }

    Ok(())
}
