//! 状态更新
//!
//! 唯一的写入口：主循环把每条消息交给 [`update`]，所有状态变更
//! 都在这里同步完成。后台任务不直接碰状态。

mod dashboard;
mod probe;
mod prompt;

use crate::message::AppMessage;
use crate::model::App;

/// 处理一条消息，更新应用状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::Dashboard(msg) => dashboard::update(app, msg),

        AppMessage::Prompt(msg) => prompt::update(app, msg),

        AppMessage::Probe(result) => probe::update(app, result),

        AppMessage::InstallFinished(result) => prompt::install_finished(app, result),

        AppMessage::Tick => prompt::tick(app),

        AppMessage::Noop => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::runtime::Runtime;

    use ssh_orchestrator_core::config::ConfigStore;
    use ssh_orchestrator_core::deps::DependencyCheck;
    use ssh_orchestrator_core::{CoreError, CoreResult, HostStatus, ProxyEntry, ProxyKind, ServerEntry};

    use crate::dispatch::ProbeDispatcher;
    use crate::message::{AppMessage, DashboardMessage, ProbeUpdate, PromptMessage};
    use crate::model::{ActiveView, App, Collection};

    use super::update;

    /// 可控的假依赖：`available` 决定检查结果，`succeed` 决定安装结果
    struct FakeNetcat {
        available: bool,
        succeed: bool,
    }

    #[async_trait]
    impl DependencyCheck for FakeNetcat {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn install(&self) -> CoreResult<()> {
            if self.succeed {
                Ok(())
            } else {
                Err(CoreError::InstallFailed("netcat".to_string()))
            }
        }
    }

    struct Harness {
        app: App,
        rx: Receiver<AppMessage>,
        // 任务在这个 runtime 上跑，drop 即取消
        _runtime: Runtime,
        _dir: tempfile::TempDir,
    }

    fn server(alias: &str, host: &str) -> ServerEntry {
        ServerEntry {
            alias: alias.to_string(),
            host: host.to_string(),
            user: None,
            port: None,
            identity: None,
            proxy: None,
        }
    }

    fn proxy(alias: &str, host: &str) -> ProxyEntry {
        ProxyEntry {
            alias: alias.to_string(),
            host: host.to_string(),
            port: None,
            kind: ProxyKind::Socks5,
            user: None,
            password: None,
        }
    }

    fn harness(servers: Vec<ServerEntry>, proxies: Vec<ProxyEntry>, netcat: FakeNetcat) -> Harness {
        let runtime = Runtime::new().unwrap();
        let (tx, rx) = mpsc::channel();
        let dispatcher = ProbeDispatcher::new(runtime.handle().clone(), tx);

        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path().to_path_buf());
        store.initialize().unwrap();

        let app = App::new(store, Arc::new(netcat), dispatcher, servers, proxies);
        Harness {
            app,
            rx,
            _runtime: runtime,
            _dir: dir,
        }
    }

    fn two_servers() -> Harness {
        harness(
            vec![server("alpha", "10.0.0.1"), server("beta", "10.0.0.2")],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: true,
                succeed: true,
            },
        )
    }

    fn probe_msg(
        collection: Collection,
        alias: &str,
        status: HostStatus,
        generation: u64,
    ) -> AppMessage {
        AppMessage::Probe(ProbeUpdate {
            collection,
            alias: alias.to_string(),
            status,
            generation,
        })
    }

    #[test]
    fn test_new_app_all_checking() {
        let h = two_servers();
        assert_eq!(h.app.servers.status.len(), 2);
        assert_eq!(h.app.servers.status_of("alpha"), HostStatus::Checking);
        assert_eq!(h.app.servers.status_of("beta"), HostStatus::Checking);
        assert_eq!(h.app.proxies.status.len(), 1);
        assert_eq!(h.app.proxies.status_of("hop"), HostStatus::Checking);
        assert_eq!(h.app.cursor, 0);
        assert_eq!(h.app.view, ActiveView::Servers);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut h = two_servers();
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::CursorUp));
        assert_eq!(h.app.cursor, 0, "cursor must not move above the first row");

        for _ in 0..5 {
            update(
                &mut h.app,
                AppMessage::Dashboard(DashboardMessage::CursorDown),
            );
        }
        assert_eq!(h.app.cursor, 1, "cursor must stop at the last row");
    }

    #[test]
    fn test_cursor_in_empty_collection() {
        let mut h = harness(
            vec![],
            vec![],
            FakeNetcat {
                available: true,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::CursorDown),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::CursorUp));
        assert_eq!(h.app.cursor, 0);
    }

    #[test]
    fn test_toggle_view_resets_cursor_and_message() {
        let mut h = two_servers();
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::CursorDown),
        );
        h.app.set_status("leftover");

        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        assert_eq!(h.app.view, ActiveView::Proxies);
        assert_eq!(h.app.cursor, 0);
        assert!(h.app.status_message.is_none());

        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        assert_eq!(h.app.view, ActiveView::Servers);
    }

    #[test]
    fn test_confirm_on_servers_selects_and_quits() {
        let mut h = two_servers();
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::CursorDown),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Confirm));

        assert!(h.app.should_quit);
        let selected = h.app.selected.unwrap();
        assert_eq!(selected.alias, "beta");
    }

    #[test]
    fn test_confirm_on_proxies_is_noop() {
        let mut h = two_servers();
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Confirm));

        assert!(!h.app.should_quit);
        assert!(h.app.selected.is_none());
    }

    #[test]
    fn test_probe_result_routed_by_collection() {
        let mut h = two_servers();
        update(
            &mut h.app,
            probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0),
        );
        update(
            &mut h.app,
            probe_msg(Collection::Proxies, "hop", HostStatus::Offline, 0),
        );

        assert_eq!(h.app.servers.status_of("alpha"), HostStatus::Online);
        assert_eq!(h.app.servers.status_of("beta"), HostStatus::Checking);
        assert_eq!(h.app.proxies.status_of("hop"), HostStatus::Offline);
    }

    #[test]
    fn test_probe_result_unknown_alias_dropped() {
        let mut h = two_servers();
        update(
            &mut h.app,
            probe_msg(Collection::Servers, "ghost", HostStatus::Online, 0),
        );
        assert!(!h.app.servers.status.contains_key("ghost"));
        assert_eq!(h.app.servers.status.len(), 2);
    }

    #[test]
    fn test_probe_result_applied_twice_is_idempotent() {
        let mut h = two_servers();
        let msg = probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0);
        update(&mut h.app, msg.clone());
        let after_once = h.app.servers.status.clone();
        update(&mut h.app, msg);
        assert_eq!(h.app.servers.status, after_once);
    }

    #[test]
    fn test_results_converge_regardless_of_order() {
        let forward = {
            let mut h = two_servers();
            update(
                &mut h.app,
                probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0),
            );
            update(
                &mut h.app,
                probe_msg(Collection::Servers, "beta", HostStatus::Offline, 0),
            );
            h.app.servers.status.clone()
        };
        let reversed = {
            let mut h = two_servers();
            update(
                &mut h.app,
                probe_msg(Collection::Servers, "beta", HostStatus::Offline, 0),
            );
            update(
                &mut h.app,
                probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0),
            );
            h.app.servers.status.clone()
        };

        assert_eq!(forward, reversed);
        assert_eq!(forward.get("alpha"), Some(&HostStatus::Online));
        assert_eq!(forward.get("beta"), Some(&HostStatus::Offline));
    }

    #[test]
    fn test_reload_resets_active_collection_only() {
        let mut h = two_servers();
        update(
            &mut h.app,
            probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0),
        );
        update(
            &mut h.app,
            probe_msg(Collection::Proxies, "hop", HostStatus::Online, 0),
        );

        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Reload));

        assert_eq!(h.app.servers.status_of("alpha"), HostStatus::Checking);
        assert_eq!(h.app.servers.status_of("beta"), HostStatus::Checking);
        assert_eq!(h.app.servers.generation, 1);
        // 未激活的集合不动
        assert_eq!(h.app.proxies.status_of("hop"), HostStatus::Online);
        assert_eq!(h.app.proxies.generation, 0);
    }

    #[test]
    fn test_stale_probe_result_dropped_after_reload() {
        let mut h = two_servers();
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Reload));
        assert_eq!(h.app.servers.generation, 1);

        // reload 之前派发的结果带着旧代数回来
        update(
            &mut h.app,
            probe_msg(Collection::Servers, "alpha", HostStatus::Online, 0),
        );
        assert_eq!(
            h.app.servers.status_of("alpha"),
            HostStatus::Checking,
            "a stale result must not overwrite the reset"
        );

        // 当前代数的结果正常写入
        update(
            &mut h.app,
            probe_msg(Collection::Servers, "alpha", HostStatus::Online, 1),
        );
        assert_eq!(h.app.servers.status_of("alpha"), HostStatus::Online);
    }

    #[test]
    fn test_add_server_appends_template_and_prompts() {
        let mut h = two_servers();
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));

        let ActiveView::EditorPrompt(state) = &h.app.view else {
            panic!("expected the editor prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.target, h.app.store.config_path());

        let content = std::fs::read_to_string(h.app.store.config_path()).unwrap();
        assert!(content.contains("new-server {"), "got {content:?}");
    }

    #[test]
    fn test_edit_server_prompts_without_appending() {
        let mut h = two_servers();
        let before = std::fs::read_to_string(h.app.store.config_path()).unwrap();

        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Edit));

        let ActiveView::EditorPrompt(state) = &h.app.view else {
            panic!("expected the editor prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.target, h.app.store.config_path());
        let after = std::fs::read_to_string(h.app.store.config_path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_proxy_with_netcat_appends_and_prompts() {
        let mut h = two_servers();
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));

        let ActiveView::EditorPrompt(state) = &h.app.view else {
            panic!("expected the editor prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.target, h.app.store.proxies_path());

        let content = std::fs::read_to_string(h.app.store.proxies_path()).unwrap();
        assert!(content.contains("new-proxy {"), "got {content:?}");
    }

    #[test]
    fn test_add_proxy_without_netcat_shows_install_prompt() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));

        let ActiveView::InstallPrompt(state) = &h.app.view else {
            panic!("expected the install prompt, got {:?}", h.app.view);
        };
        assert!(!state.installing);

        // 弹窗期间没有写入代理文件
        let content = std::fs::read_to_string(h.app.store.proxies_path()).unwrap();
        assert!(!content.contains("new-proxy {"));
    }

    #[test]
    fn test_editor_prompt_toggle_and_cancel() {
        use ssh_orchestrator_core::config::EditorMode;

        let mut h = two_servers();
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Edit));

        update(&mut h.app, AppMessage::Prompt(PromptMessage::ToggleChoice));
        let ActiveView::EditorPrompt(state) = &h.app.view else {
            panic!("expected the editor prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.choice, EditorMode::Terminal);

        update(&mut h.app, AppMessage::Prompt(PromptMessage::Cancel));
        assert_eq!(h.app.view, ActiveView::Servers);
        assert!(h.app.pending_editor.is_none());
    }

    #[test]
    fn test_editor_prompt_confirm_defers_launch_and_quits() {
        use ssh_orchestrator_core::config::EditorMode;

        let mut h = two_servers();
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Edit));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::ToggleChoice));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));

        assert!(h.app.should_quit);
        let (target, mode) = h.app.pending_editor.clone().unwrap();
        assert_eq!(target, h.app.store.config_path());
        assert_eq!(mode, EditorMode::Terminal);
    }

    #[test]
    fn test_install_prompt_cancel_returns_to_servers() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Edit));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Cancel));

        assert_eq!(h.app.view, ActiveView::Servers);
        assert!(h.app.status_message.is_some());
    }

    #[test]
    fn test_install_confirm_runs_installer_to_success() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));

        let ActiveView::InstallPrompt(state) = &h.app.view else {
            panic!("expected the install prompt, got {:?}", h.app.view);
        };
        assert!(state.installing);

        // 假安装立即完成，结果从通道回到 reducer
        let msg = h.rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(msg, AppMessage::InstallFinished(Ok(()))));
        update(&mut h.app, msg);

        assert_eq!(h.app.view, ActiveView::Proxies);
        assert!(h.app.status_message.is_some());
    }

    #[test]
    fn test_install_failure_returns_to_servers() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: false,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));

        let msg = h.rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(msg, AppMessage::InstallFinished(Err(_))));
        update(&mut h.app, msg);

        assert_eq!(h.app.view, ActiveView::Servers);
        let message = h.app.status_message.clone().unwrap();
        assert!(message.contains("failed"), "got {message:?}");
    }

    #[test]
    fn test_installing_ignores_cancel_and_second_confirm() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));

        // 进行中：取消和再次确认都不改变视图
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Cancel));
        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));
        let ActiveView::InstallPrompt(state) = &h.app.view else {
            panic!("expected the install prompt, got {:?}", h.app.view);
        };
        assert!(state.installing);

        // 只有第一次确认派发了安装
        let first = h.rx.recv_timeout(Duration::from_secs(2));
        assert!(first.is_ok());
        let second = h.rx.recv_timeout(Duration::from_millis(200));
        assert!(second.is_err(), "a second install must not be dispatched");
    }

    #[test]
    fn test_tick_advances_spinner_only_while_installing() {
        let mut h = harness(
            vec![],
            vec![proxy("hop", "10.0.0.3")],
            FakeNetcat {
                available: false,
                succeed: true,
            },
        );
        update(
            &mut h.app,
            AppMessage::Dashboard(DashboardMessage::ToggleView),
        );
        update(&mut h.app, AppMessage::Dashboard(DashboardMessage::Add));

        // 未开始安装时 tick 不动转轮
        update(&mut h.app, AppMessage::Tick);
        let ActiveView::InstallPrompt(state) = &h.app.view else {
            panic!("expected the install prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.spinner, 0);

        update(&mut h.app, AppMessage::Prompt(PromptMessage::Confirm));
        update(&mut h.app, AppMessage::Tick);
        update(&mut h.app, AppMessage::Tick);
        let ActiveView::InstallPrompt(state) = &h.app.view else {
            panic!("expected the install prompt, got {:?}", h.app.view);
        };
        assert_eq!(state.spinner, 2);
    }

    #[test]
    fn test_quit_message_sets_flag() {
        let mut h = two_servers();
        update(&mut h.app, AppMessage::Quit);
        assert!(h.app.should_quit);
    }
}
