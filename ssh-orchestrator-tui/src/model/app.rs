//! 应用主状态结构

use std::path::PathBuf;
use std::sync::Arc;

use ssh_orchestrator_core::config::{ConfigStore, EditorMode};
use ssh_orchestrator_core::deps::DependencyCheck;
use ssh_orchestrator_core::session::DEFAULT_PROXY_PORT;
use ssh_orchestrator_core::{ProxyEntry, ServerEntry};

use crate::dispatch::ProbeDispatcher;

use super::{ActiveView, Collection, CollectionState};

/// 应用主状态
///
/// 只有 `update::update` 在主循环里改写它；后台任务只通过
/// 消息通道送回结果。
pub struct App {
    /// 是否应该退出主循环
    pub should_quit: bool,

    /// 当前视图
    pub view: ActiveView,

    /// 当前列表的光标，始终落在激活集合的边界内
    pub cursor: usize,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// 服务器集合
    pub servers: CollectionState<ServerEntry>,
    /// 代理集合
    pub proxies: CollectionState<ProxyEntry>,

    /// Enter 选中的服务器；主循环结束后由 main 发起连接
    pub selected: Option<ServerEntry>,
    /// 退出后要打开的编辑器目标；推迟到终端恢复之后执行，
    /// 终端编辑器才不会画进备用屏幕
    pub pending_editor: Option<(PathBuf, EditorMode)>,

    /// 配置文件存储
    pub store: ConfigStore,
    /// netcat 依赖检查与安装
    pub netcat: Arc<dyn DependencyCheck>,
    /// 探测任务派发器
    pub dispatcher: ProbeDispatcher,
}

impl App {
    /// 创建初始状态：Servers 视图、光标 0、两张状态表全 Checking
    pub fn new(
        store: ConfigStore,
        netcat: Arc<dyn DependencyCheck>,
        dispatcher: ProbeDispatcher,
        servers: Vec<ServerEntry>,
        proxies: Vec<ProxyEntry>,
    ) -> Self {
        Self {
            should_quit: false,
            view: ActiveView::Servers,
            cursor: 0,
            status_message: None,
            servers: CollectionState::new(servers),
            proxies: CollectionState::new(proxies),
            selected: None,
            pending_editor: None,
            store,
            netcat,
            dispatcher,
        }
    }

    /// 设置状态栏消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态栏消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// 切换视图并把光标压回新激活集合的边界内
    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.active_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// 当前激活的集合；弹窗视图下回落到 Servers，
    /// 与"Esc 总是回到 Servers"保持一致
    pub fn active_collection(&self) -> Collection {
        match self.view {
            ActiveView::Proxies => Collection::Proxies,
            _ => Collection::Servers,
        }
    }

    pub fn active_len(&self) -> usize {
        match self.active_collection() {
            Collection::Servers => self.servers.len(),
            Collection::Proxies => self.proxies.len(),
        }
    }

    /// 重置一个集合的状态并为每个条目派发一次探测。
    /// 启动时的首次探测与 reload 走同一条路径。
    pub fn refresh(&mut self, collection: Collection) {
        match collection {
            Collection::Servers => {
                let generation = self.servers.begin_probe();
                for entry in &self.servers.entries {
                    self.dispatcher.spawn_probe(
                        Collection::Servers,
                        entry.alias.clone(),
                        entry.host.clone(),
                        entry.port,
                        generation,
                    );
                }
            }
            Collection::Proxies => {
                let generation = self.proxies.begin_probe();
                for entry in &self.proxies.entries {
                    self.dispatcher.spawn_probe(
                        Collection::Proxies,
                        entry.alias.clone(),
                        entry.host.clone(),
                        Some(entry.port.unwrap_or(DEFAULT_PROXY_PORT)),
                        generation,
                    );
                }
            }
        }
    }
}
