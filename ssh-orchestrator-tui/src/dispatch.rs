//! 后台任务派发
//!
//! 每个条目一个独立的探测任务，跑在共享的 tokio runtime 上；
//! 任务完成后把结果作为 [`AppMessage`] 发回主循环的通道。
//! 完成顺序不保证，也不做取消：旧代数的结果由 reducer 按代数丢弃。

use std::sync::mpsc::Sender;
use std::sync::Arc;

use log::{debug, error, warn};
use tokio::runtime::Handle;

use ssh_orchestrator_core::deps::DependencyCheck;
use ssh_orchestrator_core::probe;

use crate::message::{AppMessage, ProbeUpdate};
use crate::model::Collection;

/// 探测与安装任务的派发器
pub struct ProbeDispatcher {
    handle: Handle,
    tx: Sender<AppMessage>,
}

impl ProbeDispatcher {
    pub fn new(handle: Handle, tx: Sender<AppMessage>) -> Self {
        Self { handle, tx }
    }

    /// 为一个条目派发一次探测，结果带上集合与代数标记
    pub fn spawn_probe(
        &self,
        collection: Collection,
        alias: String,
        host: String,
        port: Option<u16>,
        generation: u64,
    ) {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let status = probe::check_host(&host, port).await;
            debug!("[DISPATCH] {alias} -> {}", status.as_str());
            // 主循环已退出时通道关闭，结果直接丢弃
            tx.send(AppMessage::Probe(ProbeUpdate {
                collection,
                alias,
                status,
                generation,
            }))
            .ok();
        });
    }

    /// 派发一次 netcat 安装，结束后送回 `InstallFinished`
    pub fn spawn_install(&self, dep: Arc<dyn DependencyCheck>) {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = match dep.install().await {
                Ok(()) => Ok(()),
                Err(err) => {
                    if err.is_expected() {
                        warn!("[DEPS] Install did not complete: {err}");
                    } else {
                        error!("[DEPS] Install failed: {err}");
                    }
                    Err(err.to_string())
                }
            };
            tx.send(AppMessage::InstallFinished(result)).ok();
        });
    }
}
