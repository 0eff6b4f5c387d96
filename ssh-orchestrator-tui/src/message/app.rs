//! 应用级消息

use ssh_orchestrator_core::HostStatus;

use crate::model::Collection;

use super::{DashboardMessage, PromptMessage};

/// 主循环处理的顶层消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 列表视图内的操作
    Dashboard(DashboardMessage),

    /// 弹窗内的操作
    Prompt(PromptMessage),

    /// 一次探测的结果
    Probe(ProbeUpdate),

    /// netcat 安装任务结束
    InstallFinished(Result<(), String>),

    /// 事件轮询超时产生的心跳，驱动转轮动画
    Tick,

    /// 无操作
    Noop,
}

/// 单个条目的探测结果
///
/// `generation` 是该集合发起这次探测时的代数；reducer 只接受
/// 与当前代数一致的结果，reload 之前的旧结果会被丢弃。
#[derive(Debug, Clone)]
pub struct ProbeUpdate {
    pub collection: Collection,
    pub alias: String,
    pub status: HostStatus,
    pub generation: u64,
}
