//! 消息定义
//!
//! 所有状态变更都由消息驱动：按键经 `event/` 翻译成消息，
//! 后台探测与安装任务把完成结果作为消息发回主循环。

mod app;
mod dashboard;
mod prompt;

pub use app::{AppMessage, ProbeUpdate};
pub use dashboard::DashboardMessage;
pub use prompt::PromptMessage;
