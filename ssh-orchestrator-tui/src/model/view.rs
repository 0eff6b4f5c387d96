//! 视图状态定义

use std::path::PathBuf;

use ssh_orchestrator_core::config::EditorMode;

/// 两个条目集合的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Servers,
    Proxies,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Servers => "Servers",
            Self::Proxies => "Proxies",
        }
    }
}

/// 当前激活的视图
///
/// 每个弹窗的局部状态直接挂在变体上，视图切换即状态切换，
/// 不存在"弹窗开着但状态残留在别处"的情况。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveView {
    Servers,
    Proxies,
    EditorPrompt(EditorPromptState),
    InstallPrompt(InstallPromptState),
}

impl ActiveView {
    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::EditorPrompt(_) | Self::InstallPrompt(_))
    }
}

/// 编辑器选择弹窗的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPromptState {
    /// 要打开的配置文件
    pub target: PathBuf,
    /// 当前选中的编辑器模式
    pub choice: EditorMode,
}

impl EditorPromptState {
    pub fn new(target: PathBuf) -> Self {
        Self {
            target,
            choice: EditorMode::System,
        }
    }
}

/// 安装确认弹窗的状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallPromptState {
    /// 安装进行中；期间忽略一切按键
    pub installing: bool,
    /// 转轮动画帧计数
    pub spinner: usize,
}

impl InstallPromptState {
    pub fn new() -> Self {
        Self::default()
    }
}
