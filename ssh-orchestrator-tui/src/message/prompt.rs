//! 弹窗消息

/// 编辑器选择弹窗与安装确认弹窗内的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMessage {
    /// 在两个编辑器模式之间切换
    ToggleChoice,

    /// 确认：打开编辑器 / 开始安装
    Confirm,

    /// 取消，回到 Servers 视图
    Cancel,
}
