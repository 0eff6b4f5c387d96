//! 列表视图消息

/// Servers / Proxies 列表视图内的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardMessage {
    /// 在 Servers 与 Proxies 之间切换
    ToggleView,

    /// 光标上移
    CursorUp,

    /// 光标下移
    CursorDown,

    /// 确认当前条目（Servers 上为选中并退出）
    Confirm,

    /// 重置当前集合的状态并重新探测
    Reload,

    /// 追加模板并打开编辑器选择弹窗
    Add,

    /// 打开编辑器选择弹窗编辑当前集合
    Edit,
}
