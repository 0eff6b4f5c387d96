//! 快捷键配置

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));

    // 列表视图
    pub const RELOAD: KeyBinding = KeyBinding::key(KeyCode::Char('r'));
    pub const ADD: KeyBinding = KeyBinding::key(KeyCode::Char('a'));
    pub const EDIT: KeyBinding = KeyBinding::key(KeyCode::Char('e'));

    // 安装确认
    pub const CONFIRM_INSTALL: KeyBinding = KeyBinding::key(KeyCode::Char('y'));
    pub const DECLINE_INSTALL: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
}
