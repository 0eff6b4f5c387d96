//! 输入事件处理

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
