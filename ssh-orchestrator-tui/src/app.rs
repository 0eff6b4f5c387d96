//! 应用主循环
//!
//! 单写者事件循环：后台探测与安装任务只通过 channel 发消息回来，
//! 所有状态修改都发生在这一个线程上。
//!
//! loop {
//!     drain channel                // 先消费积压的后台结果
//!     terminal.draw(...)           // 渲染 UI
//!     if app.should_quit { break }
//!     poll_event(100ms)            // 有事件则翻译成消息，否则发一个 Tick
//!     update::update(app, msg)
//! }

use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::Result;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub fn run(terminal: &mut Term, app: &mut App, rx: &Receiver<AppMessage>) -> Result<()> {
    loop {
        // 1. 消费后台任务发来的消息（探测结果、安装完成）
        while let Ok(msg) = rx.try_recv() {
            update::update(app, msg);
        }

        // 2. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 3. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 4. 轮询事件（100ms 超时），无事件时发 Tick 驱动动画
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        } else {
            update::update(app, AppMessage::Tick);
        }
    }

    Ok(())
}
