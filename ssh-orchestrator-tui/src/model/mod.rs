//! 应用状态模型

mod app;
mod list;
mod view;

pub use app::App;
pub use list::{Aliased, CollectionState};
pub use view::{ActiveView, Collection, EditorPromptState, InstallPromptState};
