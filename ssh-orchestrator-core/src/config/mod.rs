//! Host configuration: block-grammar parser, on-disk store and editor launch

pub mod editor;
pub mod parser;
pub mod store;

pub use editor::{open_editor, EditorMode};
pub use parser::{parse_proxies, parse_servers, ParseError};
pub use store::ConfigStore;
