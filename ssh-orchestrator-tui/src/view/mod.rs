//! UI 渲染

mod components;
mod layout;
mod pages;
mod theme;

pub use layout::render;
