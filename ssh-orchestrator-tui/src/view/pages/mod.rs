//! 列表页面

pub mod proxies;
pub mod servers;
