//! 探测结果合并

use log::trace;

use crate::message::ProbeUpdate;
use crate::model::{App, Collection};

/// 把一条探测结果写进对应集合的状态表
///
/// 结果带着派发时的代数回来；集合在结果返回前被 reload 过的话
/// 代数对不上，直接丢弃，旧结果不会覆盖新一轮的 Checking。
pub fn update(app: &mut App, result: ProbeUpdate) {
    let accepted = match result.collection {
        Collection::Servers => {
            result.generation == app.servers.generation
                && app.servers.merge(&result.alias, result.status)
        }
        Collection::Proxies => {
            result.generation == app.proxies.generation
                && app.proxies.merge(&result.alias, result.status)
        }
    };

    if !accepted {
        trace!(
            "[DISPATCH] Dropped result for {} (generation {})",
            result.alias,
            result.generation
        );
    }
}
