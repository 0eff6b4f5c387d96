//! 条目集合与探测状态

use std::collections::HashMap;

use ssh_orchestrator_core::{HostStatus, ProxyEntry, ServerEntry};

/// 列表条目按别名索引自己的探测状态
pub trait Aliased {
    fn alias(&self) -> &str;
}

impl Aliased for ServerEntry {
    fn alias(&self) -> &str {
        &self.alias
    }
}

impl Aliased for ProxyEntry {
    fn alias(&self) -> &str {
        &self.alias
    }
}

/// 一个集合的条目、各条目的探测状态与当前探测代数
///
/// 状态表的键集始终等于条目的别名集：构造时全部写入 Checking，
/// 之后只有 `merge` 原地覆盖已有的键。
pub struct CollectionState<T> {
    pub entries: Vec<T>,
    pub status: HashMap<String, HostStatus>,
    pub generation: u64,
}

impl<T: Aliased> CollectionState<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let status = entries
            .iter()
            .map(|entry| (entry.alias().to_owned(), HostStatus::Checking))
            .collect();
        Self {
            entries,
            status,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 同步把所有条目重置为 Checking 并递增代数，返回新代数。
    /// 旧代数的在途结果会因代数不匹配被 reducer 丢弃。
    pub fn begin_probe(&mut self) -> u64 {
        for slot in self.status.values_mut() {
            *slot = HostStatus::Checking;
        }
        self.generation += 1;
        self.generation
    }

    /// 写入一条探测结果；未知别名被丢弃，返回是否写入
    pub fn merge(&mut self, alias: &str, status: HostStatus) -> bool {
        match self.status.get_mut(alias) {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    pub fn status_of(&self, alias: &str) -> HostStatus {
        self.status
            .get(alias)
            .copied()
            .unwrap_or(HostStatus::Checking)
    }
}
