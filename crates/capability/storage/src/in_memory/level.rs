//! 层级内存存储实现

use crate::error::StorageError;
use crate::traits::LevelStore;
use domain::{Level, LevelRecord};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 层级内存存储，键为层级编号。
pub struct InMemoryLevelStore {
    levels: RwLock<HashMap<i64, LevelRecord>>,
}

impl InMemoryLevelStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// 预置 Video / Audio1 两个层级。
    pub fn with_default_levels() -> Self {
        Self::from_records(default_levels())
    }

    pub fn from_records(records: Vec<LevelRecord>) -> Self {
        let levels = records
            .into_iter()
            .map(|level| (level.number, level))
            .collect();
        Self {
            levels: RwLock::new(levels),
        }
    }

    pub fn records(&self) -> Result<Vec<LevelRecord>, StorageError> {
        let map = self.levels.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<LevelRecord> = map.values().cloned().collect();
        items.sort_by_key(|level| level.number);
        Ok(items)
    }
}

impl Default for InMemoryLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 默认层级表。
pub fn default_levels() -> Vec<LevelRecord> {
    vec![
        LevelRecord {
            id: Uuid::new_v4(),
            number: Level::Video.number(),
            name: "Video".to_string(),
        },
        LevelRecord {
            id: Uuid::new_v4(),
            number: Level::Audio1.number(),
            name: "Audio1".to_string(),
        },
    ]
}

#[async_trait::async_trait]
impl LevelStore for InMemoryLevelStore {
    async fn find_level_by_number(&self, number: i64) -> Result<Option<LevelRecord>, StorageError> {
        let map = self.levels.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(&number).cloned())
    }

    async fn create_level(&self, level: LevelRecord) -> Result<LevelRecord, StorageError> {
        let mut map = self.levels.write().map_err(|_| StorageError::Lock)?;
        if map.contains_key(&level.number) {
            return Err(StorageError::Conflict {
                kind: "level",
                name: level.name,
            });
        }
        map.insert(level.number, level.clone());
        Ok(level)
    }
}
