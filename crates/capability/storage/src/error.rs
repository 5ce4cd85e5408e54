//! 存储层错误类型

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("lock failed")]
    Lock,
    #[error("{kind} exists: {name}")]
    Conflict { kind: &'static str, name: String },
    #[error("state error: {0}")]
    State(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
