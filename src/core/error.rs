use thiserror::Error;

/// 游戏核心的错误分类
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// 调用方传入了不合法的参数（负数、越界索引、未知名称……）
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// 配置或目录数据有误，启动时即致命
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GameError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
