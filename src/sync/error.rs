// ==========================================
// 工作日历引擎 - 同步边界错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 冲突（过期写入）必须与一般传输失败区分,
// 两者的用户动作不同（刷新重试 vs 原样重试）
// ==========================================

use thiserror::Error;

/// 同步边界错误类型
#[derive(Error, Debug)]
pub enum SyncError {
    // ===== 并发控制 =====
    /// 服务端 updatedAt 比对失败（409 类）: 过期写入被拒
    #[error("写入冲突: 数据已被其他用户修改, 请刷新后重试")]
    Conflict,

    // ===== 传输 =====
    #[error("请求失败: HTTP {status}")]
    Http { status: u16 },

    #[error("网络错误: {0}")]
    Network(String),

    #[error("响应解析失败: {0}")]
    Decode(String),

    // ===== 通用 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SyncError {
    /// 按 HTTP 状态码归类; 409 类归为冲突
    pub fn from_status(status: u16) -> Self {
        if status == 409 {
            SyncError::Conflict
        } else {
            SyncError::Http { status }
        }
    }

    /// 界面翻译使用的稳定消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            SyncError::Conflict => "sync.conflict",
            _ => "sync.network_error",
        }
    }
}

/// Result 类型别名
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_distinguished_from_generic_failure() {
        assert!(matches!(SyncError::from_status(409), SyncError::Conflict));
        assert!(matches!(
            SyncError::from_status(500),
            SyncError::Http { status: 500 }
        ));
        assert_eq!(SyncError::from_status(409).message_key(), "sync.conflict");
    }
}
