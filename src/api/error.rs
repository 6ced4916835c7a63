// ==========================================
// 工作日历引擎 - API 层错误类型
// ==========================================
// 职责: 汇聚各层错误, 转换为界面可呈现的分类
// 工具: thiserror 派生宏
// ==========================================
// 呈现策略:
// - 校验类: 行内提示, 阻断提交, 不发网络请求
// - 冲突类: 提示刷新后重试, 不自动重试
// - 传输类: 横幅提示, 用户手动重试
// ==========================================

use crate::domain::types::TaxonomyError;
use crate::engine::error::{ReconcileError, ValidationError};
use crate::engine::session::SessionError;
use crate::sync::SyncError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 表单校验（本地可恢复）=====
    #[error("表单校验失败: {0}")]
    Validation(#[from] ValidationError),

    // ===== 差异前置校验（本地可恢复）=====
    #[error("保存前校验失败: {0}")]
    Reconcile(#[from] ReconcileError),

    // ===== 会话编辑权限 =====
    #[error("编辑被拒绝: {0}")]
    Session(#[from] SessionError),

    // ===== 启动期类型字典 =====
    #[error("类型字典不完整: {0}")]
    Taxonomy(#[from] TaxonomyError),

    // ===== 同步边界 =====
    #[error("同步失败: {0}")]
    Sync(#[from] SyncError),

    // ===== 通用 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为过期写入冲突（界面提示刷新重试）
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Sync(SyncError::Conflict))
    }

    /// 是否为本地校验类错误（不产生网络请求）
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self,
            ApiError::Validation(_) | ApiError::Reconcile(_) | ApiError::Session(_)
        )
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
