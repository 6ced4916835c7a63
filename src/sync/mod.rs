// ==========================================
// 工作日历引擎 - 同步边界
// ==========================================
// 职责: 定义核心依赖的外部 REST 契约（trait + DTO）
// 红线: 核心不关心具体路由与传输细节, 只依赖本模块
// 的逻辑操作; 实现者负责 HTTP/缓存/重取
// ==========================================
// 并发模型: 写入用 updatedAt 时间戳比对做乐观并发,
// 过期写入由服务端拒绝并以冲突状态返回, 引擎向用户
// 呈现"刷新后重试", 不做静默覆盖、不自动重试
// ==========================================

pub mod error;

pub use error::{SyncError, SyncResult};

use crate::domain::assignment::{ChangeItem, ProductionFactRow, SavedLineRow};
use crate::domain::schedule::{Schedule, ScheduleLine};
use crate::domain::types::WorkScheduleType;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleUpsertRequest - 班次创建/更新载荷
// ==========================================
// 更新时携带最近已知的 updatedAt 供服务端并发检查
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpsertRequest {
    #[serde(rename = "workshopId")]
    pub workshop_id: String,
    pub name: String,
    pub is_favorite: bool,
    pub lines: Vec<ScheduleLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

// ==========================================
// BulkReplaceRequest - 批量替换请求
// ==========================================
// 每次保存动作最多发起一次; 服务端按 item 逐个成败,
// 不做跨 item 的整体事务
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReplaceRequest {
    pub date: NaiveDate,
    pub items: Vec<ChangeItem>,
}

// ==========================================
// BulkReplaceItemResult - 单个键的写入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReplaceItemResult {
    #[serde(rename = "workShopId")]
    pub workshop_id: String,
    pub work_center_id: String,
    /// 本键新建的行数（失败时缺省）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<usize>,
    /// 失败原因; 无错误即本键独立成功
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkReplaceItemResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ==========================================
// BulkReplaceResponse - 批量替换响应
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReplaceResponse {
    /// 实际写入的行总数
    pub processed: usize,
    /// 写入后的最新行（用于推进基线）
    pub rows: Vec<SavedLineRow>,
    /// 逐键结果
    pub items: Vec<BulkReplaceItemResult>,
}

// ==========================================
// WorkCalendarSync Trait
// ==========================================
// 实现者: REST 客户端（生产）/ 内存桩（测试）
#[async_trait]
pub trait WorkCalendarSync: Send + Sync {
    // ===== 类型字典 =====

    /// 拉取班次类型字典（启动时绑定 TypeRegistry 用）
    async fn fetch_schedule_types(&self) -> SyncResult<Vec<WorkScheduleType>>;

    // ===== 班次定义 CRUD =====

    /// 拉取班次定义列表
    async fn fetch_schedules(&self) -> SyncResult<Vec<Schedule>>;

    /// 新建班次定义
    async fn create_schedule(&self, request: ScheduleUpsertRequest) -> SyncResult<Schedule>;

    /// 更新班次定义; 过期的 updatedAt 返回 SyncError::Conflict
    async fn update_schedule(
        &self,
        schedule_id: &str,
        request: ScheduleUpsertRequest,
    ) -> SyncResult<Schedule>;

    /// 删除班次定义（软删除）
    async fn delete_schedule(&self, schedule_id: &str) -> SyncResult<()>;

    // ===== 日排班 =====

    /// 按天拉取已保存的行级排班记录
    async fn fetch_saved_lines(&self, date: NaiveDate) -> SyncResult<Vec<SavedLineRow>>;

    /// 按天拉取生产参照表（计划/实际 数量与工时）
    async fn fetch_production_facts(&self, date: NaiveDate)
        -> SyncResult<Vec<ProductionFactRow>>;

    /// 按键批量替换当日排班; 逐 item 独立成败
    async fn bulk_replace(&self, request: BulkReplaceRequest)
        -> SyncResult<BulkReplaceResponse>;

    /// 软删除单条已保存行
    async fn delete_line(&self, line_id: &str) -> SyncResult<()>;
}
