// ==========================================
// 生产运营看板 - 工作日历引擎核心库
// ==========================================
// 系统定位: 班次定义校验 + 日排班增量同步
// 技术栈: Rust + REST 同步边界
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 同步边界 - 外部 REST 接口契约
pub mod sync;

// API 层 - 业务编排
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssignmentKey, ScheduleTypeKind, TypeRegistry, WorkScheduleType};

// 领域实体
pub use domain::{
    ChangeItem, ChangeLine, DayAssignmentRow, ProductionFactRow, ProductionSnapshot,
    SavedLineRow, Schedule, ScheduleDraft, ScheduleLine, ScheduleStats, TimeSegment,
    WorkCenterShift,
};

// 引擎
pub use engine::{
    AssignmentAggregator, DiffOutcome, DiffReconciler, EditorSession, ScheduleValidator,
    SessionEdit, ValidationError,
};

// 同步边界
pub use sync::{
    BulkReplaceItemResult, BulkReplaceRequest, BulkReplaceResponse, ScheduleUpsertRequest,
    SyncError, WorkCalendarSync,
};

// API
pub use api::{ApiError, SaveDayReport, WorkingCalendarApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工作日历引擎";
