// ==========================================
// 工作日历引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use assignment::{
    ChangeItem, ChangeLine, DayAssignmentRow, ProductionFactRow, ProductionSnapshot,
    SavedLineRow, WorkCenterShift,
};
pub use schedule::{Schedule, ScheduleDraft, ScheduleLine, ScheduleStats, TimeSegment};
pub use types::{AssignmentKey, ScheduleTypeKind, TypeRegistry, WorkScheduleType};
