// ==========================================
// 工作日历引擎 - API 层
// ==========================================
// 职责: 面向界面的业务编排（引擎 + 同步边界）
// 红线: API 层不含规则实现, 规则只在引擎层
// ==========================================

pub mod calendar_api;
pub mod error;

pub use calendar_api::{OpenedDay, SaveDayReport, WorkingCalendarApi};
pub use error::{ApiError, ApiResult};
