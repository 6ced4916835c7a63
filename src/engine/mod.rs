// ==========================================
// 工作日历引擎 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎, 不做 I/O
// 红线: 所有规则必须输出可解释的错误原因
// ==========================================

pub mod aggregator;
pub mod error;
pub mod reconciler;
pub mod session;
pub mod time_segment;
pub mod validator;

// 重导出核心引擎
pub use aggregator::AssignmentAggregator;
pub use error::{MissingFieldKind, ReconcileError, ValidationError, ValidationResult};
pub use reconciler::{DiffOutcome, DiffReconciler};
pub use session::{EditorSession, SessionEdit, SessionError};
pub use validator::{ScheduleValidator, ValidatedSchedule};
