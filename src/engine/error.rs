// ==========================================
// 工作日历引擎 - 引擎层错误类型
// ==========================================
// 职责: 定义校验与差异计算的错误分类
// 工具: thiserror 派生宏
// 红线: 每种错误必须可定位到具体记录/具体键,
// 且携带稳定的 i18n 消息键供界面翻译
// ==========================================

use crate::domain::types::AssignmentKey;
use thiserror::Error;

// ==========================================
// MissingFieldKind - 缺失字段分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFieldKind {
    /// 未选择车间
    Workshop,
    /// 班次名称为空
    ScheduleName,
    /// 没有任何时间记录
    TimeRecords,
    /// 记录未选择类型
    RecordType,
    /// 记录缺少开始/结束时间
    StartEndTime,
    /// 字典中未解析到工作班次类型（元数据未加载）
    WorkshiftType,
}

// ==========================================
// ValidationError - 表单级校验错误
// ==========================================
// 全部为本地可恢复错误: 阻断提交, 不发起网络请求
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("必填项缺失: {field:?}")]
    MissingField { field: MissingFieldKind },

    #[error("时间格式错误: 第{index}条记录")]
    InvalidTimeFormat { index: usize },

    #[error("时间段时长非法: 第{index}条记录")]
    InvalidSpan { index: usize },

    #[error("工作班次记录数错误: 实际{count}条, 要求恰好1条")]
    WrongShiftCount { count: usize },

    #[error("第一条记录必须是工作班次")]
    FirstRecordNotWorkshift,

    #[error("同类型时间段重叠: 第{first}条与第{second}条")]
    OverlappingSegments { first: usize, second: usize },

    #[error("休息总时长超过班次时长: {breaks_total}分钟 > {shift_span}分钟")]
    BreaksExceedShift { breaks_total: u32, shift_span: u32 },

    #[error("重复的时间记录: 第{index}条")]
    DuplicateSegment { index: usize },
}

impl ValidationError {
    /// 界面翻译使用的稳定消息键（locales/*.yml）
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => match field {
                MissingFieldKind::Workshop => "validation.workshop_required",
                MissingFieldKind::ScheduleName => "validation.schedule_name_required",
                MissingFieldKind::TimeRecords => "validation.time_records_required",
                MissingFieldKind::RecordType => "validation.record_type_required",
                MissingFieldKind::StartEndTime => "validation.time_required",
                MissingFieldKind::WorkshiftType => "validation.workshift_type_not_found",
            },
            // 无法解析的时刻在界面上与缺少时间同样提示
            ValidationError::InvalidTimeFormat { .. } => "validation.time_required",
            ValidationError::InvalidSpan { .. } => "validation.end_time_after_start",
            ValidationError::WrongShiftCount { .. } => "validation.exactly_one_workshift",
            ValidationError::FirstRecordNotWorkshift => {
                "validation.first_record_must_be_workshift"
            }
            ValidationError::OverlappingSegments { .. } => "validation.no_time_overlap",
            ValidationError::BreaksExceedShift { .. } => "validation.breaks_exceed_shift",
            ValidationError::DuplicateSegment { .. } => "validation.no_duplicates",
        }
    }

    /// 翻译为当前语言的界面消息
    pub fn localized_message(&self) -> String {
        crate::i18n::t(self.message_key())
    }
}

/// Result 类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;

// ==========================================
// ReconcileError - 差异前置校验错误
// ==========================================
// 与表单校验同策略: 本地阻断, 不发起网络请求
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("存在未选择工作中心的行: row_id={row_id}")]
    EmptyWorkCenter { row_id: String },

    #[error("工作中心重复分配: {key}")]
    DuplicateWorkCenterAssignment { key: AssignmentKey },
}

impl ReconcileError {
    pub fn message_key(&self) -> &'static str {
        match self {
            ReconcileError::EmptyWorkCenter { .. } => "reconcile.work_center_required",
            ReconcileError::DuplicateWorkCenterAssignment { .. } => {
                "reconcile.duplicate_assignment"
            }
        }
    }

    pub fn localized_message(&self) -> String {
        crate::i18n::t(self.message_key())
    }
}
