// ==========================================
// 工作日历引擎 - 班次定义领域模型
// ==========================================
// Schedule: 可复用的班次定义（一条工作班次 + 若干休息时间）,
// 按车间归属, 与具体日期无关
// ==========================================

use crate::domain::types::ScheduleTypeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleLine - 班次时间记录（线格式）
// ==========================================
// 表单与 REST 边界共用的原始形态, 时间为 "HH:MM" 字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLine {
    pub type_id: String,
    pub start: String, // "HH:MM"
    pub end: String,   // "HH:MM"
}

// ==========================================
// ScheduleDraft - 表单草稿
// ==========================================
// 校验器输入: 尚未确认合法的表单状态
#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    pub workshop_id: Option<String>,
    pub name: String,
    pub is_favorite: bool,
    pub lines: Vec<ScheduleLine>,
    /// 编辑已有班次时携带, 用于服务端乐观并发检查
    pub updated_at: Option<DateTime<Utc>>,
}

// ==========================================
// TimeSegment - 已解析的时间段
// ==========================================
// 校验通过后的规范形态: 分钟制 [0,1440), 可跨午夜
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSegment {
    pub kind: ScheduleTypeKind,
    pub start_minute: u32,
    pub end_minute: u32,
}

// ==========================================
// Schedule - 已持久化的班次定义
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule_id: String,
    #[serde(rename = "workshopId")]
    pub workshop_id: String,
    pub name: String,
    pub is_favorite: bool,
    pub lines: Vec<ScheduleLine>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ==========================================
// ScheduleStats - 班次派生统计
// ==========================================
// 用途: 日编辑器子行展示（时长 / 休息次数 / 净工时）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    /// 工作班次时长（分钟）
    pub shift_span_minutes: u32,
    /// 休息时间记录数
    pub breaks_count: usize,
    /// 休息时间总时长（分钟）
    pub breaks_total_minutes: u32,
    /// 净工作时长（分钟）= 班次时长 - 休息总时长
    pub net_work_minutes: u32,
}

// 统计的计算由校验器在产出 ValidatedSchedule 时完成
// (见 engine::validator), 领域层只承载结果形态
