// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use working_calendar::domain::assignment::{ProductionFactRow, SavedLineRow};
use working_calendar::domain::schedule::{ScheduleDraft, ScheduleLine};
use working_calendar::domain::types::WorkScheduleType;

pub const WORKSHIFT_TYPE: &str = "T-WORKSHIFT";
pub const BREAKS_TYPE: &str = "T-BREAKS";

/// 标准两项类型字典（工作班次 + 休息时间）
pub fn full_taxonomy() -> Vec<WorkScheduleType> {
    vec![
        WorkScheduleType {
            id: WORKSHIFT_TYPE.to_string(),
            name_en: "Work Shift".to_string(),
            name_zh: "工作班次".to_string(),
        },
        WorkScheduleType {
            id: BREAKS_TYPE.to_string(),
            name_en: "Breaks".to_string(),
            name_zh: "休息时间".to_string(),
        },
    ]
}

/// 缺少工作班次的残缺字典
pub fn taxonomy_without_workshift() -> Vec<WorkScheduleType> {
    full_taxonomy()
        .into_iter()
        .filter(|t| t.id != WORKSHIFT_TYPE)
        .collect()
}

// ==========================================
// ScheduleDraft 构建器
// ==========================================

pub struct DraftBuilder {
    draft: ScheduleDraft,
}

impl DraftBuilder {
    pub fn new(workshop_id: &str, name: &str) -> Self {
        Self {
            draft: ScheduleDraft {
                workshop_id: Some(workshop_id.to_string()),
                name: name.to_string(),
                ..ScheduleDraft::default()
            },
        }
    }

    pub fn workshift(mut self, start: &str, end: &str) -> Self {
        self.draft.lines.push(ScheduleLine {
            type_id: WORKSHIFT_TYPE.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        });
        self
    }

    pub fn breaks(mut self, start: &str, end: &str) -> Self {
        self.draft.lines.push(ScheduleLine {
            type_id: BREAKS_TYPE.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        });
        self
    }

    pub fn updated_at(mut self, at: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        self.draft.updated_at = at;
        self
    }

    pub fn build(self) -> ScheduleDraft {
        self.draft
    }
}

// ==========================================
// 日排班数据
// ==========================================

pub fn saved_line(
    line_id: &str,
    date: NaiveDate,
    ws: &str,
    wc: &str,
    schedule: &str,
    people: i32,
) -> SavedLineRow {
    SavedLineRow {
        line_id: line_id.to_string(),
        only_date: date,
        workshop_id: ws.to_string(),
        work_center_id: wc.to_string(),
        schedule_id: schedule.to_string(),
        people: Some(people),
    }
}

pub fn fact(ws: &str, wc: &str, plan_qty: f64, fact_qty: f64) -> ProductionFactRow {
    ProductionFactRow {
        workshop_id: ws.to_string(),
        work_center_id: wc.to_string(),
        plan_qty,
        fact_qty,
        plan_hours: 0.0,
        fact_hours: 0.0,
    }
}
