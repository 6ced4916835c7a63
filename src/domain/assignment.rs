// ==========================================
// 工作日历引擎 - 日排班领域模型
// ==========================================
// DayAssignmentRow: 日编辑器内存行, 每次打开编辑器由
// 已保存行 + 生产参照表合并而成, 关闭即丢弃;
// 持久化只通过差异引擎的 ChangeItem 集合进行
// ==========================================

use crate::domain::types::AssignmentKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// SavedLineRow - 已保存的行级排班记录
// ==========================================
// 来源: 同步边界 "fetch_saved_lines" (按天查询)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLineRow {
    pub line_id: String,
    pub only_date: NaiveDate,
    #[serde(rename = "workShopId")]
    pub workshop_id: String,
    pub work_center_id: String,
    pub schedule_id: String,
    pub people: Option<i32>,
}

impl SavedLineRow {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.workshop_id.clone(), self.work_center_id.clone())
    }
}

// ==========================================
// ProductionFactRow - 生产参照表行
// ==========================================
// 来源: 同步边界 "fetch_production_facts" (计划/实际 数量与工时)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionFactRow {
    #[serde(rename = "workShopId")]
    pub workshop_id: String,
    pub work_center_id: String,
    pub plan_qty: f64,
    pub fact_qty: f64,
    pub plan_hours: f64,
    pub fact_hours: f64,
}

impl ProductionFactRow {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.workshop_id.clone(), self.work_center_id.clone())
    }

    pub fn snapshot(&self) -> ProductionSnapshot {
        ProductionSnapshot {
            plan_qty: self.plan_qty,
            fact_qty: self.fact_qty,
            plan_hours: self.plan_hours,
            fact_hours: self.fact_hours,
        }
    }
}

// ==========================================
// ProductionSnapshot - 行上只读的产出快照
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSnapshot {
    pub plan_qty: f64,
    pub fact_qty: f64,
    pub plan_hours: f64,
    pub fact_hours: f64,
}

impl ProductionSnapshot {
    /// 是否存在真实产出（任一计划/实际指标非零）
    pub fn has_output(&self) -> bool {
        self.plan_qty > 0.0 || self.fact_qty > 0.0 || self.plan_hours > 0.0 || self.fact_hours > 0.0
    }
}

// ==========================================
// WorkCenterShift - 工作中心当日班次分配
// ==========================================
// 一条 Schedule 引用 + 人数; 已持久化的班次保留服务端
// line_id 作为身份, 新增班次使用会话内 UUID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCenterShift {
    pub id: String,
    /// 未选择班次时为空, 此时该行不构成可持久化事实
    pub schedule_id: Option<String>,
    pub people: Option<i32>,
}

impl WorkCenterShift {
    /// 新建空班次（会话内身份）
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            schedule_id: None,
            people: None,
        }
    }

    /// 由已保存行还原班次（保留持久化身份, 便于后续删除）
    pub fn from_saved(line: &SavedLineRow) -> Self {
        Self {
            id: line.line_id.clone(),
            schedule_id: Some(line.schedule_id.clone()),
            people: line.people,
        }
    }
}

impl Default for WorkCenterShift {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// DayAssignmentRow - 日编辑器内存行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAssignmentRow {
    /// 会话内行身份（与持久化无关）
    pub id: String,
    pub date: NaiveDate,
    pub workshop_id: String,
    /// 新建行在选择工作中心前为空
    pub work_center_id: Option<String>,
    pub shifts: Vec<WorkCenterShift>,
    /// 只读产出快照, 仅参照表中存在该键时填充
    pub production: Option<ProductionSnapshot>,
}

impl DayAssignmentRow {
    pub fn new(date: NaiveDate, workshop_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            workshop_id: workshop_id.into(),
            work_center_id: None,
            shifts: Vec::new(),
            production: None,
        }
    }

    pub fn key(&self) -> Option<AssignmentKey> {
        self.work_center_id
            .as_ref()
            .map(|wc| AssignmentKey::new(self.workshop_id.clone(), wc.clone()))
    }

    /// 行总人数 = 各班次人数之和
    pub fn total_people(&self) -> i32 {
        self.shifts.iter().map(|s| s.people.unwrap_or(0)).sum()
    }

    /// 有真实产出的行, 其工作中心身份视为已被上游产量上报固定,
    /// 不允许再修改（编辑权限规则, 非校验规则）
    pub fn work_center_locked(&self) -> bool {
        self.production.map(|p| p.has_output()).unwrap_or(false)
    }
}

// ==========================================
// ChangeLine / ChangeItem - 差异载荷单元
// ==========================================
// ChangeItem 为单次保存的最小变更单位:
// 一个 (车间, 工作中心) 键 + 该键当日的完整行集合;
// lines 为空表示显式清空该键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLine {
    pub schedule_id: String,
    pub people: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeItem {
    #[serde(rename = "workShopId")]
    pub workshop_id: String,
    pub work_center_id: String,
    pub lines: Vec<ChangeLine>,
}

impl ChangeItem {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.workshop_id.clone(), self.work_center_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(plan_qty: f64, fact_qty: f64, plan_h: f64, fact_h: f64) -> ProductionSnapshot {
        ProductionSnapshot {
            plan_qty,
            fact_qty,
            plan_hours: plan_h,
            fact_hours: fact_h,
        }
    }

    #[test]
    fn test_snapshot_has_output() {
        assert!(!fact(0.0, 0.0, 0.0, 0.0).has_output());
        assert!(fact(10.0, 0.0, 0.0, 0.0).has_output());
        assert!(fact(0.0, 0.0, 0.0, 3.5).has_output());
    }

    #[test]
    fn test_row_lock_and_people_total() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let mut row = DayAssignmentRow::new(date, "W1");
        assert!(!row.work_center_locked());

        row.production = Some(fact(100.0, 80.0, 8.0, 7.0));
        assert!(row.work_center_locked());

        row.shifts = vec![
            WorkCenterShift {
                id: "a".to_string(),
                schedule_id: Some("S1".to_string()),
                people: Some(5),
            },
            WorkCenterShift {
                id: "b".to_string(),
                schedule_id: None,
                people: None,
            },
        ];
        assert_eq!(row.total_people(), 5);
    }

    #[test]
    fn test_saved_line_wire_format() {
        let json = r#"{
            "lineId": "3f2b8a10-0000-0000-0000-000000000001",
            "onlyDate": "2025-08-01",
            "workShopId": "W1",
            "workCenterId": "RC1",
            "scheduleId": "S1",
            "people": 4
        }"#;
        let line: SavedLineRow = serde_json::from_str(json).unwrap();
        assert_eq!(line.workshop_id, "W1");
        assert_eq!(line.key(), AssignmentKey::new("W1", "RC1"));
        assert_eq!(line.people, Some(4));
    }
}
