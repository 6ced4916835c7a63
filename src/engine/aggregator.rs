// ==========================================
// 工作日历引擎 - 日排班聚合器
// ==========================================
// 职责: 把当日已保存的行级记录与生产参照表合并为
// 每 (车间, 工作中心) 一条可编辑行
// 输入: SavedLineRow 列表 + ProductionFactRow 列表
// 输出: DayAssignmentRow 集合（内存态, 供编辑会话使用）
// ==========================================
// 红线: 参照表是合法 (车间, 工作中心) 组合的唯一事实
// 来源 —— 不在参照表中的键不进入后续持久化
// ==========================================

use crate::domain::assignment::{
    DayAssignmentRow, ProductionFactRow, ProductionSnapshot, SavedLineRow, WorkCenterShift,
};
use crate::domain::types::AssignmentKey;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

// ==========================================
// AssignmentAggregator
// ==========================================
pub struct AssignmentAggregator;

impl AssignmentAggregator {
    /// 合并当日数据为可编辑行集合
    ///
    /// # 步骤
    /// 1. 已保存行按键分组, 每组一行, 班次保留持久化身份
    /// 2. 按键挂接生产快照
    /// 3. 参照表中有产出但尚未排班的键补空行（零产出不补,
    ///    避免制造噪声行）
    /// 4. 输出按键有序, 便于界面稳定展示
    pub fn build_rows(
        date: NaiveDate,
        saved_lines: &[SavedLineRow],
        facts: &[ProductionFactRow],
    ) -> Vec<DayAssignmentRow> {
        let fact_by_key: BTreeMap<AssignmentKey, ProductionSnapshot> =
            facts.iter().map(|f| (f.key(), f.snapshot())).collect();

        // 步骤1: 已保存行分组
        let mut grouped: BTreeMap<AssignmentKey, Vec<WorkCenterShift>> = BTreeMap::new();
        for line in saved_lines {
            grouped
                .entry(line.key())
                .or_default()
                .push(WorkCenterShift::from_saved(line));
        }

        let mut rows = Vec::with_capacity(grouped.len());
        for (key, shifts) in &grouped {
            rows.push(DayAssignmentRow {
                id: Uuid::new_v4().to_string(),
                date,
                workshop_id: key.workshop_id.clone(),
                work_center_id: Some(key.work_center_id.clone()),
                shifts: shifts.clone(),
                // 步骤2: 挂接生产快照
                production: fact_by_key.get(key).copied(),
            });
        }

        // 步骤3: 有产出但未排班的键补空行
        for (key, snapshot) in &fact_by_key {
            if grouped.contains_key(key) || !snapshot.has_output() {
                continue;
            }
            rows.push(DayAssignmentRow {
                id: Uuid::new_v4().to_string(),
                date,
                workshop_id: key.workshop_id.clone(),
                work_center_id: Some(key.work_center_id.clone()),
                shifts: Vec::new(),
                production: Some(*snapshot),
            });
        }

        rows.sort_by(|a, b| (a.key(), &a.id).cmp(&(b.key(), &b.id)));
        debug!(
            rows = rows.len(),
            saved_lines = saved_lines.len(),
            facts = facts.len(),
            "日排班行聚合完成"
        );
        rows
    }

    /// 按参照表过滤行集合: 只保留键存在于参照表中的行
    ///
    /// 差异引擎的输入必须先经过此过滤 —— 用户即便给
    /// 参照表之外的行添加了班次, 也不会被持久化
    pub fn restrict_to_reference(
        rows: &[DayAssignmentRow],
        facts: &[ProductionFactRow],
    ) -> Vec<DayAssignmentRow> {
        let known: std::collections::BTreeSet<AssignmentKey> =
            facts.iter().map(|f| f.key()).collect();
        rows.iter()
            .filter(|row| match row.key() {
                Some(key) => known.contains(&key),
                // 未选工作中心的行留给差异引擎的前置校验报错
                None => true,
            })
            .cloned()
            .collect()
    }
}
