// ==========================================
// 工作日历引擎 - 差异同步引擎
// ==========================================
// 职责: 把编辑后的内存行集合与最近一次拉取的基线
// 对比, 产出最小变更集, 供单次批量写入
// 输入: targetRows（当前会话, 已按参照表过滤）
//       baselineRows（同日最近持久化状态, 同样过滤）
// 输出: DiffOutcome（无变更 / ChangeItem 集合）
// ==========================================
// 设计: 差异先行 —— 每次保存只触碰真正变化的
// (车间, 工作中心) 键; "没有变化"是可观察的成功结果,
// 与"保存了零项"严格区分
// ==========================================

use crate::domain::assignment::{ChangeItem, ChangeLine, DayAssignmentRow, SavedLineRow};
use crate::domain::types::AssignmentKey;
use crate::engine::error::ReconcileError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// ==========================================
// DiffOutcome - 差异结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// 目标与基线一致: 成功路径, 跳过网络请求
    NoChanges,
    /// 需要写入的最小变更集
    Changes(Vec<ChangeItem>),
}

// ==========================================
// DiffReconciler
// ==========================================
pub struct DiffReconciler;

impl DiffReconciler {
    /// 计算编辑态与基线之间的最小变更集
    ///
    /// # 前置校验（任一失败即中止, 不发起网络请求）
    /// - 所有行都已选择工作中心
    /// - 没有两行解析到同一 (车间, 工作中心) 键
    pub fn diff(
        target_rows: &[DayAssignmentRow],
        baseline_rows: &[SavedLineRow],
    ) -> Result<DiffOutcome, ReconcileError> {
        Self::check_keys(target_rows)?;

        let target_groups = Self::group_target(target_rows);
        let baseline_groups = Self::group_baseline(baseline_rows);

        // 两侧键的并集逐一比较
        let keys: BTreeSet<&AssignmentKey> =
            target_groups.keys().chain(baseline_groups.keys()).collect();

        let empty: Vec<ChangeLine> = Vec::new();
        let mut items = Vec::new();
        for key in keys {
            let target = target_groups.get(key).unwrap_or(&empty);
            let baseline = baseline_groups.get(key).unwrap_or(&empty);
            if target == baseline {
                continue;
            }
            // 基线有而目标无 => lines 为空的显式清空项
            items.push(ChangeItem {
                workshop_id: key.workshop_id.clone(),
                work_center_id: key.work_center_id.clone(),
                lines: target.clone(),
            });
        }

        debug!(changed = items.len(), "差异计算完成");
        if items.is_empty() {
            Ok(DiffOutcome::NoChanges)
        } else {
            Ok(DiffOutcome::Changes(items))
        }
    }

    // ===== 前置校验: 键完整且唯一 =====
    fn check_keys(rows: &[DayAssignmentRow]) -> Result<(), ReconcileError> {
        let mut seen = BTreeSet::new();
        for row in rows {
            let Some(key) = row.key() else {
                return Err(ReconcileError::EmptyWorkCenter {
                    row_id: row.id.clone(),
                });
            };
            if !seen.insert(key.clone()) {
                return Err(ReconcileError::DuplicateWorkCenterAssignment { key });
            }
        }
        Ok(())
    }

    // ===== 目标分组: 行 -> 规范化行列表 =====
    // 未选 Schedule 的班次不是可持久化事实, 不进入分组
    fn group_target(rows: &[DayAssignmentRow]) -> BTreeMap<AssignmentKey, Vec<ChangeLine>> {
        let mut groups: BTreeMap<AssignmentKey, Vec<ChangeLine>> = BTreeMap::new();
        for row in rows {
            let Some(key) = row.key() else { continue };
            let lines = groups.entry(key).or_default();
            for shift in &row.shifts {
                if let Some(schedule_id) = &shift.schedule_id {
                    lines.push(ChangeLine {
                        schedule_id: schedule_id.clone(),
                        people: shift.people,
                    });
                }
            }
        }
        for lines in groups.values_mut() {
            Self::normalize_lines(lines);
        }
        groups
    }

    // ===== 基线分组 =====
    fn group_baseline(rows: &[SavedLineRow]) -> BTreeMap<AssignmentKey, Vec<ChangeLine>> {
        let mut groups: BTreeMap<AssignmentKey, Vec<ChangeLine>> = BTreeMap::new();
        for row in rows {
            groups.entry(row.key()).or_default().push(ChangeLine {
                schedule_id: row.schedule_id.clone(),
                people: row.people,
            });
        }
        for lines in groups.values_mut() {
            Self::normalize_lines(lines);
        }
        groups
    }

    // 按 (scheduleId, people) 排序, 使比较与插入顺序无关
    fn normalize_lines(lines: &mut [ChangeLine]) {
        lines.sort();
    }
}
