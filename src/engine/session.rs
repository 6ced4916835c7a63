// ==========================================
// 工作日历引擎 - 日编辑会话
// ==========================================
// 职责: 持有编辑中的行集合, 以纯归约函数演进状态
// 红线: 状态是不可变值 —— 每次编辑产生新会话快照,
// 聚合/校验/差异引擎看不到任何隐藏可变量
// ==========================================
// 会话归活动编辑器独占, 关闭即丢弃; 没有草稿持久化,
// 唯一会被持久化的是差异引擎的输出
// ==========================================

use crate::domain::assignment::{DayAssignmentRow, WorkCenterShift};
use chrono::NaiveDate;
use thiserror::Error;

// ==========================================
// SessionError - 编辑权限/定位错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("行不存在: row_id={0}")]
    RowNotFound(String),

    #[error("班次不存在: shift_id={0}")]
    ShiftNotFound(String),

    #[error("有产出的行不可修改工作中心: row_id={0}")]
    WorkCenterLocked(String),

    #[error("有产出的行不可删除: row_id={0}")]
    RowLocked(String),

    #[error("人数不能为负: {0}")]
    NegativePeople(i32),
}

// ==========================================
// SessionEdit - 编辑动作
// ==========================================
#[derive(Debug, Clone)]
pub enum SessionEdit {
    /// 在指定车间追加一条空行
    AddRow { workshop_id: String },
    /// 删除整行（有产出的行拒绝）
    RemoveRow { row_id: String },
    /// 改选工作中心（有产出的行拒绝）
    SetWorkCenter {
        row_id: String,
        work_center_id: String,
    },
    /// 给行追加一条空班次
    AddShift { row_id: String },
    /// 删除一条班次
    RemoveShift { row_id: String, shift_id: String },
    /// 选择班次引用的 Schedule
    SetShiftSchedule {
        row_id: String,
        shift_id: String,
        schedule_id: String,
    },
    /// 修改班次人数（>= 0）
    SetShiftPeople {
        row_id: String,
        shift_id: String,
        people: i32,
    },
}

// ==========================================
// EditorSession - 会话快照
// ==========================================
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub date: NaiveDate,
    pub rows: Vec<DayAssignmentRow>,
}

impl EditorSession {
    pub fn new(date: NaiveDate, rows: Vec<DayAssignmentRow>) -> Self {
        Self { date, rows }
    }

    /// 应用一次编辑, 返回新快照; 原快照保持不变
    pub fn apply_edit(&self, edit: SessionEdit) -> Result<EditorSession, SessionError> {
        let mut next = self.clone();
        match edit {
            SessionEdit::AddRow { workshop_id } => {
                next.rows.push(DayAssignmentRow::new(self.date, workshop_id));
            }

            SessionEdit::RemoveRow { row_id } => {
                let row = next.find_row(&row_id)?;
                if row.work_center_locked() {
                    return Err(SessionError::RowLocked(row_id));
                }
                next.rows.retain(|r| r.id != row_id);
            }

            SessionEdit::SetWorkCenter {
                row_id,
                work_center_id,
            } => {
                let row = next.find_row_mut(&row_id)?;
                if row.work_center_locked() {
                    return Err(SessionError::WorkCenterLocked(row_id));
                }
                row.work_center_id = Some(work_center_id);
            }

            SessionEdit::AddShift { row_id } => {
                let row = next.find_row_mut(&row_id)?;
                row.shifts.push(WorkCenterShift::new());
            }

            SessionEdit::RemoveShift { row_id, shift_id } => {
                let row = next.find_row_mut(&row_id)?;
                if !row.shifts.iter().any(|s| s.id == shift_id) {
                    return Err(SessionError::ShiftNotFound(shift_id));
                }
                row.shifts.retain(|s| s.id != shift_id);
            }

            SessionEdit::SetShiftSchedule {
                row_id,
                shift_id,
                schedule_id,
            } => {
                let shift = next.find_shift_mut(&row_id, &shift_id)?;
                shift.schedule_id = Some(schedule_id);
            }

            SessionEdit::SetShiftPeople {
                row_id,
                shift_id,
                people,
            } => {
                if people < 0 {
                    return Err(SessionError::NegativePeople(people));
                }
                let shift = next.find_shift_mut(&row_id, &shift_id)?;
                shift.people = Some(people);
            }
        }
        Ok(next)
    }

    fn find_row(&self, row_id: &str) -> Result<&DayAssignmentRow, SessionError> {
        self.rows
            .iter()
            .find(|r| r.id == row_id)
            .ok_or_else(|| SessionError::RowNotFound(row_id.to_string()))
    }

    fn find_row_mut(&mut self, row_id: &str) -> Result<&mut DayAssignmentRow, SessionError> {
        self.rows
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or_else(|| SessionError::RowNotFound(row_id.to_string()))
    }

    fn find_shift_mut(
        &mut self,
        row_id: &str,
        shift_id: &str,
    ) -> Result<&mut WorkCenterShift, SessionError> {
        let row = self.find_row_mut(row_id)?;
        row.shifts
            .iter_mut()
            .find(|s| s.id == shift_id)
            .ok_or_else(|| SessionError::ShiftNotFound(shift_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assignment::ProductionSnapshot;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn session_with_locked_row() -> (EditorSession, String) {
        let mut row = DayAssignmentRow::new(date(), "W1");
        row.work_center_id = Some("RC1".to_string());
        row.production = Some(ProductionSnapshot {
            plan_qty: 100.0,
            fact_qty: 90.0,
            plan_hours: 8.0,
            fact_hours: 7.5,
        });
        let id = row.id.clone();
        (EditorSession::new(date(), vec![row]), id)
    }

    #[test]
    fn test_apply_edit_is_pure() {
        let session = EditorSession::new(date(), vec![]);
        let next = session
            .apply_edit(SessionEdit::AddRow {
                workshop_id: "W1".to_string(),
            })
            .unwrap();
        // 原快照不受影响
        assert!(session.rows.is_empty());
        assert_eq!(next.rows.len(), 1);
    }

    #[test]
    fn test_shift_lifecycle() {
        let session = EditorSession::new(date(), vec![])
            .apply_edit(SessionEdit::AddRow {
                workshop_id: "W1".to_string(),
            })
            .unwrap();
        let row_id = session.rows[0].id.clone();

        let session = session
            .apply_edit(SessionEdit::AddShift {
                row_id: row_id.clone(),
            })
            .unwrap();
        let shift_id = session.rows[0].shifts[0].id.clone();

        let session = session
            .apply_edit(SessionEdit::SetShiftSchedule {
                row_id: row_id.clone(),
                shift_id: shift_id.clone(),
                schedule_id: "S1".to_string(),
            })
            .unwrap()
            .apply_edit(SessionEdit::SetShiftPeople {
                row_id: row_id.clone(),
                shift_id: shift_id.clone(),
                people: 6,
            })
            .unwrap();
        assert_eq!(session.rows[0].total_people(), 6);

        let session = session
            .apply_edit(SessionEdit::RemoveShift {
                row_id,
                shift_id,
            })
            .unwrap();
        assert!(session.rows[0].shifts.is_empty());
    }

    #[test]
    fn test_locked_row_rejects_identity_edits() {
        let (session, row_id) = session_with_locked_row();

        let err = session
            .apply_edit(SessionEdit::SetWorkCenter {
                row_id: row_id.clone(),
                work_center_id: "RC2".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::WorkCenterLocked(row_id.clone()));

        let err = session
            .apply_edit(SessionEdit::RemoveRow {
                row_id: row_id.clone(),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::RowLocked(row_id.clone()));

        // 锁的是身份, 不锁班次编辑
        let session = session
            .apply_edit(SessionEdit::AddShift { row_id })
            .unwrap();
        assert_eq!(session.rows[0].shifts.len(), 1);
    }

    #[test]
    fn test_negative_people_rejected() {
        let session = EditorSession::new(date(), vec![])
            .apply_edit(SessionEdit::AddRow {
                workshop_id: "W1".to_string(),
            })
            .unwrap();
        let row_id = session.rows[0].id.clone();
        let session = session
            .apply_edit(SessionEdit::AddShift {
                row_id: row_id.clone(),
            })
            .unwrap();
        let shift_id = session.rows[0].shifts[0].id.clone();

        let err = session
            .apply_edit(SessionEdit::SetShiftPeople {
                row_id,
                shift_id,
                people: -1,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::NegativePeople(-1));
    }
}
