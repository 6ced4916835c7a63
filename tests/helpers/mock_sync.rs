// ==========================================
// 内存版同步边界 - 用于集成测试
// ==========================================
// 职责: 以内存状态实现 WorkCalendarSync, 模拟
// 服务端的持久化/并发检查/逐键成败语义
// ==========================================

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use working_calendar::domain::assignment::{ProductionFactRow, SavedLineRow};
use working_calendar::domain::schedule::Schedule;
use working_calendar::domain::types::{AssignmentKey, WorkScheduleType};
use working_calendar::sync::{
    BulkReplaceItemResult, BulkReplaceRequest, BulkReplaceResponse, ScheduleUpsertRequest,
    SyncError, SyncResult, WorkCalendarSync,
};

struct MockState {
    types: Vec<WorkScheduleType>,
    schedules: Vec<Schedule>,
    lines: Vec<SavedLineRow>,
    facts: Vec<ProductionFactRow>,
    /// 批量替换时模拟写入失败的键
    fail_keys: BTreeSet<AssignmentKey>,
    next_id: usize,
}

// ==========================================
// MockCalendarSync
// ==========================================
pub struct MockCalendarSync {
    state: Mutex<MockState>,
    bulk_replace_calls: AtomicUsize,
}

impl MockCalendarSync {
    pub fn new(types: Vec<WorkScheduleType>) -> Self {
        Self {
            state: Mutex::new(MockState {
                types,
                schedules: Vec::new(),
                lines: Vec::new(),
                facts: Vec::new(),
                fail_keys: BTreeSet::new(),
                next_id: 1,
            }),
            bulk_replace_calls: AtomicUsize::new(0),
        }
    }

    pub fn seed_lines(&self, lines: Vec<SavedLineRow>) {
        self.state.lock().unwrap().lines.extend(lines);
    }

    pub fn seed_facts(&self, facts: Vec<ProductionFactRow>) {
        self.state.lock().unwrap().facts.extend(facts);
    }

    /// 让指定键在批量替换时失败（其余键不受影响）
    pub fn fail_key(&self, key: AssignmentKey) {
        self.state.lock().unwrap().fail_keys.insert(key);
    }

    pub fn bulk_replace_calls(&self) -> usize {
        self.bulk_replace_calls.load(Ordering::SeqCst)
    }

    pub fn saved_lines(&self) -> Vec<SavedLineRow> {
        self.state.lock().unwrap().lines.clone()
    }

    fn alloc_id(state: &mut MockState, prefix: &str) -> String {
        let id = format!("{}{:03}", prefix, state.next_id);
        state.next_id += 1;
        id
    }
}

#[async_trait]
impl WorkCalendarSync for MockCalendarSync {
    async fn fetch_schedule_types(&self) -> SyncResult<Vec<WorkScheduleType>> {
        Ok(self.state.lock().unwrap().types.clone())
    }

    async fn fetch_schedules(&self) -> SyncResult<Vec<Schedule>> {
        Ok(self.state.lock().unwrap().schedules.clone())
    }

    async fn create_schedule(&self, request: ScheduleUpsertRequest) -> SyncResult<Schedule> {
        let mut state = self.state.lock().unwrap();
        let schedule = Schedule {
            schedule_id: Self::alloc_id(&mut state, "S"),
            workshop_id: request.workshop_id,
            name: request.name,
            is_favorite: request.is_favorite,
            lines: request.lines,
            updated_at: Some(Utc::now()),
        };
        state.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        schedule_id: &str,
        request: ScheduleUpsertRequest,
    ) -> SyncResult<Schedule> {
        let mut state = self.state.lock().unwrap();
        let schedule = state
            .schedules
            .iter_mut()
            .find(|s| s.schedule_id == schedule_id)
            .ok_or(SyncError::Http { status: 404 })?;
        // updatedAt 比对: 过期写入拒绝
        if request.updated_at != schedule.updated_at {
            return Err(SyncError::from_status(409));
        }
        schedule.name = request.name;
        schedule.is_favorite = request.is_favorite;
        schedule.lines = request.lines;
        schedule.updated_at = Some(Utc::now());
        Ok(schedule.clone())
    }

    async fn delete_schedule(&self, schedule_id: &str) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.schedules.retain(|s| s.schedule_id != schedule_id);
        Ok(())
    }

    async fn fetch_saved_lines(&self, date: NaiveDate) -> SyncResult<Vec<SavedLineRow>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lines
            .iter()
            .filter(|l| l.only_date == date)
            .cloned()
            .collect())
    }

    async fn fetch_production_facts(
        &self,
        _date: NaiveDate,
    ) -> SyncResult<Vec<ProductionFactRow>> {
        Ok(self.state.lock().unwrap().facts.clone())
    }

    async fn bulk_replace(
        &self,
        request: BulkReplaceRequest,
    ) -> SyncResult<BulkReplaceResponse> {
        self.bulk_replace_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        let mut processed = 0;
        let mut items = Vec::new();
        for item in &request.items {
            let key = item.key();
            // 逐 item 独立成败: 失败键不影响其他键
            if state.fail_keys.contains(&key) {
                items.push(BulkReplaceItemResult {
                    workshop_id: key.workshop_id.clone(),
                    work_center_id: key.work_center_id.clone(),
                    created: None,
                    error: Some("模拟写入失败".to_string()),
                });
                continue;
            }
            state
                .lines
                .retain(|l| !(l.only_date == request.date && l.key() == key));
            for line in &item.lines {
                let line_id = Self::alloc_id(&mut state, "L");
                state.lines.push(SavedLineRow {
                    line_id,
                    only_date: request.date,
                    workshop_id: key.workshop_id.clone(),
                    work_center_id: key.work_center_id.clone(),
                    schedule_id: line.schedule_id.clone(),
                    people: line.people,
                });
            }
            processed += item.lines.len();
            items.push(BulkReplaceItemResult {
                workshop_id: key.workshop_id.clone(),
                work_center_id: key.work_center_id.clone(),
                created: Some(item.lines.len()),
                error: None,
            });
        }

        let rows = state
            .lines
            .iter()
            .filter(|l| l.only_date == request.date)
            .cloned()
            .collect();
        Ok(BulkReplaceResponse {
            processed,
            rows,
            items,
        })
    }

    async fn delete_line(&self, line_id: &str) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.lines.retain(|l| l.line_id != line_id);
        Ok(())
    }
}
