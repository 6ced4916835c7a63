// ==========================================
// 工作日历引擎 - 业务编排 API
// ==========================================
// 职责: 串联 引擎(校验/聚合/差异) 与 同步边界,
// 提供界面直接调用的操作集合
// ==========================================
// 启动契约: 类型字典解析失败即启动失败, 不允许
// 带着不完整的类型绑定进入编辑流程
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::assignment::{ProductionFactRow, SavedLineRow};
use crate::domain::schedule::{Schedule, ScheduleDraft};
use crate::domain::types::{AssignmentKey, TypeRegistry};
use crate::engine::aggregator::AssignmentAggregator;
use crate::engine::error::{MissingFieldKind, ValidationError};
use crate::engine::reconciler::{DiffOutcome, DiffReconciler};
use crate::engine::session::EditorSession;
use crate::engine::validator::{ScheduleValidator, ValidatedSchedule};
use crate::sync::{BulkReplaceRequest, ScheduleUpsertRequest, WorkCalendarSync};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// OpenedDay - 打开的日排班编辑上下文
// ==========================================
// baseline/facts 是打开时刻的服务端快照; 保存成功后
// 由调用方用 SaveDayReport 中的新行推进基线
#[derive(Debug, Clone)]
pub struct OpenedDay {
    pub session: EditorSession,
    pub baseline: Vec<SavedLineRow>,
    pub facts: Vec<ProductionFactRow>,
}

// ==========================================
// SaveDayReport - 保存结果报告
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SaveDayReport {
    /// 编辑态与基线一致: 成功, 未发起网络请求
    NoChanges,
    /// 发起了一次批量替换, 逐键成败
    Saved {
        /// 服务端实际写入的行总数
        processed: usize,
        succeeded: Vec<AssignmentKey>,
        /// (键, 服务端给出的失败原因)
        failed: Vec<(AssignmentKey, String)>,
        /// 写入后的最新行, 用于推进基线
        rows: Vec<SavedLineRow>,
    },
}

impl SaveDayReport {
    /// 是否全部键写入成功（无变更也算成功）
    pub fn is_fully_ok(&self) -> bool {
        match self {
            SaveDayReport::NoChanges => true,
            SaveDayReport::Saved { failed, .. } => failed.is_empty(),
        }
    }

    /// 保存后用于刷新基线的行集合; 无变更时基线无需推进
    pub fn new_baseline(&self) -> Option<&[SavedLineRow]> {
        match self {
            SaveDayReport::NoChanges => None,
            SaveDayReport::Saved { rows, .. } => Some(rows),
        }
    }
}

// ==========================================
// WorkingCalendarApi
// ==========================================
pub struct WorkingCalendarApi {
    sync: Arc<dyn WorkCalendarSync>,
    registry: TypeRegistry,
    validator: ScheduleValidator,
}

impl std::fmt::Debug for WorkingCalendarApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingCalendarApi")
            .field("registry", &self.registry)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl WorkingCalendarApi {
    /// 启动: 拉取班次类型字典并绑定运行时类型
    ///
    /// 字典中缺少工作班次或休息类型即失败, 调用方
    /// 应把该失败视为不可进入编辑流程的启动错误
    #[instrument(skip(sync))]
    pub async fn bootstrap(sync: Arc<dyn WorkCalendarSync>) -> ApiResult<Self> {
        let taxonomy = sync.fetch_schedule_types().await?;
        let registry = TypeRegistry::from_taxonomy(&taxonomy)?;
        info!(types = taxonomy.len(), "类型字典绑定完成");
        Ok(Self {
            sync,
            validator: ScheduleValidator::new(registry.clone()),
            registry,
        })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// 表单校验器（提交/实时两种模式均由其提供）
    pub fn validator(&self) -> &ScheduleValidator {
        &self.validator
    }

    // ==========================================
    // 班次定义 CRUD
    // ==========================================

    #[instrument(skip(self))]
    pub async fn list_schedules(&self) -> ApiResult<Vec<Schedule>> {
        Ok(self.sync.fetch_schedules().await?)
    }

    /// 新建班次定义; 先过完整校验管线, 失败不发请求
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_schedule(&self, draft: &ScheduleDraft) -> ApiResult<Schedule> {
        let (request, _) = self.prepare_upsert(draft)?;
        let schedule = self.sync.create_schedule(request).await?;
        info!(schedule_id = %schedule.schedule_id, "班次定义已创建");
        Ok(schedule)
    }

    /// 更新班次定义; 携带最近已知 updatedAt 做并发检查,
    /// 过期写入以 SyncError::Conflict 浮出
    #[instrument(skip(self, draft))]
    pub async fn update_schedule(
        &self,
        schedule_id: &str,
        draft: &ScheduleDraft,
    ) -> ApiResult<Schedule> {
        let (request, _) = self.prepare_upsert(draft)?;
        let schedule = self.sync.update_schedule(schedule_id, request).await?;
        info!(schedule_id, "班次定义已更新");
        Ok(schedule)
    }

    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, schedule_id: &str) -> ApiResult<()> {
        self.sync.delete_schedule(schedule_id).await?;
        info!(schedule_id, "班次定义已删除");
        Ok(())
    }

    // 校验草稿并组装写入载荷
    fn prepare_upsert(
        &self,
        draft: &ScheduleDraft,
    ) -> ApiResult<(ScheduleUpsertRequest, ValidatedSchedule)> {
        let validated = self.validator.validate(draft)?;
        let workshop_id = draft
            .workshop_id
            .clone()
            .ok_or(ValidationError::MissingField {
                field: MissingFieldKind::Workshop,
            })?;
        let request = ScheduleUpsertRequest {
            workshop_id,
            name: draft.name.trim().to_string(),
            is_favorite: draft.is_favorite,
            lines: draft.lines.clone(),
            updated_at: draft.updated_at,
            actor: None,
        };
        Ok((request, validated))
    }

    // ==========================================
    // 日排班编辑
    // ==========================================

    /// 打开某天: 拉取已保存行与生产参照表, 聚合为
    /// 可编辑行集合并开启编辑会话
    #[instrument(skip(self))]
    pub async fn open_day(&self, date: NaiveDate) -> ApiResult<OpenedDay> {
        let baseline = self.sync.fetch_saved_lines(date).await?;
        let facts = self.sync.fetch_production_facts(date).await?;
        let rows = AssignmentAggregator::build_rows(date, &baseline, &facts);
        info!(
            rows = rows.len(),
            baseline = baseline.len(),
            "日排班编辑会话已打开"
        );
        Ok(OpenedDay {
            session: EditorSession::new(date, rows),
            baseline,
            facts,
        })
    }

    /// 保存某天: 差异先行
    ///
    /// # 流程
    /// 1. 两侧按参照表过滤（参照表外的行不持久化）
    /// 2. 前置校验 + 最小变更集计算, 失败不发请求
    /// 3. 无变更直接成功返回, 不发请求
    /// 4. 单次批量替换, 逐键成败汇总为报告
    #[instrument(skip(self, day, session), fields(date = %session.date))]
    pub async fn save_day(
        &self,
        day: &OpenedDay,
        session: &EditorSession,
    ) -> ApiResult<SaveDayReport> {
        let target = AssignmentAggregator::restrict_to_reference(&session.rows, &day.facts);
        let baseline = Self::restrict_baseline(&day.baseline, &day.facts);

        let items = match DiffReconciler::diff(&target, &baseline)? {
            DiffOutcome::NoChanges => {
                info!("编辑态与基线一致, 跳过保存");
                return Ok(SaveDayReport::NoChanges);
            }
            DiffOutcome::Changes(items) => items,
        };

        let changed = items.len();
        let response = self
            .sync
            .bulk_replace(BulkReplaceRequest {
                date: session.date,
                items,
            })
            .await?;

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for item in &response.items {
            let key = AssignmentKey::new(&item.workshop_id, &item.work_center_id);
            match &item.error {
                None => succeeded.push(key),
                Some(reason) => failed.push((key, reason.clone())),
            }
        }
        if failed.is_empty() {
            info!(changed, processed = response.processed, "日排班保存完成");
        } else {
            warn!(
                changed,
                failed = failed.len(),
                "日排班部分键保存失败"
            );
        }

        Ok(SaveDayReport::Saved {
            processed: response.processed,
            succeeded,
            failed,
            rows: response.rows,
        })
    }

    /// 软删除单条已保存行（行级删除不走批量替换）
    #[instrument(skip(self))]
    pub async fn delete_line(&self, line_id: &str) -> ApiResult<()> {
        self.sync.delete_line(line_id).await?;
        info!(line_id, "排班行已删除");
        Ok(())
    }

    // 基线同样只保留参照表内的键
    fn restrict_baseline(
        baseline: &[SavedLineRow],
        facts: &[ProductionFactRow],
    ) -> Vec<SavedLineRow> {
        let known: BTreeSet<AssignmentKey> = facts.iter().map(|f| f.key()).collect();
        baseline
            .iter()
            .filter(|line| known.contains(&line.key()))
            .cloned()
            .collect()
    }
}
