// ==========================================
// 工作日历引擎 - 班次规则校验器
// ==========================================
// 职责: 对班次表单草稿执行固定顺序的规则管线
// 输入: ScheduleDraft + 运行时类型绑定
// 输出: ValidatedSchedule（规范化时间段 + 派生统计）
// ==========================================
// 两种模式:
// - 提交模式 validate: 首个失败即短路, 阻断提交
// - 实时模式 validate_record_live: 针对单条记录返回
//   全部违规, 供编辑时的行内提示
// 两种模式复用同一组规则函数
// ==========================================

use crate::domain::schedule::{ScheduleDraft, ScheduleStats, TimeSegment};
use crate::domain::types::{ScheduleTypeKind, TypeRegistry};
use crate::engine::error::{MissingFieldKind, ValidationError, ValidationResult};
use crate::engine::time_segment::{normalize, overlaps, span, to_minute, MINUTES_PER_DAY};
use std::collections::HashSet;

// ==========================================
// ValidatedSchedule - 校验产物
// ==========================================
#[derive(Debug, Clone)]
pub struct ValidatedSchedule {
    /// 规范化后的时间段, 顺序与表单记录一致
    pub segments: Vec<TimeSegment>,
    /// 派生统计（班次时长 / 休息次数 / 净工时）
    pub stats: ScheduleStats,
}

// 解析后的内部段: 记录序号 + 业务类型 + 规范化区间
#[derive(Debug, Clone, Copy)]
struct Seg {
    index: usize,
    kind: ScheduleTypeKind,
    norm: (u32, u32),
}

// ==========================================
// ScheduleValidator
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleValidator {
    /// 类型字典加载完成前为 None, 此时表单不可提交
    registry: Option<TypeRegistry>,
}

impl ScheduleValidator {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// 字典尚未加载时的校验器（仅产生元数据缺失错误）
    pub fn unresolved() -> Self {
        Self { registry: None }
    }

    // ==========================================
    // 提交模式: 固定顺序 + 首错短路
    // ==========================================
    pub fn validate(&self, draft: &ScheduleDraft) -> ValidationResult<ValidatedSchedule> {
        // 规则1: 必填项
        let registry = self.check_presence(draft)?;

        // 规则2: 恰好一条工作班次
        self.check_exactly_one_shift(draft, registry)?;

        // 规则3: 第一条记录必须是工作班次
        self.check_first_record_identity(draft, registry)?;

        // 规则4: 逐条解析时间与时长
        let segs = self.parse_segments(draft, registry)?;

        // 规则5: 同类型段不重叠
        self.check_same_type_overlap(&segs)?;

        // 规则6: 休息总时长不超过班次时长
        self.check_breaks_budget(&segs)?;

        // 规则7: 无重复记录
        self.check_no_duplicates(&segs)?;

        let segments: Vec<TimeSegment> = segs
            .iter()
            .map(|s| TimeSegment {
                kind: s.kind,
                start_minute: s.norm.0,
                end_minute: s.norm.1 % MINUTES_PER_DAY,
            })
            .collect();
        let stats = compute_stats(&segments);

        Ok(ValidatedSchedule { segments, stats })
    }

    // ==========================================
    // 实时模式: 单条记录的全部违规（不短路）
    // ==========================================
    pub fn validate_record_live(
        &self,
        draft: &ScheduleDraft,
        index: usize,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let Some(registry) = self.registry.as_ref() else {
            errors.push(ValidationError::MissingField {
                field: MissingFieldKind::WorkshiftType,
            });
            return errors;
        };
        let Some(record) = draft.lines.get(index) else {
            return errors;
        };

        // 第一条记录的类型身份不可变
        if index == 0 && registry.kind_of(&record.type_id) != Some(ScheduleTypeKind::Workshift) {
            errors.push(ValidationError::FirstRecordNotWorkshift);
        }

        // 时间解析与时长
        let parsed = match (to_minute(&record.start), to_minute(&record.end)) {
            _ if record.start.is_empty() || record.end.is_empty() => None,
            (Some(s), Some(e)) => {
                let norm = normalize(s, e);
                let sp = norm.1 - norm.0;
                if !(1..=MINUTES_PER_DAY).contains(&sp) {
                    errors.push(ValidationError::InvalidSpan { index });
                    None
                } else {
                    Some(norm)
                }
            }
            _ => {
                errors.push(ValidationError::InvalidTimeFormat { index });
                None
            }
        };

        // 与其它同类型记录的重叠
        if let Some(norm) = parsed {
            for (other_index, other) in draft.lines.iter().enumerate() {
                if other_index == index || other.type_id != record.type_id {
                    continue;
                }
                let (Some(s), Some(e)) = (to_minute(&other.start), to_minute(&other.end)) else {
                    continue;
                };
                if overlaps(norm, normalize(s, e)) {
                    errors.push(ValidationError::OverlappingSegments {
                        first: index.min(other_index),
                        second: index.max(other_index),
                    });
                    break;
                }
            }
        }

        errors
    }

    // ===== 规则1: 必填项 =====
    fn check_presence<'a>(
        &'a self,
        draft: &ScheduleDraft,
    ) -> ValidationResult<&'a TypeRegistry> {
        if draft.workshop_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingField {
                field: MissingFieldKind::Workshop,
            });
        }
        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: MissingFieldKind::ScheduleName,
            });
        }
        if draft.lines.is_empty() {
            return Err(ValidationError::MissingField {
                field: MissingFieldKind::TimeRecords,
            });
        }
        self.registry.as_ref().ok_or(ValidationError::MissingField {
            field: MissingFieldKind::WorkshiftType,
        })
    }

    // ===== 规则2: 恰好一条工作班次 =====
    fn check_exactly_one_shift(
        &self,
        draft: &ScheduleDraft,
        registry: &TypeRegistry,
    ) -> ValidationResult<()> {
        let count = draft
            .lines
            .iter()
            .filter(|l| registry.kind_of(&l.type_id) == Some(ScheduleTypeKind::Workshift))
            .count();
        if count != 1 {
            return Err(ValidationError::WrongShiftCount { count });
        }
        Ok(())
    }

    // ===== 规则3: 第一条记录是工作班次 =====
    // 该记录的类型在创建后不可改写、不可删除（界面侧同样约束）
    fn check_first_record_identity(
        &self,
        draft: &ScheduleDraft,
        registry: &TypeRegistry,
    ) -> ValidationResult<()> {
        let first = &draft.lines[0];
        if registry.kind_of(&first.type_id) != Some(ScheduleTypeKind::Workshift) {
            return Err(ValidationError::FirstRecordNotWorkshift);
        }
        Ok(())
    }

    // ===== 规则4: 逐条解析 =====
    fn parse_segments(
        &self,
        draft: &ScheduleDraft,
        registry: &TypeRegistry,
    ) -> ValidationResult<Vec<Seg>> {
        let mut segs = Vec::with_capacity(draft.lines.len());
        for (index, record) in draft.lines.iter().enumerate() {
            let Some(kind) = registry.kind_of(&record.type_id) else {
                return Err(ValidationError::MissingField {
                    field: MissingFieldKind::RecordType,
                });
            };
            if record.start.is_empty() || record.end.is_empty() {
                return Err(ValidationError::MissingField {
                    field: MissingFieldKind::StartEndTime,
                });
            }
            let (Some(s), Some(e)) = (to_minute(&record.start), to_minute(&record.end)) else {
                return Err(ValidationError::InvalidTimeFormat { index });
            };
            let norm = normalize(s, e);
            let sp = norm.1 - norm.0;
            if !(1..=MINUTES_PER_DAY).contains(&sp) {
                return Err(ValidationError::InvalidSpan { index });
            }
            segs.push(Seg { index, kind, norm });
        }
        Ok(segs)
    }

    // ===== 规则5: 同类型段不重叠 =====
    // 仅同类型两两比较; 不同类型互不约束。
    // 半开区间判定, 边界相接不算重叠
    fn check_same_type_overlap(&self, segs: &[Seg]) -> ValidationResult<()> {
        for (i, a) in segs.iter().enumerate() {
            for b in segs.iter().skip(i + 1) {
                if a.kind == b.kind && overlaps(a.norm, b.norm) {
                    return Err(ValidationError::OverlappingSegments {
                        first: a.index,
                        second: b.index,
                    });
                }
            }
        }

        // 跨日回绕防护: 同类型集合内, 展开后越过整日的段
        // 会在环形刻度上咬到最早段的起点
        for kind in [ScheduleTypeKind::Workshift, ScheduleTypeKind::Breaks] {
            let group: Vec<&Seg> = segs.iter().filter(|s| s.kind == kind).collect();
            if group.len() < 2 {
                continue;
            }
            let latest = group.iter().max_by_key(|s| s.norm.1).copied();
            let earliest = group.iter().min_by_key(|s| s.norm.0).copied();
            if let (Some(latest), Some(earliest)) = (latest, earliest) {
                if latest.norm.1 > MINUTES_PER_DAY
                    && latest.norm.1 - MINUTES_PER_DAY > earliest.norm.0
                {
                    return Err(ValidationError::OverlappingSegments {
                        first: earliest.index.min(latest.index),
                        second: earliest.index.max(latest.index),
                    });
                }
            }
        }
        Ok(())
    }

    // ===== 规则6: 休息总时长预算 =====
    fn check_breaks_budget(&self, segs: &[Seg]) -> ValidationResult<()> {
        let shift_span = segs
            .iter()
            .find(|s| s.kind == ScheduleTypeKind::Workshift)
            .map(|s| s.norm.1 - s.norm.0)
            .unwrap_or(0);
        let breaks_total: u32 = segs
            .iter()
            .filter(|s| s.kind == ScheduleTypeKind::Breaks)
            .map(|s| s.norm.1 - s.norm.0)
            .sum();
        if breaks_total > shift_span {
            return Err(ValidationError::BreaksExceedShift {
                breaks_total,
                shift_span,
            });
        }
        Ok(())
    }

    // ===== 规则7: 无重复记录 =====
    // 键: (类型, 规范化起点, 规范化终点)
    fn check_no_duplicates(&self, segs: &[Seg]) -> ValidationResult<()> {
        let mut seen = HashSet::new();
        for seg in segs {
            if !seen.insert((seg.kind, seg.norm)) {
                return Err(ValidationError::DuplicateSegment { index: seg.index });
            }
        }
        Ok(())
    }

    // ===== 待确认规则: 休息时间必须位于班次区间内 =====
    // 业务方尚未确认是否启用, 当前两种模式都不接入;
    // 保留实现以便产品决策后直接挂载到管线
    #[allow(dead_code)]
    fn check_breaks_within_shift(&self, segs: &[Seg]) -> ValidationResult<()> {
        let Some(shift) = segs.iter().find(|s| s.kind == ScheduleTypeKind::Workshift) else {
            return Ok(());
        };
        for b in segs.iter().filter(|s| s.kind == ScheduleTypeKind::Breaks) {
            if b.norm.0 < shift.norm.0 || b.norm.1 > shift.norm.1 {
                return Err(ValidationError::OverlappingSegments {
                    first: shift.index,
                    second: b.index,
                });
            }
        }
        Ok(())
    }
}

/// 由规范化时间段计算派生统计
pub fn compute_stats(segments: &[TimeSegment]) -> ScheduleStats {
    let shift_span = segments
        .iter()
        .find(|s| s.kind == ScheduleTypeKind::Workshift)
        .map(|s| span(s.start_minute, s.end_minute))
        .unwrap_or(0);
    let breaks: Vec<u32> = segments
        .iter()
        .filter(|s| s.kind == ScheduleTypeKind::Breaks)
        .map(|s| span(s.start_minute, s.end_minute))
        .collect();
    let breaks_total: u32 = breaks.iter().sum();

    ScheduleStats {
        shift_span_minutes: shift_span,
        breaks_count: breaks.len(),
        breaks_total_minutes: breaks_total,
        net_work_minutes: shift_span.saturating_sub(breaks_total),
    }
}
