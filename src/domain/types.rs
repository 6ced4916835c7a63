// ==========================================
// 工作日历引擎 - 领域类型定义
// ==========================================
// 注: 班次记录类型（工作班次/休息时间）由服务端字典
// 在运行时解析, 不允许硬编码具体部署的 ID
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// 记录类型 (Schedule Type Kind)
// ==========================================
// 红线: 仅两种业务含义, 其余字典项忽略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleTypeKind {
    Workshift, // 工作班次
    Breaks,    // 休息时间
}

impl fmt::Display for ScheduleTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleTypeKind::Workshift => write!(f, "WORKSHIFT"),
            ScheduleTypeKind::Breaks => write!(f, "BREAKS"),
        }
    }
}

// ==========================================
// WorkScheduleType - 服务端类型字典项
// ==========================================
// 来源: 同步边界 "fetch_schedule_types"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkScheduleType {
    pub id: String,
    #[serde(rename = "nameEN")]
    pub name_en: String,
    #[serde(rename = "nameZH")]
    pub name_zh: String,
}

// ==========================================
// TaxonomyError - 类型字典解析错误
// ==========================================
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("在班次类型字典中未找到 {kind} 类型")]
    KindNotFound { kind: ScheduleTypeKind },
}

// ==========================================
// TypeRegistry - 运行时类型绑定
// ==========================================
// 启动时从字典按名称匹配绑定两个业务类型的真实 ID,
// 缺失任一类型立即失败, 不进入编辑流程
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    workshift_id: String,
    breaks_id: String,
}

impl TypeRegistry {
    /// 从服务端字典解析类型绑定
    ///
    /// # 匹配规则
    /// - 工作班次: nameEN == "Work Shift" 或 nameZH == "工作班次"
    /// - 休息时间: nameEN == "Breaks" 或 nameZH == "休息时间"
    pub fn from_taxonomy(types: &[WorkScheduleType]) -> Result<Self, TaxonomyError> {
        let workshift = types
            .iter()
            .find(|t| t.name_en == "Work Shift" || t.name_zh == "工作班次")
            .ok_or(TaxonomyError::KindNotFound {
                kind: ScheduleTypeKind::Workshift,
            })?;
        let breaks = types
            .iter()
            .find(|t| t.name_en == "Breaks" || t.name_zh == "休息时间")
            .ok_or(TaxonomyError::KindNotFound {
                kind: ScheduleTypeKind::Breaks,
            })?;

        Ok(Self {
            workshift_id: workshift.id.clone(),
            breaks_id: breaks.id.clone(),
        })
    }

    /// 直接指定 ID 构造（测试与配置注入）
    pub fn new(workshift_id: impl Into<String>, breaks_id: impl Into<String>) -> Self {
        Self {
            workshift_id: workshift_id.into(),
            breaks_id: breaks_id.into(),
        }
    }

    /// 由类型 ID 反查业务含义, 未知 ID 返回 None
    pub fn kind_of(&self, type_id: &str) -> Option<ScheduleTypeKind> {
        if type_id == self.workshift_id {
            Some(ScheduleTypeKind::Workshift)
        } else if type_id == self.breaks_id {
            Some(ScheduleTypeKind::Breaks)
        } else {
            None
        }
    }

    pub fn workshift_id(&self) -> &str {
        &self.workshift_id
    }

    pub fn breaks_id(&self) -> &str {
        &self.breaks_id
    }
}

// ==========================================
// AssignmentKey - 日排班行主键
// ==========================================
// 用途: (车间, 工作中心) 组合键, 日编辑器/差异计算的分组键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    #[serde(rename = "workShopId")]
    pub workshop_id: String,
    #[serde(rename = "workCenterId")]
    pub work_center_id: String,
}

impl AssignmentKey {
    pub fn new(workshop_id: impl Into<String>, work_center_id: impl Into<String>) -> Self {
        Self {
            workshop_id: workshop_id.into(),
            work_center_id: work_center_id.into(),
        }
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workshop_id, self.work_center_id)
    }
}
