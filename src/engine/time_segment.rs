// ==========================================
// 工作日历引擎 - 时间段模型
// ==========================================
// 职责: 当日分钟制算术, 统一处理跨午夜班次
// 输入: "HH:MM" 时刻 / [0,1440) 分钟值
// 输出: 时长与非循环刻度上的规范化区间
// ==========================================
// 红线: 任何时间段都按"向前推进"解释 —— 结束时刻
// 数值小于开始时刻即视为跨过午夜, 而不是非法输入
// ==========================================

/// 一天的分钟数
pub const MINUTES_PER_DAY: u32 = 1440;

/// 解析 "HH:MM" 为当日分钟值 [0,1440)
///
/// 格式错误返回 None, 由上游按"缺少时间"处理
pub fn to_minute(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h >= 24 || m >= 60 {
        return None;
    }
    Some(h * 60 + m)
}

/// 时间段时长（分钟）
///
/// end > start 时为普通段; 否则视为跨午夜, 补偿一天。
/// start == end 返回 1440（整日段）, 是否允许由调用方裁决
pub fn span(start: u32, end: u32) -> u32 {
    if end > start {
        end - start
    } else {
        end + MINUTES_PER_DAY - start
    }
}

/// 规范化到非循环分钟刻度 [0,2880)
///
/// 返回 (start, start + span): 跨午夜段被"展开"到次日,
/// 使任意两段可用普通区间算术比较。
/// 契约: 调用方须先用 span 剔除时长不在 [1,1440] 的段
pub fn normalize(start: u32, end: u32) -> (u32, u32) {
    (start, start + span(start, end))
}

/// 半开区间重叠判定（规范化刻度上）
///
/// 边界相接（a.end == b.start）不算重叠
pub fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
