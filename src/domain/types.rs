// ==========================================
// 检验排班系统 - 领域类型定义
// ==========================================
// 红线: 紧急等级是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 紧急等级 (Urgency Level)
// ==========================================
// 顺序: Critical < Urgent < Normal < Low (排序升序 = 越紧急越靠前)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    Critical, // 已超期
    Urgent,   // 阈值天数以内
    Normal,   // 2倍阈值天数以内
    Low,      // 正常
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyLevel::Critical => write!(f, "CRITICAL"),
            UrgencyLevel::Urgent => write!(f, "URGENT"),
            UrgencyLevel::Normal => write!(f, "NORMAL"),
            UrgencyLevel::Low => write!(f, "LOW"),
        }
    }
}

// ==========================================
// 未排定原因 (Unscheduled Reason)
// ==========================================
// 红线: 单件失败只进报告,不中断整批
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnscheduledReason {
    InvalidDate,       // 交货期缺失或无法解析
    UnresolvedProduct, // 产品主数据无可用单件检验时间
    NoCapacity,        // 搜索窗内有工作日但容量不足
    NoWorkingDay,      // 搜索窗内该池无任何工作日
}

impl fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnscheduledReason::InvalidDate => write!(f, "INVALID_DATE"),
            UnscheduledReason::UnresolvedProduct => write!(f, "UNRESOLVED_PRODUCT"),
            UnscheduledReason::NoCapacity => write!(f, "NO_CAPACITY"),
            UnscheduledReason::NoWorkingDay => write!(f, "NO_WORKING_DAY"),
        }
    }
}

// ==========================================
// 检验时间单位 (Time Unit)
// ==========================================
// 用途: 产品主数据单件检验时间的归一化（引擎内部只认小时）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    /// Excel 日分数（单元格存 0.5 = 12 小时）
    #[serde(rename = "excel")]
    ExcelDays,
    /// 按数值分布自动判定（由导入层先行判定为具体单位）
    Auto,
}

impl TimeUnit {
    /// 将给定数值换算为小时
    pub fn to_hours(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value / 3600.0,
            TimeUnit::Minutes => value / 60.0,
            TimeUnit::Hours => value,
            TimeUnit::ExcelDays => value * 24.0,
            TimeUnit::Auto => value,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "seconds"),
            TimeUnit::Minutes => write!(f, "minutes"),
            TimeUnit::Hours => write!(f, "hours"),
            TimeUnit::ExcelDays => write!(f, "excel"),
            TimeUnit::Auto => write!(f, "auto"),
        }
    }
}
