// ==========================================
// 检验排班系统 - 紧急等级判定引擎
// ==========================================
// 红线: 紧急等级是"等级制",不是评分制
// ==========================================
// 职责: 按交货期与基准日的天数差判定紧急等级
// 输入: due_date + reference_date + threshold_days
// 输出: UrgencyLevel（纯函数,同输入必同输出）
// ==========================================

use crate::domain::types::UrgencyLevel;
use chrono::NaiveDate;

// ==========================================
// UrgencyClassifier - 紧急等级判定引擎
// ==========================================
pub struct UrgencyClassifier {
    // 无状态引擎,不需要注入依赖
}

impl UrgencyClassifier {
    /// 创建新的紧急等级判定引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 判定紧急等级
    ///
    /// 规则（顺序执行,命中即返回）:
    /// 1) 剩余天数 ≤ 0            → Critical (已超期)
    /// 2) 剩余天数 ≤ 阈值          → Urgent
    /// 3) 剩余天数 ≤ 2×阈值        → Normal
    /// 4) 其他                    → Low
    ///
    /// 剩余天数 = 交货期 − 基准日（整天差,边界值含在较紧一档内）
    ///
    /// # 参数
    /// - `due_date`: 交货期
    /// - `reference_date`: 基准日（今日）
    /// - `threshold_days`: 紧急阈值天数
    pub fn classify(
        &self,
        due_date: NaiveDate,
        reference_date: NaiveDate,
        threshold_days: i64,
    ) -> UrgencyLevel {
        let days_remaining = (due_date - reference_date).num_days();

        if days_remaining <= 0 {
            UrgencyLevel::Critical
        } else if days_remaining <= threshold_days {
            UrgencyLevel::Urgent
        } else if days_remaining <= threshold_days * 2 {
            UrgencyLevel::Normal
        } else {
            UrgencyLevel::Low
        }
    }
}

impl Default for UrgencyClassifier {
    fn default() -> Self {
        Self::new()
    }
}
