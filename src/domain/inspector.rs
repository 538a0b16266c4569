// ==========================================
// 检验排班系统 - 检验员领域模型
// ==========================================
// 用途: 导入层写入,引擎层只读
// 红线: 花名册在单次运行内不可变,剩余容量由 CapacityTracker 单独持有
// ==========================================

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// Inspector - 检验员主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspector {
    // ===== 主键 =====
    pub inspector_id: String, // 工号（唯一标识）

    // ===== 基础信息 =====
    pub name: String,          // 姓名
    pub group: Option<String>, // 所属班组

    // ===== 班次信息 =====
    pub start_time: NaiveTime, // 上班时刻
    pub end_time: NaiveTime,   // 下班时刻（早于上班时刻视为跨天班次）

    // ===== 出勤与加班 =====
    pub working_weekdays: HashSet<Weekday>, // 每周出勤日集合
    pub overtime_budget_hours: f64,          // 单日加班时数上限

    // ===== 团队划分 =====
    pub new_product_team: bool, // 新品组标志（优先承接未登记产品）

    // ===== 假日日历 =====
    pub holiday_alias: Option<String>, // 假日例外表别名（为空 = 无个人例外）
}

impl Inspector {
    /// 单日基础工时（小时）
    ///
    /// 下班时刻早于上班时刻按跨天班次处理（+24h）；
    /// 两者相同视为 0 工时班次。
    pub fn base_hours(&self) -> f64 {
        if self.start_time == self.end_time {
            return 0.0;
        }

        let start_min = self.start_time.signed_duration_since(NaiveTime::MIN).num_minutes();
        let mut end_min = self.end_time.signed_duration_since(NaiveTime::MIN).num_minutes();
        if end_min < start_min {
            end_min += 24 * 60;
        }

        (end_min - start_min) as f64 / 60.0
    }

    /// 单日总容量上限（基础工时 + 加班预算）
    pub fn daily_capacity_hours(&self) -> f64 {
        self.base_hours() + self.overtime_budget_hours
    }

    /// 指定星期是否为该检验员的出勤日（不含假日例外,假日由日历层判定）
    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.working_weekdays.contains(&weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday::*;

    fn inspector(start: (u32, u32), end: (u32, u32)) -> Inspector {
        Inspector {
            inspector_id: "I001".to_string(),
            name: "张三".to_string(),
            group: Some("一组".to_string()),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            working_weekdays: [Mon, Tue, Wed, Thu, Fri].into_iter().collect(),
            overtime_budget_hours: 2.0,
            new_product_team: false,
            holiday_alias: None,
        }
    }

    #[test]
    fn test_base_hours_normal_shift() {
        // 8:30 - 17:00 = 8.5h
        let i = inspector((8, 30), (17, 0));
        assert!((i.base_hours() - 8.5).abs() < 1e-9);
        assert!((i.daily_capacity_hours() - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_base_hours_overnight_shift() {
        // 22:00 - 06:00 跨天 = 8h
        let i = inspector((22, 0), (6, 0));
        assert!((i.base_hours() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_hours_zero_length_shift() {
        let i = inspector((9, 0), (9, 0));
        assert_eq!(i.base_hours(), 0.0);
    }

    #[test]
    fn test_works_on() {
        let i = inspector((8, 30), (17, 0));
        assert!(i.works_on(Mon));
        assert!(!i.works_on(Sat));
    }
}
