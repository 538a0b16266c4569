// ==========================================
// 检验排班系统 - 工作日历
// ==========================================
// 职责: 判定"某日对某检验员是否为工作日"
// 输入: 检验员每周出勤日集合 + 按别名组织的假日例外表
// 红线: 例外表在构造时整体物化,热路径内不做任何 I/O
// ==========================================

use crate::domain::inspector::Inspector;
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};

// ==========================================
// WorkCalendar - 工作日历
// ==========================================
// 每个别名一份独立例外表; 不同检验员即使出勤模式相同,
// 其假日例外也必须按各自别名单独判定,不可跨员缓存
#[derive(Debug, Clone, Default)]
pub struct WorkCalendar {
    holidays: HashMap<String, HashSet<NaiveDate>>,
}

impl WorkCalendar {
    /// 从假日例外表构建日历
    ///
    /// # 参数
    /// - `holidays`: 别名 → 该别名下的休假日期集合
    pub fn new(holidays: HashMap<String, HashSet<NaiveDate>>) -> Self {
        Self { holidays }
    }

    /// 空日历（无任何假日例外）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 指定日期对指定检验员是否为工作日
    ///
    /// 判定 = 该星期在出勤日集合内 且 该日不在其别名的例外表内
    pub fn is_working_day(&self, inspector: &Inspector, date: NaiveDate) -> bool {
        if !inspector.works_on(date.weekday()) {
            return false;
        }

        match inspector.holiday_alias.as_deref() {
            Some(alias) => !self
                .holidays
                .get(alias)
                .map(|dates| dates.contains(&date))
                .unwrap_or(false),
            None => true,
        }
    }

    /// 已登记的别名数
    pub fn alias_count(&self) -> usize {
        self.holidays.len()
    }
}
