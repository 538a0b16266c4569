// ==========================================
// 检验排班系统 - 容量台账
// ==========================================
// 红线: 预约不可使 (基础+加班) 超限,提交前必检
// ==========================================
// 职责: 维护每检验员每日的剩余容量
// 输入: 花名册（基础工时与加班预算按员派生）
// 输出: remaining 查询 + reserve 预约
// 生命周期: 单次运行内有效,跨运行不持久化
// ==========================================

use crate::domain::inspector::Inspector;
use crate::engine::error::ScheduleError;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// DayLedger - 单日用量
// ==========================================
// 基础工时与加班池分开记账: 加班只在基础耗尽后消耗
#[derive(Debug, Clone, Copy, Default)]
struct DayLedger {
    base_used: f64,
    overtime_used: f64,
}

// ==========================================
// CapacityTracker - 容量台账
// ==========================================
// 仅由 AssignmentEngine 的单一控制流修改; 并行运行各自独立建账
#[derive(Debug, Default)]
pub struct CapacityTracker {
    ledgers: HashMap<(String, NaiveDate), DayLedger>,
}

impl CapacityTracker {
    /// 新建空台账（每次运行各建一份）
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询剩余容量（小时）= 基础剩余 + 加班剩余
    pub fn remaining(&self, inspector: &Inspector, date: NaiveDate) -> f64 {
        let ledger = self
            .ledgers
            .get(&(inspector.inspector_id.clone(), date))
            .copied()
            .unwrap_or_default();

        let base_left = (inspector.base_hours() - ledger.base_used).max(0.0);
        let overtime_left = (inspector.overtime_budget_hours - ledger.overtime_used).max(0.0);
        base_left + overtime_left
    }

    /// 预约工时
    ///
    /// 消耗顺序: 先基础工时,耗尽后再消耗当日加班池。
    /// 剩余不足时整体拒绝,不做部分预约。
    ///
    /// # 参数
    /// - `inspector`: 检验员
    /// - `date`: 预约日期
    /// - `hours`: 申请工时
    pub fn reserve(
        &mut self,
        inspector: &Inspector,
        date: NaiveDate,
        hours: f64,
    ) -> Result<(), ScheduleError> {
        let remaining = self.remaining(inspector, date);
        // 浮点累计误差容限,不得作为超订口子
        if hours > remaining + 1e-9 {
            return Err(ScheduleError::InsufficientCapacity {
                inspector_id: inspector.inspector_id.clone(),
                date,
                requested: hours,
                remaining,
            });
        }

        let ledger = self
            .ledgers
            .entry((inspector.inspector_id.clone(), date))
            .or_default();

        let base_left = (inspector.base_hours() - ledger.base_used).max(0.0);
        let from_base = hours.min(base_left);
        ledger.base_used += from_base;
        ledger.overtime_used += hours - from_base;

        Ok(())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday::*};

    fn inspector(overtime: f64) -> Inspector {
        Inspector {
            inspector_id: "I001".to_string(),
            name: "王五".to_string(),
            group: None,
            start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(), // 基础 8.5h
            working_weekdays: [Mon, Tue, Wed, Thu, Fri].into_iter().collect(),
            overtime_budget_hours: overtime,
            new_product_team: false,
            holiday_alias: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
    }

    #[test]
    fn test_remaining_includes_overtime_pool() {
        let tracker = CapacityTracker::new();
        let i = inspector(2.0);
        assert!((tracker.remaining(&i, date()) - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_reserve_consumes_base_before_overtime() {
        let mut tracker = CapacityTracker::new();
        let i = inspector(2.0);

        // 8.5h 基础全部占用
        tracker.reserve(&i, date(), 8.5).unwrap();
        assert!((tracker.remaining(&i, date()) - 2.0).abs() < 1e-9, "应只剩加班池");

        // 再预约 1.5h 进加班池
        tracker.reserve(&i, date(), 1.5).unwrap();
        assert!((tracker.remaining(&i, date()) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_reserve_rejects_over_commit() {
        let mut tracker = CapacityTracker::new();
        let i = inspector(0.0);

        tracker.reserve(&i, date(), 6.0).unwrap();
        let err = tracker.reserve(&i, date(), 3.0).unwrap_err();

        match err {
            ScheduleError::InsufficientCapacity { requested, remaining, .. } => {
                assert!((requested - 3.0).abs() < 1e-9);
                assert!((remaining - 2.5).abs() < 1e-9);
            }
            other => panic!("期望 InsufficientCapacity,实际 {other:?}"),
        }

        // 拒绝后台账不变
        assert!((tracker.remaining(&i, date()) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_double_booking_across_reservations() {
        // 两笔预约合计不得超过 基础+加班
        let mut tracker = CapacityTracker::new();
        let i = inspector(1.0);

        tracker.reserve(&i, date(), 9.0).unwrap();
        assert!(tracker.reserve(&i, date(), 1.0).is_err(), "合计 10h > 9.5h 应被拒绝");
    }

    #[test]
    fn test_dates_are_independent() {
        let mut tracker = CapacityTracker::new();
        let i = inspector(0.0);
        let next = date().succ_opt().unwrap();

        tracker.reserve(&i, date(), 8.5).unwrap();
        assert!((tracker.remaining(&i, next) - 8.5).abs() < 1e-9, "次日容量不受影响");
    }
}
