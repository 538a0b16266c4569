// ==========================================
// 检验排班系统 - 任务分配引擎
// ==========================================
// 红线: 容量约束优先于任务优先级; 未排定任务必须带原因上报
// ==========================================
// 职责: 贪心"最早可行槽位"分配
// 输入: 检验任务 + 花名册 + 产品索引 + 工作日历 + 调度配置
// 输出: AssignmentOutcome（分配表 + 未排定报告）
// 策略: 新品任务优先投放新品组,组内不可行再回落普通组;
//       日期外层推进（最早日优先）,同日按花名册顺序打破并列
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::assignment::{AssignmentOutcome, AssignmentResult, UnscheduledItem};
use crate::domain::inspector::Inspector;
use crate::domain::product::ProductIndex;
use crate::domain::types::UnscheduledReason;
use crate::domain::work_item::{ClassifiedItem, WorkItem};
use crate::engine::calendar::WorkCalendar;
use crate::engine::capacity::CapacityTracker;
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::engine::team::TeamSelector;
use crate::engine::urgency::UrgencyClassifier;
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument};

// ==========================================
// SlotSearch - 槽位搜索结果（内部）
// ==========================================
struct SlotSearch {
    assigned: Option<(String, String, NaiveDate)>, // (工号, 姓名, 排定日)
    saw_working_day: bool,
}

// ==========================================
// AssignmentEngine - 任务分配引擎
// ==========================================
pub struct AssignmentEngine {
    classifier: UrgencyClassifier,
    selector: TeamSelector,
}

impl AssignmentEngine {
    /// 创建新的任务分配引擎
    pub fn new() -> Self {
        Self {
            classifier: UrgencyClassifier::new(),
            selector: TeamSelector::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行完整分配流程（单次运行）
    ///
    /// 流程:
    /// 1) 结构检查（空花名册 = 致命错误,分配开始前中止）
    /// 2) 任务分级（需求工时 + 紧急等级 + 新品判定）
    /// 3) 分组排序（紧急等级升序 → 交货期升序 → 输入顺序,稳定）
    /// 4) 新品任务: 新品组搜索,不可行回落普通组,新品标志保持 true
    /// 5) 已登记任务: 仅普通组搜索
    ///
    /// # 参数
    /// - `inspectors`: 花名册（顺序即并列打破顺序）
    /// - `products`: 产品索引
    /// - `work_items`: 待分配任务列表
    /// - `calendar`: 工作日历
    /// - `config`: 调度配置（阈值/搜索窗/兜底单件时间）
    /// - `reference_date`: 基准日
    #[instrument(skip_all, fields(
        inspectors = inspectors.len(),
        work_items = work_items.len(),
        reference_date = %reference_date
    ))]
    pub fn run(
        &self,
        inspectors: &[Inspector],
        products: &ProductIndex,
        work_items: Vec<WorkItem>,
        calendar: &WorkCalendar,
        config: &SchedulerConfig,
        reference_date: NaiveDate,
    ) -> ScheduleResult<AssignmentOutcome> {
        // ==========================================
        // 步骤1: 结构检查
        // ==========================================
        if inspectors.is_empty() {
            return Err(ScheduleError::EmptyRoster);
        }

        let mut outcome = AssignmentOutcome::default();
        let mut tracker = CapacityTracker::new();

        // ==========================================
        // 步骤2: 任务分级
        // ==========================================
        debug!("步骤2: 任务分级");

        let (classified, mut rejected) = self.classify_items(work_items, products, config, reference_date);
        outcome.unscheduled.append(&mut rejected);

        // ==========================================
        // 步骤3: 分组排序
        // ==========================================
        debug!("步骤3: 分组排序");

        let (new_product_items, registered_items) = Self::partition_and_sort(classified);

        info!(
            new_product = new_product_items.len(),
            registered = registered_items.len(),
            excluded = outcome.unscheduled.len(),
            "任务分级完成"
        );

        // ==========================================
        // 步骤4: 新品任务分配（新品组优先,回落普通组）
        // ==========================================
        debug!("步骤4: 新品任务分配");

        let new_pool = self.selector.new_product_members(inspectors);
        let regular_pool = self.selector.regular_members(inspectors);

        for item in new_product_items {
            let primary = self.find_and_reserve(&new_pool, calendar, &mut tracker, &item, config, reference_date);

            let (slot, saw_working_day) = match primary.assigned {
                Some(found) => (Some(found), primary.saw_working_day),
                None => {
                    // 新品组整窗不可行,回落普通组
                    let fallback = self.find_and_reserve(
                        &regular_pool,
                        calendar,
                        &mut tracker,
                        &item,
                        config,
                        reference_date,
                    );
                    (fallback.assigned, primary.saw_working_day || fallback.saw_working_day)
                }
            };

            Self::record(&mut outcome, item, slot, saw_working_day, config);
        }

        // ==========================================
        // 步骤5: 已登记任务分配（仅普通组）
        // ==========================================
        debug!("步骤5: 已登记任务分配");

        for item in registered_items {
            let search =
                self.find_and_reserve(&regular_pool, calendar, &mut tracker, &item, config, reference_date);
            Self::record(&mut outcome, item, search.assigned, search.saw_working_day, config);
        }

        info!(
            assigned = outcome.assignments.len(),
            unscheduled = outcome.unscheduled.len(),
            total_hours = outcome.total_allocated_hours(),
            "分配流程完成"
        );

        Ok(outcome)
    }

    // ==========================================
    // 任务分级
    // ==========================================

    /// 派生需求工时/紧急等级/新品标志
    ///
    /// 单件级失败（交货期无效/不可解算产品）直接进未排定报告
    fn classify_items(
        &self,
        work_items: Vec<WorkItem>,
        products: &ProductIndex,
        config: &SchedulerConfig,
        reference_date: NaiveDate,
    ) -> (Vec<ClassifiedItem>, Vec<UnscheduledItem>) {
        let mut classified = Vec::new();
        let mut rejected = Vec::new();

        for (input_seq, item) in work_items.into_iter().enumerate() {
            let product_code = item.product_code.clone();
            match self.classify_one(item, input_seq, products, config, reference_date) {
                Ok(c) => classified.push(c),
                Err(err) => {
                    let reason = match &err {
                        ScheduleError::InvalidDate(_) => UnscheduledReason::InvalidDate,
                        _ => UnscheduledReason::UnresolvedProduct,
                    };
                    rejected.push(UnscheduledItem {
                        product_code,
                        reason,
                        detail: err.to_string(),
                    });
                }
            }
        }

        (classified, rejected)
    }

    /// 单件分级
    fn classify_one(
        &self,
        item: WorkItem,
        input_seq: usize,
        products: &ProductIndex,
        config: &SchedulerConfig,
        reference_date: NaiveDate,
    ) -> Result<ClassifiedItem, ScheduleError> {
        let due_date = item
            .due_date
            .ok_or_else(|| ScheduleError::InvalidDate(item.product_code.clone()))?;

        let new_product = self.selector.is_new_product(&item, products);

        // 单件时间: 已登记产品取主数据; 新品按兜底单件时间估算
        let unit_hours = if new_product {
            config.fallback_unit_hours()
        } else {
            products
                .unit_hours(&item.product_code)
                .ok_or_else(|| ScheduleError::UnresolvedProduct(item.product_code.clone()))?
        };

        let required_hours = item.shortage_qty.abs() * unit_hours;
        let urgency =
            self.classifier
                .classify(due_date, reference_date, config.urgency_threshold_days);

        Ok(ClassifiedItem {
            item,
            input_seq,
            due_date,
            required_hours,
            urgency,
            new_product,
        })
    }

    // ==========================================
    // 分组排序
    // ==========================================

    /// 划分为 (新品, 已登记) 两组,组内排序:
    /// 紧急等级升序 → 交货期升序 → 输入顺序升序（稳定）
    fn partition_and_sort(items: Vec<ClassifiedItem>) -> (Vec<ClassifiedItem>, Vec<ClassifiedItem>) {
        let (mut new_product, mut registered): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|c| c.new_product);

        let key = |c: &ClassifiedItem| (c.urgency, c.due_date, c.input_seq);
        new_product.sort_by_key(key);
        registered.sort_by_key(key);

        (new_product, registered)
    }

    // ==========================================
    // 槽位搜索
    // ==========================================

    /// 在指定池内搜索最早可行槽位并当场预约
    ///
    /// 日期从基准日起逐日推进到搜索窗上限,同日按池内顺序尝试;
    /// 预约即提交（reserve 自带容量检查,检查与提交为同一操作）。
    fn find_and_reserve(
        &self,
        pool: &[&Inspector],
        calendar: &WorkCalendar,
        tracker: &mut CapacityTracker,
        item: &ClassifiedItem,
        config: &SchedulerConfig,
        reference_date: NaiveDate,
    ) -> SlotSearch {
        let mut saw_working_day = false;

        for offset in 0..=config.horizon_days {
            let date = reference_date + Duration::days(offset);

            for inspector in pool {
                if !calendar.is_working_day(inspector, date) {
                    continue;
                }
                saw_working_day = true;

                if tracker.reserve(inspector, date, item.required_hours).is_ok() {
                    return SlotSearch {
                        assigned: Some((
                            inspector.inspector_id.clone(),
                            inspector.name.clone(),
                            date,
                        )),
                        saw_working_day,
                    };
                }
            }
        }

        SlotSearch { assigned: None, saw_working_day }
    }

    // ==========================================
    // 结果落账
    // ==========================================

    /// 将搜索结果写入分配表或未排定报告
    fn record(
        outcome: &mut AssignmentOutcome,
        item: ClassifiedItem,
        slot: Option<(String, String, NaiveDate)>,
        saw_working_day: bool,
        config: &SchedulerConfig,
    ) {
        match slot {
            Some((inspector_id, inspector_name, start_date)) => {
                outcome.assignments.push(AssignmentResult {
                    product_code: item.item.product_code,
                    inspector_id,
                    inspector_name,
                    allocated_hours: item.required_hours,
                    start_date,
                    due_date: item.due_date,
                    urgency: item.urgency,
                    new_product: item.new_product,
                });
            }
            None => {
                let reason = if saw_working_day {
                    UnscheduledReason::NoCapacity
                } else {
                    UnscheduledReason::NoWorkingDay
                };
                outcome.unscheduled.push(UnscheduledItem {
                    product_code: item.item.product_code,
                    reason,
                    detail: format!(
                        "due={}, required={:.2}h, horizon={}d",
                        item.due_date, item.required_hours, config.horizon_days
                    ),
                });
            }
        }
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
