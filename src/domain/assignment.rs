// ==========================================
// 检验排班系统 - 分配结果领域模型
// ==========================================
// 红线: 未排定任务必须带原因上报,不允许静默丢弃
// ==========================================

use crate::domain::types::{UnscheduledReason, UrgencyLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AssignmentResult - 分配记录
// ==========================================
// 一条成功排定的任务对应一条记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub product_code: String,      // 产品编码
    pub inspector_id: String,      // 检验员工号
    pub inspector_name: String,    // 检验员姓名
    pub allocated_hours: f64,      // 预约工时
    pub start_date: NaiveDate,     // 排定开始日
    pub due_date: NaiveDate,       // 交货期
    pub urgency: UrgencyLevel,     // 紧急等级
    pub new_product: bool,         // 新品标志（即使回落到普通组仍为 true）
}

// ==========================================
// UnscheduledItem - 未排定报告项
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledItem {
    pub product_code: String,
    pub reason: UnscheduledReason,
    pub detail: String, // 可读说明（交货期/需求工时等上下文）
}

// ==========================================
// AssignmentOutcome - 单次运行的完整输出
// ==========================================
// 分配表与未排定报告均保持确定性顺序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub assignments: Vec<AssignmentResult>,
    pub unscheduled: Vec<UnscheduledItem>,
}

impl AssignmentOutcome {
    /// 已排定任务的总预约工时
    pub fn total_allocated_hours(&self) -> f64 {
        self.assignments.iter().map(|a| a.allocated_hours).sum()
    }

    /// 新品任务数（含回落到普通组的）
    pub fn new_product_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.new_product).count()
    }
}
