// ==========================================
// 检验排班系统 - 检验任务领域模型
// ==========================================
// 红线: 原始记录与引擎派生状态分离,派生字段不回写原始记录
// ==========================================

use crate::domain::types::UrgencyLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkItem - 短缺检验任务（原始记录）
// ==========================================
// 来源: 出货短缺表,一行一个待检任务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub product_code: String,         // 产品编码
    pub due_date: Option<NaiveDate>,  // 交货期（解析失败保留为 None,由引擎上报）
    pub shortage_qty: f64,            // 短缺数量（已取绝对值）
    pub status: Option<String>,       // 状态标签（原样保留）
}

// ==========================================
// ClassifiedItem - 已分级任务（引擎派生）
// ==========================================
// 由 AssignmentEngine 在分配前派生: 需求工时 + 紧急等级 + 新品标志
#[derive(Debug, Clone)]
pub struct ClassifiedItem {
    pub item: WorkItem,
    pub input_seq: usize,          // 原始输入顺序（稳定排序的末位键）
    pub due_date: NaiveDate,       // 已校验的交货期
    pub required_hours: f64,       // 需求检验工时 = 数量 × 单件时间
    pub urgency: UrgencyLevel,     // 紧急等级
    pub new_product: bool,         // 新品标志（产品编码未登记）
}
