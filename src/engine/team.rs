// ==========================================
// 检验排班系统 - 团队划分引擎
// ==========================================
// 职责: 花名册按新品组标志划分 + 任务新品判定
// 红线: 划分保持花名册原始顺序（稳定,后续并列打破依赖此序）
// ==========================================

use crate::domain::inspector::Inspector;
use crate::domain::product::ProductIndex;
use crate::domain::work_item::WorkItem;

// ==========================================
// TeamSelector - 团队划分引擎
// ==========================================
pub struct TeamSelector {
    // 无状态引擎,不需要注入依赖
}

impl TeamSelector {
    /// 创建新的团队划分引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 新品组成员（保持花名册顺序）
    pub fn new_product_members<'a>(&self, inspectors: &'a [Inspector]) -> Vec<&'a Inspector> {
        inspectors.iter().filter(|i| i.new_product_team).collect()
    }

    /// 普通组成员（保持花名册顺序）
    pub fn regular_members<'a>(&self, inspectors: &'a [Inspector]) -> Vec<&'a Inspector> {
        inspectors.iter().filter(|i| !i.new_product_team).collect()
    }

    /// 任务是否为新品任务（产品编码未登记于产品索引）
    pub fn is_new_product(&self, item: &WorkItem, products: &ProductIndex) -> bool {
        !products.contains(&item.product_code)
    }
}

impl Default for TeamSelector {
    fn default() -> Self {
        Self::new()
    }
}
