// ==========================================
// 检验排班系统 - 结果导出
// ==========================================
// 职责: 分配表 / 未排定报告 → CSV 文件
// ==========================================

use crate::domain::assignment::{AssignmentResult, UnscheduledItem};
use crate::importer::error::ImportResult;
use csv::WriterBuilder;
use std::path::Path;
use tracing::info;

/// 导出分配表 CSV
pub fn write_assignments_csv<P: AsRef<Path>>(
    path: P,
    assignments: &[AssignmentResult],
) -> ImportResult<()> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;

    writer.write_record([
        "产品编码",
        "检验员工号",
        "检验员姓名",
        "预约工时",
        "排定开始日",
        "交货期",
        "紧急等级",
        "新品",
    ])?;

    for a in assignments {
        writer.write_record([
            a.product_code.clone(),
            a.inspector_id.clone(),
            a.inspector_name.clone(),
            format!("{:.2}", a.allocated_hours),
            a.start_date.format("%Y-%m-%d").to_string(),
            a.due_date.format("%Y-%m-%d").to_string(),
            a.urgency.to_string(),
            if a.new_product { "★" } else { "" }.to_string(),
        ])?;
    }

    writer.flush()?;
    info!(path = %path.as_ref().display(), rows = assignments.len(), "分配表已导出");
    Ok(())
}

/// 导出未排定报告 CSV
pub fn write_unscheduled_csv<P: AsRef<Path>>(
    path: P,
    unscheduled: &[UnscheduledItem],
) -> ImportResult<()> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;

    writer.write_record(["产品编码", "原因", "说明"])?;
    for item in unscheduled {
        writer.write_record([
            item.product_code.clone(),
            item.reason.to_string(),
            item.detail.clone(),
        ])?;
    }

    writer.flush()?;
    info!(path = %path.as_ref().display(), rows = unscheduled.len(), "未排定报告已导出");
    Ok(())
}
