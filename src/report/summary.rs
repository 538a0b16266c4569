// ==========================================
// 检验排班系统 - 运行汇总
// ==========================================
// 职责: 分配结果与花名册的聚合统计 + 控制台渲染
// 红线: 汇总只读结果,不回写任何引擎状态
// ==========================================

use crate::domain::assignment::AssignmentOutcome;
use crate::domain::inspector::Inspector;
use crate::domain::types::UrgencyLevel;
use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// ScheduleSummary - 分配结果概要
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleSummary {
    pub total_assigned: usize,
    pub total_unscheduled: usize,
    pub critical: usize,
    pub urgent: usize,
    pub normal: usize,
    pub low: usize,
    pub new_product_assigned: usize,
    pub total_allocated_hours: f64,
    pub average_allocated_hours: f64,
    /// 检验员姓名 → 预约工时合计（按姓名升序,输出确定性）
    pub per_inspector_hours: Vec<(String, f64)>,
}

/// 聚合分配结果
pub fn summarize(outcome: &AssignmentOutcome) -> ScheduleSummary {
    let mut summary = ScheduleSummary {
        total_assigned: outcome.assignments.len(),
        total_unscheduled: outcome.unscheduled.len(),
        new_product_assigned: outcome.new_product_count(),
        total_allocated_hours: outcome.total_allocated_hours(),
        ..Default::default()
    };

    let mut per_inspector: HashMap<String, f64> = HashMap::new();
    for assignment in &outcome.assignments {
        match assignment.urgency {
            UrgencyLevel::Critical => summary.critical += 1,
            UrgencyLevel::Urgent => summary.urgent += 1,
            UrgencyLevel::Normal => summary.normal += 1,
            UrgencyLevel::Low => summary.low += 1,
        }
        *per_inspector.entry(assignment.inspector_name.clone()).or_default() +=
            assignment.allocated_hours;
    }

    if summary.total_assigned > 0 {
        summary.average_allocated_hours =
            summary.total_allocated_hours / summary.total_assigned as f64;
    }

    let mut per_inspector: Vec<_> = per_inspector.into_iter().collect();
    per_inspector.sort_by(|a, b| a.0.cmp(&b.0));
    summary.per_inspector_hours = per_inspector;

    summary
}

// ==========================================
// CapacityAnalysis - 花名册资源分析
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapacityAnalysis {
    pub total_inspectors: usize,
    pub new_product_team_count: usize,
    /// 班组 → 人数（按班组名升序）
    pub group_counts: Vec<(String, usize)>,
    pub avg_base_hours: f64,
    pub max_base_hours: f64,
    pub min_base_hours: f64,
}

/// 聚合花名册资源信息
pub fn analyze_capacity(inspectors: &[Inspector]) -> CapacityAnalysis {
    let mut analysis = CapacityAnalysis {
        total_inspectors: inspectors.len(),
        new_product_team_count: inspectors.iter().filter(|i| i.new_product_team).count(),
        ..Default::default()
    };

    if inspectors.is_empty() {
        return analysis;
    }

    let mut groups: HashMap<String, usize> = HashMap::new();
    let mut total = 0.0f64;
    let mut max = f64::MIN;
    let mut min = f64::MAX;
    for inspector in inspectors {
        let hours = inspector.base_hours();
        total += hours;
        max = max.max(hours);
        min = min.min(hours);
        if let Some(group) = &inspector.group {
            *groups.entry(group.clone()).or_default() += 1;
        }
    }

    analysis.avg_base_hours = total / inspectors.len() as f64;
    analysis.max_base_hours = max;
    analysis.min_base_hours = min;

    let mut group_counts: Vec<_> = groups.into_iter().collect();
    group_counts.sort_by(|a, b| a.0.cmp(&b.0));
    analysis.group_counts = group_counts;

    analysis
}

// ==========================================
// 控制台渲染
// ==========================================

/// 渲染分配结果概要
pub fn render_schedule_summary(summary: &ScheduleSummary) {
    println!("\n{}", "=".repeat(60));
    println!("分配结果概要");
    println!("{}", "=".repeat(60));
    println!("已排定任务    : {:>6}件", summary.total_assigned);
    println!("未排定任务    : {:>6}件", summary.total_unscheduled);
    println!("其中新品任务  : {:>6}件", summary.new_product_assigned);

    println!("\n■ 紧急等级分布:");
    for (label, count) in [
        ("CRITICAL", summary.critical),
        ("URGENT", summary.urgent),
        ("NORMAL", summary.normal),
        ("LOW", summary.low),
    ] {
        if count > 0 {
            println!("  {label:<10}: {count:>6}件");
        }
    }

    println!("\n■ 工时统计:");
    println!("  总预约工时    : {:>8.1}小时", summary.total_allocated_hours);
    if summary.total_assigned > 0 {
        println!("  平均预约工时  : {:>8.2}小时", summary.average_allocated_hours);
    }

    if !summary.per_inspector_hours.is_empty() {
        println!("\n■ 检验员负载:");
        for (name, hours) in &summary.per_inspector_hours {
            println!("  {name:<12}: {hours:>8.1}小时");
        }
    }
}

/// 渲染花名册资源分析
pub fn render_capacity_analysis(analysis: &CapacityAnalysis) {
    println!("\n{}", "=".repeat(60));
    println!("检验员资源分析");
    println!("{}", "=".repeat(60));
    println!("总检验员数  : {}名", analysis.total_inspectors);
    println!("新品组人数  : {}名", analysis.new_product_team_count);

    if !analysis.group_counts.is_empty() {
        println!("\n■ 班组人数:");
        for (group, count) in &analysis.group_counts {
            println!("  {group:<10}: {count:>4}名");
        }
    }

    if analysis.total_inspectors > 0 {
        println!("\n■ 基础工时:");
        println!("  平均: {:.1}h  最大: {:.1}h  最小: {:.1}h",
            analysis.avg_base_hours, analysis.max_base_hours, analysis.min_base_hours);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assignment::AssignmentResult;
    use chrono::NaiveDate;

    fn assignment(name: &str, hours: f64, urgency: UrgencyLevel) -> AssignmentResult {
        AssignmentResult {
            product_code: "P001".to_string(),
            inspector_id: "I001".to_string(),
            inspector_name: name.to_string(),
            allocated_hours: hours,
            start_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            urgency,
            new_product: false,
        }
    }

    #[test]
    fn test_summarize_counts_reconcile() {
        let outcome = AssignmentOutcome {
            assignments: vec![
                assignment("张三", 2.0, UrgencyLevel::Critical),
                assignment("张三", 3.0, UrgencyLevel::Low),
                assignment("李四", 1.5, UrgencyLevel::Urgent),
            ],
            unscheduled: vec![],
        };

        let summary = summarize(&outcome);
        assert_eq!(summary.total_assigned, 3);
        assert_eq!(summary.critical + summary.urgent + summary.normal + summary.low, 3);
        assert!((summary.total_allocated_hours - 6.5).abs() < 1e-9);
        // 姓名升序,输出确定性
        assert_eq!(summary.per_inspector_hours[0].0, "张三");
        assert!((summary.per_inspector_hours[0].1 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_capacity_empty_roster() {
        let analysis = analyze_capacity(&[]);
        assert_eq!(analysis.total_inspectors, 0);
        assert_eq!(analysis.avg_base_hours, 0.0);
    }
}
