// ==========================================
// 导入→分配→导出 全链路集成测试
// ==========================================
// 职责: 验证表文件到结果文件的完整数据流
// ==========================================

use chrono::NaiveDate;
use inspection_aps::config::SchedulerConfig;
use inspection_aps::domain::types::UnscheduledReason;
use inspection_aps::engine::{AssignmentEngine, WorkCalendar};
use inspection_aps::importer::{
    load_holiday_calendar, load_inspector_roster, load_product_master, load_shortage_table,
};
use inspection_aps::report;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// ==========================================
// 测试辅助函数
// ==========================================

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

/// 基准日期: 2026-08-10 (星期一)
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
}

#[test]
fn test_full_pipeline_from_files_to_csv() {
    let dir = tempfile::tempdir().unwrap();

    // ===== 准备四张表 =====
    let shortage_path = write_file(
        &dir,
        "出货短缺表.csv",
        "交货期,产品编码,短缺数,状态\n\
         2026-08-12,P001,10,未出货\n\
         2026-08-20,NEW001,1200,未出货\n\
         未定,P002,4,未出货\n",
    );
    // 单件时间: 1800秒 = 0.5h → P001 需求 5h
    let product_path = write_file(
        &dir,
        "产品主数据.csv",
        "产品编码,品名,工序号,单件检验时间,类别\n\
         P001,外观件A,10,1800,A\n\
         P002,外观件B,10,1800,A\n",
    );
    let roster_path = write_file(
        &dir,
        "检验员花名册.csv",
        "工号,姓名,班组,开始时刻,结束时刻,出勤日,加班时数,新品组,假日日历\n\
         I001,张三,一组,8:30,17:00,一二三四五,0,★,CAL_A\n\
         I002,李四,一组,8:30,17:00,一二三四五,2,,\n",
    );
    // 张三周一休假
    let calendar_path = write_file(&dir, "假日日历.csv", "日历别名,日期\nCAL_A,2026-08-10\n");

    // ===== 加载 =====
    let config = SchedulerConfig::default(); // 兜底15秒/件 → NEW001 需求 1200×15s = 5h
    let work_items = load_shortage_table(&shortage_path).unwrap();
    let products = load_product_master(&product_path, config.product_time_unit).unwrap();
    let inspectors = load_inspector_roster(&roster_path).unwrap();
    let calendar = WorkCalendar::new(load_holiday_calendar(&calendar_path).unwrap());

    assert_eq!(work_items.len(), 3, "坏日期行也必须进入引擎");

    // ===== 分配 =====
    let engine = AssignmentEngine::new();
    let outcome = engine
        .run(&inspectors, &products, work_items, &calendar, &config, monday())
        .unwrap();

    // NEW001: 新品 → 张三,但周一休假 → 周二
    let new_result = outcome
        .assignments
        .iter()
        .find(|a| a.product_code == "NEW001")
        .expect("新品任务应被排定");
    assert_eq!(new_result.inspector_id, "I001");
    assert_eq!(new_result.start_date, NaiveDate::from_ymd_opt(2026, 8, 11).unwrap());
    assert!((new_result.allocated_hours - 5.0).abs() < 1e-9, "1200件×15秒 = 5小时");
    assert!(new_result.new_product);

    // P001: 已登记 → 李四(普通组),周一即可
    let registered = outcome
        .assignments
        .iter()
        .find(|a| a.product_code == "P001")
        .expect("已登记任务应被排定");
    assert_eq!(registered.inspector_id, "I002");
    assert_eq!(registered.start_date, monday());
    assert!((registered.allocated_hours - 5.0).abs() < 1e-9, "10件×1800秒 = 5小时");

    // P002: 坏日期 → INVALID_DATE
    assert_eq!(outcome.unscheduled.len(), 1);
    assert_eq!(outcome.unscheduled[0].product_code, "P002");
    assert_eq!(outcome.unscheduled[0].reason, UnscheduledReason::InvalidDate);

    // ===== 汇总与导出 =====
    let summary = report::summarize(&outcome);
    assert_eq!(summary.total_assigned, 2);
    assert_eq!(summary.total_unscheduled, 1);
    assert_eq!(
        summary.critical + summary.urgent + summary.normal + summary.low,
        summary.total_assigned,
        "等级分布应与分配表核对一致"
    );

    let out_assignments = dir.path().join("分配结果.csv");
    let out_unscheduled = dir.path().join("未排定.csv");
    report::write_assignments_csv(&out_assignments, &outcome.assignments).unwrap();
    report::write_unscheduled_csv(&out_unscheduled, &outcome.unscheduled).unwrap();

    let assignments_csv = fs::read_to_string(&out_assignments).unwrap();
    assert!(assignments_csv.contains("NEW001"));
    assert!(assignments_csv.contains("张三"));
    let unscheduled_csv = fs::read_to_string(&out_unscheduled).unwrap();
    assert!(unscheduled_csv.contains("INVALID_DATE"));
}

#[test]
fn test_pipeline_auto_unit_detection_minutes() {
    let dir = tempfile::tempdir().unwrap();

    // 数值分布在分钟档（中位数 ≤ 60, P95 ≤ 100）
    let product_path = write_file(
        &dir,
        "产品主数据.csv",
        "产品编码,单件检验时间\nP001,30\nP002,45\nP003,12\n",
    );

    let products = load_product_master(&product_path, SchedulerConfig::default().product_time_unit).unwrap();
    assert!((products.unit_hours("P001").unwrap() - 0.5).abs() < 1e-9, "30分钟应归一化为0.5小时");
}
