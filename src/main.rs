// ==========================================
// 检验排班系统 - 批处理主入口
// ==========================================
// 流程: 加载表文件 → 分配引擎 → 控制台汇总 + CSV 导出
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use inspection_aps::config::SchedulerConfig;
use inspection_aps::engine::{AssignmentEngine, WorkCalendar};
use inspection_aps::importer::{
    load_holiday_calendar, load_inspector_roster, load_product_master, load_shortage_table,
};
use inspection_aps::report;

// ==========================================
// 命令行参数
// ==========================================
#[derive(Debug, Parser)]
#[command(name = "inspection-aps", version, about = "出货短缺检验排班系统 - 检验员任务分配工具")]
struct Cli {
    /// 数据目录（缺省文件名在该目录下解析）
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// 输出目录
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// 基准日 (YYYY-MM-DD,缺省为今日)
    #[arg(long)]
    base_date: Option<NaiveDate>,

    /// 调度配置 JSON 文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 出货短缺表路径（缺省: <data-dir>/出货短缺表.xlsx）
    #[arg(long)]
    shortage_file: Option<PathBuf>,

    /// 产品主数据路径（缺省: <data-dir>/产品主数据.xlsx）
    #[arg(long)]
    product_file: Option<PathBuf>,

    /// 检验员花名册路径（缺省: <data-dir>/检验员花名册.csv）
    #[arg(long)]
    roster_file: Option<PathBuf>,

    /// 假日日历路径（缺省: <data-dir>/假日日历.csv,文件不存在按无例外处理）
    #[arg(long)]
    calendar_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // 初始化日志系统
    inspection_aps::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 检验员任务分配", inspection_aps::APP_NAME);
    tracing::info!("系统版本: {}", inspection_aps::VERSION);
    tracing::info!("==================================================");

    let cli = Cli::parse();

    // ==========================================
    // 配置与基准日
    // ==========================================
    let config = match &cli.config {
        Some(path) => SchedulerConfig::from_json_file(path)?,
        None => SchedulerConfig::default(),
    };
    let reference_date = cli.base_date.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!(reference_date = %reference_date, horizon_days = config.horizon_days, "运行参数确定");

    // ==========================================
    // 加载表文件
    // ==========================================
    let shortage_path = cli
        .shortage_file
        .unwrap_or_else(|| cli.data_dir.join("出货短缺表.xlsx"));
    let product_path = cli
        .product_file
        .unwrap_or_else(|| cli.data_dir.join("产品主数据.xlsx"));
    let roster_path = cli
        .roster_file
        .unwrap_or_else(|| cli.data_dir.join("检验员花名册.csv"));
    let calendar_path = cli
        .calendar_file
        .unwrap_or_else(|| cli.data_dir.join("假日日历.csv"));

    let work_items = load_shortage_table(&shortage_path)
        .with_context(|| format!("出货短缺表加载失败: {}", shortage_path.display()))?;
    let products = load_product_master(&product_path, config.product_time_unit)
        .with_context(|| format!("产品主数据加载失败: {}", product_path.display()))?;
    let inspectors = load_inspector_roster(&roster_path)
        .with_context(|| format!("检验员花名册加载失败: {}", roster_path.display()))?;

    let calendar = if calendar_path.exists() {
        WorkCalendar::new(load_holiday_calendar(&calendar_path)?)
    } else {
        tracing::warn!(path = %calendar_path.display(), "假日日历不存在,按无例外处理");
        WorkCalendar::empty()
    };
    tracing::info!(aliases = calendar.alias_count(), "工作日历构建完成");

    // ==========================================
    // 执行分配
    // ==========================================
    let engine = AssignmentEngine::new();
    let outcome = engine.run(
        &inspectors,
        &products,
        work_items,
        &calendar,
        &config,
        reference_date,
    )?;

    // ==========================================
    // 汇总与导出
    // ==========================================
    let summary = report::summarize(&outcome);
    report::render_schedule_summary(&summary);
    report::render_capacity_analysis(&report::analyze_capacity(&inspectors));

    if !outcome.unscheduled.is_empty() {
        println!("\n{}", "-".repeat(60));
        println!("未排定任务（{}件）", outcome.unscheduled.len());
        println!("{}", "-".repeat(60));
        for item in &outcome.unscheduled {
            println!("  {:<16} {:<20} {}", item.product_code, item.reason, item.detail);
        }
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("输出目录创建失败: {}", cli.output_dir.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let assignments_path = cli.output_dir.join(format!("检验员分配结果_{stamp}.csv"));
    let unscheduled_path = cli.output_dir.join(format!("未排定报告_{stamp}.csv"));

    report::write_assignments_csv(&assignments_path, &outcome.assignments)?;
    report::write_unscheduled_csv(&unscheduled_path, &outcome.unscheduled)?;

    println!("\n分配表已输出: {}", assignments_path.display());
    println!("未排定报告已输出: {}", unscheduled_path.display());
    println!("处理完成。");

    Ok(())
}
