// ==========================================
// 检验排班系统 - 主数据导入
// ==========================================
// 职责: 产品主数据 / 检验员花名册 / 假日日历 → 领域实体
// 红线: 单件检验时间归一化到小时后才交给引擎
// ==========================================

use crate::domain::inspector::Inspector;
use crate::domain::product::{Product, ProductIndex};
use crate::domain::types::TimeUnit;
use crate::importer::data_cleaner::{
    normalize_null, parse_date_lenient, parse_f64, parse_flag, parse_time, parse_weekdays,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

// ===== 产品主数据表头 =====
pub const COL_PRODUCT_CODE: &str = "产品编码";
pub const COL_PRODUCT_NAME: &str = "品名";
pub const COL_PROCESS_NO: &str = "工序号";
pub const COL_UNIT_TIME: &str = "单件检验时间";
pub const COL_CATEGORY: &str = "类别";

// ===== 花名册表头 =====
pub const COL_INSPECTOR_ID: &str = "工号";
pub const COL_INSPECTOR_NAME: &str = "姓名";
pub const COL_GROUP: &str = "班组";
pub const COL_START_TIME: &str = "开始时刻";
pub const COL_END_TIME: &str = "结束时刻";
pub const COL_WEEKDAYS: &str = "出勤日";
pub const COL_OVERTIME: &str = "加班时数";
pub const COL_NEW_PRODUCT_TEAM: &str = "新品组";
pub const COL_HOLIDAY_ALIAS: &str = "假日日历";

// ===== 假日日历表头 =====
pub const COL_CALENDAR_ALIAS: &str = "日历别名";
pub const COL_HOLIDAY_DATE: &str = "日期";

// ==========================================
// 产品主数据
// ==========================================

/// 加载产品主数据并构建索引
///
/// 单件检验时间按 `unit` 归一化到小时; `Auto` 时按数值分布推断:
/// 最大值 ≤ 1.5 视为 Excel 日分数（×24）,
/// P95 ≤ 100 且中位数 ≤ 60 视为分钟,其余视为秒。
pub fn load_product_master<P: AsRef<Path>>(path: P, unit: TimeUnit) -> ImportResult<ProductIndex> {
    let rows = UniversalFileParser::parse(&path)?;
    require_columns(&rows, &[COL_PRODUCT_CODE, COL_UNIT_TIME])?;

    let mut products = Vec::new();
    let mut raw_times = Vec::new();

    for row in &rows {
        let product_code = match normalize_null(get(row, COL_PRODUCT_CODE)) {
            Some(code) => code,
            None => continue,
        };

        let raw_time = get(row, COL_UNIT_TIME).and_then(parse_f64).filter(|t| *t > 0.0);
        if let Some(t) = raw_time {
            raw_times.push(t);
        }

        products.push(Product {
            product_code,
            name: normalize_null(get(row, COL_PRODUCT_NAME)),
            process_no: get(row, COL_PROCESS_NO)
                .and_then(parse_f64)
                .map(|n| n.trunc() as i32),
            category: normalize_null(get(row, COL_CATEGORY)),
            unit_inspection_hours: raw_time,
        });
    }

    if products.is_empty() {
        return Err(ImportError::EmptyTable(
            "产品主数据无有效数据行".to_string(),
        ));
    }

    let resolved_unit = resolve_time_unit(unit, &raw_times);
    for product in &mut products {
        if let Some(t) = product.unit_inspection_hours {
            product.unit_inspection_hours = Some(resolved_unit.to_hours(t));
        }
    }

    let index = ProductIndex::from_products(products);
    info!(
        products = index.len(),
        unit = %resolved_unit,
        "产品主数据加载完成（检验时间已归一化到小时）"
    );

    Ok(index)
}

/// 判定单件检验时间的实际单位
fn resolve_time_unit(configured: TimeUnit, raw_times: &[f64]) -> TimeUnit {
    if configured != TimeUnit::Auto {
        return configured;
    }
    if raw_times.is_empty() {
        return TimeUnit::Hours;
    }

    let mut sorted = raw_times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let max = *sorted.last().unwrap();
    let median = sorted[sorted.len() / 2];
    let p95 = sorted[((sorted.len() as f64 * 0.95) as usize).min(sorted.len() - 1)];

    if max <= 1.5 {
        warn!(max, "检验时间数值极小,按 Excel 日分数处理");
        return TimeUnit::ExcelDays;
    }
    if p95 <= 100.0 && median <= 60.0 {
        return TimeUnit::Minutes;
    }
    TimeUnit::Seconds
}

// ==========================================
// 检验员花名册
// ==========================================

/// 加载检验员花名册（顺序即文件行序,后续并列打破依赖此序）
pub fn load_inspector_roster<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Inspector>> {
    let rows = UniversalFileParser::parse(&path)?;
    require_columns(&rows, &[COL_INSPECTOR_ID, COL_START_TIME, COL_END_TIME, COL_WEEKDAYS])?;

    let mut roster = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (row_no, row) in rows.iter().enumerate() {
        let inspector_id = match normalize_null(get(row, COL_INSPECTOR_ID)) {
            Some(id) => id,
            None => {
                warn!(row = row_no + 2, "工号为空,跳过该行");
                continue;
            }
        };
        if !seen_ids.insert(inspector_id.clone()) {
            warn!(inspector_id = %inspector_id, "工号重复,保留首行");
            continue;
        }

        let name = normalize_null(get(row, COL_INSPECTOR_NAME)).unwrap_or_else(|| inspector_id.clone());

        let start_time = get(row, COL_START_TIME).and_then(parse_time).ok_or_else(|| {
            ImportError::TimeFormatError {
                row: row_no + 2,
                field: COL_START_TIME.to_string(),
                value: get(row, COL_START_TIME).unwrap_or("").to_string(),
            }
        })?;
        let end_time = get(row, COL_END_TIME).and_then(parse_time).ok_or_else(|| {
            ImportError::TimeFormatError {
                row: row_no + 2,
                field: COL_END_TIME.to_string(),
                value: get(row, COL_END_TIME).unwrap_or("").to_string(),
            }
        })?;

        let working_weekdays = parse_weekdays(get(row, COL_WEEKDAYS).unwrap_or(""));
        if working_weekdays.is_empty() {
            warn!(inspector_id = %inspector_id, "出勤日为空,该员将无任何工作日");
        }

        roster.push(Inspector {
            inspector_id,
            name,
            group: normalize_null(get(row, COL_GROUP)),
            start_time,
            end_time,
            working_weekdays,
            overtime_budget_hours: get(row, COL_OVERTIME).and_then(parse_f64).unwrap_or(0.0).max(0.0),
            new_product_team: parse_flag(get(row, COL_NEW_PRODUCT_TEAM).unwrap_or("")),
            holiday_alias: normalize_null(get(row, COL_HOLIDAY_ALIAS)),
        });
    }

    info!(inspectors = roster.len(), "检验员花名册加载完成");
    Ok(roster)
}

// ==========================================
// 假日日历
// ==========================================

/// 加载假日例外表: 日历别名 → 休假日期集合
///
/// 日期无法解析的行记警告后跳过（例外表行无主体业务含义,不进引擎报告）
pub fn load_holiday_calendar<P: AsRef<Path>>(
    path: P,
) -> ImportResult<HashMap<String, HashSet<NaiveDate>>> {
    let rows = UniversalFileParser::parse(&path)?;

    let mut holidays: HashMap<String, HashSet<NaiveDate>> = HashMap::new();
    for (row_no, row) in rows.iter().enumerate() {
        let alias = match normalize_null(get(row, COL_CALENDAR_ALIAS)) {
            Some(a) => a,
            None => continue,
        };
        match get(row, COL_HOLIDAY_DATE).and_then(parse_date_lenient) {
            Some(date) => {
                holidays.entry(alias).or_default().insert(date);
            }
            None => {
                warn!(row = row_no + 2, alias = %alias, "假日日期无法解析,跳过该行");
            }
        }
    }

    info!(aliases = holidays.len(), "假日日历加载完成");
    Ok(holidays)
}

fn get<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(|s| s.as_str())
}

/// 校验首行携带全部必需列（空表放过,由各加载器自行判定空表语义）
fn require_columns(rows: &[RawRow], columns: &[&str]) -> ImportResult<()> {
    if let Some(first) = rows.first() {
        for col in columns {
            if !first.contains_key(*col) {
                return Err(ImportError::MissingColumn((*col).to_string()));
            }
        }
    }
    Ok(())
}
