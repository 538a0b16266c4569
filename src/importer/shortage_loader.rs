// ==========================================
// 检验排班系统 - 出货短缺表导入
// ==========================================
// 职责: 短缺表 (.xlsx/.csv) → WorkItem 列表
// 红线: 带产品编码的行不得静默丢弃;
//       交货期解析失败的行保留为"无交货期",由引擎上报 INVALID_DATE
// ==========================================

use crate::domain::work_item::WorkItem;
use crate::importer::data_cleaner::{normalize_null, parse_date_lenient, parse_f64};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

// ===== 表头列名 =====
pub const COL_PRODUCT_CODE: &str = "产品编码";
pub const COL_DUE_DATE: &str = "交货期";
pub const COL_SHORTAGE_QTY: &str = "短缺数";
pub const COL_STATUS: &str = "状态";

/// 加载出货短缺表
///
/// 清洗规则:
/// - 产品编码为空的行跳过（无主键,无法追溯）
/// - 短缺数缺失或为 0 的行跳过（非检验对象）
/// - 短缺数为负按绝对值处理（欠发数量的记账符号）
/// - 同一 (交货期, 产品编码) 的多行只保留短缺绝对值最大的一行
pub fn load_shortage_table<P: AsRef<Path>>(path: P) -> ImportResult<Vec<WorkItem>> {
    let rows = UniversalFileParser::parse(&path)?;

    if let Some(first) = rows.first() {
        for col in [COL_PRODUCT_CODE, COL_DUE_DATE, COL_SHORTAGE_QTY] {
            if !first.contains_key(col) {
                return Err(ImportError::MissingColumn(col.to_string()));
            }
        }
    }

    let mut items: Vec<WorkItem> = Vec::new();
    // (交货期原文, 产品编码) → items 下标,去重用
    let mut seen: HashMap<(String, String), usize> = HashMap::new();
    let mut skipped_no_code = 0usize;
    let mut skipped_zero_qty = 0usize;
    let mut negative_qty = 0usize;

    for row in &rows {
        let product_code = match normalize_null(get(row, COL_PRODUCT_CODE)) {
            Some(code) => code,
            None => {
                skipped_no_code += 1;
                continue;
            }
        };

        let qty_raw = get(row, COL_SHORTAGE_QTY).and_then(parse_f64);
        let qty = match qty_raw {
            Some(q) if q != 0.0 => {
                if q < 0.0 {
                    negative_qty += 1;
                }
                q.abs()
            }
            _ => {
                skipped_zero_qty += 1;
                continue;
            }
        };

        let due_raw = get(row, COL_DUE_DATE).unwrap_or("").to_string();
        let due_date = parse_date_lenient(&due_raw);
        if due_date.is_none() && !due_raw.is_empty() {
            warn!(product_code = %product_code, due = %due_raw, "交货期无法解析,保留待引擎上报");
        }

        let item = WorkItem {
            product_code: product_code.clone(),
            due_date,
            shortage_qty: qty,
            status: normalize_null(get(row, COL_STATUS)),
        };

        // 同 (交货期, 产品编码) 多行取短缺绝对值最大者,保持首现顺序
        let key = (due_raw, product_code);
        match seen.get(&key) {
            Some(&idx) => {
                if qty > items[idx].shortage_qty {
                    items[idx] = item;
                }
            }
            None => {
                seen.insert(key, items.len());
                items.push(item);
            }
        }
    }

    if negative_qty > 0 {
        info!(count = negative_qty, "短缺数存在负值,已按绝对值处理");
    }
    info!(
        loaded = items.len(),
        skipped_no_code,
        skipped_zero_qty,
        "出货短缺表加载完成"
    );

    Ok(items)
}

fn get<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(|s| s.as_str())
}
