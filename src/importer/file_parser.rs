// ==========================================
// 检验排班系统 - 文件解析器
// ==========================================
// 职责: Excel (.xlsx/.xls) / CSV (.csv) → 按表头取值的行记录
// 红线: 字段一律按表头名访问,禁止按列序号访问
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 按表头取值的单行记录
pub type RawRow = HashMap<String, String>;

/// 去除表头中的 UTF-8 BOM 与首尾空白
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ==========================================
// CSV 解析
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse(file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Excel 解析
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse(file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell.to_string()))
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（按扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser::parse(path),
            "xlsx" | "xls" => ExcelParser::parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "产品编码,短缺数").unwrap();
        writeln!(temp_file, "P001,12").unwrap();
        writeln!(temp_file, "P002,3").unwrap();

        let records = CsvParser::parse(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("产品编码"), Some(&"P001".to_string()));
        assert_eq!(records[0].get("短缺数"), Some(&"12".to_string()));
    }

    #[test]
    fn test_csv_parser_strips_bom_header() {
        // utf-8-sig 导出的花名册表头带 BOM
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "\u{feff}工号,姓名\nI001,张三\n").unwrap();

        let records = CsvParser::parse(temp_file.path()).unwrap();
        assert_eq!(records[0].get("工号"), Some(&"I001".to_string()));
    }

    #[test]
    fn test_csv_parser_skips_empty_rows() {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "产品编码,短缺数").unwrap();
        writeln!(temp_file, "P001,12").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "P002,3").unwrap();

        let records = CsvParser::parse(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_file_not_found() {
        let result = CsvParser::parse(Path::new("不存在.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser::parse("数据.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
