// ==========================================
// 检验排班系统 - 导入层
// ==========================================
// 职责: 外部表文件 → 领域实体（清洗/归一化/按表头映射）
// 红线: 引擎只接受物化后的表,导入层之外不做文件 I/O
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod master_loader;
pub mod shortage_loader;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use master_loader::{load_holiday_calendar, load_inspector_roster, load_product_master};
pub use shortage_loader::load_shortage_table;
