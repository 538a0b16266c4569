// ==========================================
// 检验排班系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 批处理
// 系统定位: 决策支持工具 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则
pub mod engine;

// 导入层 - 外部表文件
pub mod importer;

// 配置层 - 调度参数
pub mod config;

// 报表层 - 汇总与导出
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{TimeUnit, UnscheduledReason, UrgencyLevel};

// 领域实体
pub use domain::{
    AssignmentOutcome, AssignmentResult, ClassifiedItem, Inspector, Product, ProductIndex,
    UnscheduledItem, WorkItem,
};

// 引擎
pub use engine::{
    AssignmentEngine, CapacityTracker, ScheduleError, TeamSelector, UrgencyClassifier,
    WorkCalendar,
};

// 配置
pub use config::SchedulerConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "检验排班系统";

// ==========================================
// 预编译检查
// ==========================================
