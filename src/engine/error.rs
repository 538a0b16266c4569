// ==========================================
// 检验排班系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
///
/// 结构性错误（如空花名册）在任何分配开始前终止整次运行;
/// 单件级错误只进未排定报告,不向上传播为失败。
#[derive(Error, Debug)]
pub enum ScheduleError {
    // ===== 结构性错误（整批中止）=====
    #[error("检验员花名册为空,无法执行分配")]
    EmptyRoster,

    // ===== 单件级错误（进未排定报告）=====
    #[error("交货期缺失或无法解析: product_code={0}")]
    InvalidDate(String),

    #[error("产品无可用单件检验时间: product_code={0}")]
    UnresolvedProduct(String),

    // ===== 容量预约错误（内部,提交前必检,不外抛）=====
    #[error("容量不足: inspector_id={inspector_id}, date={date}, 申请 {requested:.2}h, 剩余 {remaining:.2}h")]
    InsufficientCapacity {
        inspector_id: String,
        date: NaiveDate,
        requested: f64,
        remaining: f64,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ScheduleResult<T> = Result<T, ScheduleError>;
