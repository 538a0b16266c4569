// ==========================================
// 检验排班系统 - 调度配置
// ==========================================
// 职责: 配置加载与默认值管理
// 存储: JSON 文件（缺省字段逐项落默认值）
// 红线: 配置是显式输入,不走进程级可变全局量
// ==========================================

use crate::domain::types::TimeUnit;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ===== 默认值 =====
const DEFAULT_URGENCY_THRESHOLD_DAYS: i64 = 3;
const DEFAULT_HORIZON_DAYS: i64 = 30;
const DEFAULT_FALLBACK_UNIT_SECONDS: f64 = 15.0;

fn default_urgency_threshold_days() -> i64 {
    DEFAULT_URGENCY_THRESHOLD_DAYS
}

fn default_horizon_days() -> i64 {
    DEFAULT_HORIZON_DAYS
}

fn default_fallback_unit_seconds() -> f64 {
    DEFAULT_FALLBACK_UNIT_SECONDS
}

fn default_product_time_unit() -> TimeUnit {
    TimeUnit::Auto
}

// ==========================================
// SchedulerConfig - 调度配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 紧急阈值天数（剩余 ≤ 阈值 = URGENT, ≤ 2×阈值 = NORMAL）
    #[serde(default = "default_urgency_threshold_days")]
    pub urgency_threshold_days: i64,

    /// 槽位搜索窗（自基准日起向后的天数上限）
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,

    /// 新品兜底单件检验时间（秒/件,产品未登记时估算需求工时用）
    #[serde(default = "default_fallback_unit_seconds")]
    pub fallback_unit_seconds: f64,

    /// 产品主数据检验时间单位（auto = 按数值分布自动判定）
    #[serde(default = "default_product_time_unit")]
    pub product_time_unit: TimeUnit,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            urgency_threshold_days: DEFAULT_URGENCY_THRESHOLD_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            fallback_unit_seconds: DEFAULT_FALLBACK_UNIT_SECONDS,
            product_time_unit: TimeUnit::Auto,
        }
    }
}

impl SchedulerConfig {
    /// 从 JSON 文件加载配置
    ///
    /// 文件中缺省的字段按默认值填充
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let config: SchedulerConfig = serde_json::from_str(&raw)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// 配置合法性检查
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.urgency_threshold_days >= 1, "urgency_threshold_days 必须 ≥ 1");
        anyhow::ensure!(self.horizon_days >= 0, "horizon_days 必须 ≥ 0");
        anyhow::ensure!(
            self.fallback_unit_seconds.is_finite() && self.fallback_unit_seconds > 0.0,
            "fallback_unit_seconds 必须为正数"
        );
        Ok(())
    }

    /// 兜底单件检验时间（小时/件）
    pub fn fallback_unit_hours(&self) -> f64 {
        self.fallback_unit_seconds / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.urgency_threshold_days, 3);
        assert_eq!(config.horizon_days, 30);
        assert!((config.fallback_unit_hours() - 15.0 / 3600.0).abs() < 1e-12);
        assert_eq!(config.product_time_unit, TimeUnit::Auto);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "horizon_days": 14, "product_time_unit": "seconds" }}"#).unwrap();

        let config = SchedulerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.horizon_days, 14);
        assert_eq!(config.product_time_unit, TimeUnit::Seconds);
        assert_eq!(config.urgency_threshold_days, 3, "缺省字段应落默认值");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "urgency_threshold_days": 0 }}"#).unwrap();
        assert!(SchedulerConfig::from_json_file(file.path()).is_err());
    }
}
