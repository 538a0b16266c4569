// ==========================================
// 检验排班系统 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 日期·时刻·数值·标志的宽容解析
// ==========================================

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use std::collections::HashSet;

/// 空字符串标准化为 None
pub fn normalize_null(value: Option<&str>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 宽容解析日期
///
/// 依次尝试: YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD / 带时刻的日期串 / Excel 日期序列值。
/// 全部失败返回 None（调用方保留记录并交由引擎按 INVALID_DATE 上报）。
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(v, format) {
            return Some(date);
        }
    }

    // Excel 单元格常见的"日期 时刻"串
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(v, format) {
            return Some(dt.date());
        }
    }

    // Excel 日期序列值（1900 日期系统,基准 1899-12-30）
    if let Ok(serial) = v.parse::<f64>() {
        if (20000.0..80000.0).contains(&serial) {
            let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            return Some(base + Duration::days(serial.trunc() as i64));
        }
    }

    None
}

/// 解析 HH:MM / HH:MM:SS 时刻
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let v = value.trim();
    NaiveTime::parse_from_str(v, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(v, "%H:%M:%S"))
        .ok()
}

/// 宽容解析数值（千分位逗号容错）
pub fn parse_f64(value: &str) -> Option<f64> {
    let v = value.trim().replace(',', "");
    if v.is_empty() {
        return None;
    }
    v.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 解析是/否标志（★ 为历史花名册的新品组记号）
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "★" | "1" | "Y" | "YES" | "TRUE" | "是"
    )
}

/// 解析每周出勤日集合
///
/// 支持中文("一二三四五")与数字("12345", 1=周一 7=周日)两种写法,可混用
pub fn parse_weekdays(value: &str) -> HashSet<Weekday> {
    let mut days = HashSet::new();

    for ch in value.trim().chars() {
        let weekday = match ch {
            '一' | '1' => Some(Weekday::Mon),
            '二' | '2' => Some(Weekday::Tue),
            '三' | '3' => Some(Weekday::Wed),
            '四' | '4' => Some(Weekday::Thu),
            '五' | '5' => Some(Weekday::Fri),
            '六' | '6' => Some(Weekday::Sat),
            '日' | '天' | '7' => Some(Weekday::Sun),
            _ => None,
        };
        if let Some(d) = weekday {
            days.insert(d);
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        assert_eq!(parse_date_lenient("2026-08-20"), Some(expected));
        assert_eq!(parse_date_lenient("2026/08/20"), Some(expected));
        assert_eq!(parse_date_lenient("20260820"), Some(expected));
        assert_eq!(parse_date_lenient("2026-08-20 00:00:00"), Some(expected));
    }

    #[test]
    fn test_parse_date_excel_serial() {
        // 45000 = 2023-03-15
        assert_eq!(
            parse_date_lenient("45000"),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_garbage_is_none() {
        assert_eq!(parse_date_lenient("未定"), None);
        assert_eq!(parse_date_lenient(""), None);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("8:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_time("17:00:00"), NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(parse_time("晚班"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("★"));
        assert!(parse_flag("是"));
        assert!(parse_flag("1"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_parse_weekdays_mixed() {
        let days = parse_weekdays("一二三四五");
        assert_eq!(days.len(), 5);
        assert!(days.contains(&Weekday::Mon));
        assert!(!days.contains(&Weekday::Sat));

        let digits = parse_weekdays("67");
        assert!(digits.contains(&Weekday::Sat));
        assert!(digits.contains(&Weekday::Sun));
    }
}
