// ==========================================
// 人事系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数字转文本 / 日期规范化 / 枚举 token 化
// ==========================================

use crate::importer::file_parser::RawCell;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// 规范化后的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 可接受的文本日期格式（按顺序尝试）
const TEXT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// ISO 日期时间格式（无时区）
const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 枚举单元格的清洗结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCell<T> {
    Absent,
    Valid(T),
    /// 无法识别的原文（已 TRIM）
    Unrecognized(String),
}

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 单元格转文本（整数不带小数部分）
    ///
    /// 例: 81234567890.0 → "81234567890"
    pub fn cell_to_text(&self, cell: &RawCell) -> Option<String> {
        match cell {
            RawCell::Empty => None,
            RawCell::Text(s) => self.normalize_null(Some(s.clone())),
            RawCell::Number(n) => Some(format_number(*n)),
            RawCell::Bool(b) => Some(b.to_string()),
        }
    }

    /// 日期单元格规范化为 YYYY-MM-DD
    ///
    /// - 数值: 按 Excel 1900 日期系统的序列号转换
    /// - 文本: 依次尝试常见格式
    /// - 无法识别: 原样透传（由校验阶段拒绝）
    pub fn coerce_date(&self, cell: &RawCell) -> Option<String> {
        match cell {
            RawCell::Number(n) => Some(
                excel_serial_to_date(*n)
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| format_number(*n)),
            ),
            RawCell::Text(_) | RawCell::Bool(_) => {
                let text = self.cell_to_text(cell)?;
                Some(
                    parse_text_date(&text)
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .unwrap_or(text),
                )
            }
            RawCell::Empty => None,
        }
    }

    /// 枚举单元格转换
    ///
    /// # 参数
    /// - parse: 枚举的 token 解析函数（内部已做 TRIM + 大写 + 空白转下划线）
    pub fn coerce_enum<T>(&self, cell: &RawCell, parse: fn(&str) -> Option<T>) -> EnumCell<T> {
        match self.cell_to_text(cell) {
            None => EnumCell::Absent,
            Some(text) => match parse(&text) {
                Some(value) => EnumCell::Valid(value),
                None => EnumCell::Unrecognized(text),
            },
        }
    }
}

/// 数值转文本：整数去掉 ".0"
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Excel 序列号 → 日期（1900 日期系统）
///
/// - 1..=59: 1900-01-01 ~ 1900-02-28
/// - 60: 不存在的 1900-02-29，视为非日期
/// - >= 61: 自 1899-12-30 起算
/// - 小数部分（时间）忽略
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor() as i64;
    let base = match days {
        d if d < 1 => return None,
        60 => return None,
        d if d < 60 => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    // 上限：9999-12-31
    if days > 2_958_465 {
        return None;
    }
    base.checked_add_signed(Duration::days(days))
}

/// 解析文本日期
pub fn parse_text_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    for fmt in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in TEXT_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// 校验 YYYY-MM-DD 格式的合法日期
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::JenisKelamin;

    #[test]
    fn test_excel_serial_to_date() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(excel_serial_to_date(45000.0), d(2023, 3, 15));
        assert_eq!(excel_serial_to_date(1.0), d(1900, 1, 1));
        assert_eq!(excel_serial_to_date(59.0), d(1900, 2, 28));
        assert_eq!(excel_serial_to_date(60.0), None);
        assert_eq!(excel_serial_to_date(61.0), d(1900, 3, 1));
        assert_eq!(excel_serial_to_date(45000.75), d(2023, 3, 15));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(-3.0), None);
    }

    #[test]
    fn test_coerce_date() {
        let cleaner = DataCleaner;
        let text = |s: &str| RawCell::Text(s.to_string());

        assert_eq!(cleaner.coerce_date(&RawCell::Number(45000.0)), Some("2023-03-15".to_string()));
        assert_eq!(cleaner.coerce_date(&text("2023/03/15")), Some("2023-03-15".to_string()));
        assert_eq!(cleaner.coerce_date(&text("15/03/2023")), Some("2023-03-15".to_string()));
        assert_eq!(cleaner.coerce_date(&text("15-03-2023")), Some("2023-03-15".to_string()));
        assert_eq!(
            cleaner.coerce_date(&text("2023-03-15T08:30:00")),
            Some("2023-03-15".to_string())
        );
        assert_eq!(
            cleaner.coerce_date(&text("2023-03-15T08:30:00+07:00")),
            Some("2023-03-15".to_string())
        );
        // 非日期原样透传
        assert_eq!(cleaner.coerce_date(&text("besok")), Some("besok".to_string()));
        assert_eq!(cleaner.coerce_date(&RawCell::Number(60.0)), Some("60".to_string()));
        assert_eq!(cleaner.coerce_date(&text("  ")), None);
        assert_eq!(cleaner.coerce_date(&RawCell::Empty), None);
    }

    #[test]
    fn test_cell_to_text_whole_numbers() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.cell_to_text(&RawCell::Number(81234567890.0)),
            Some("81234567890".to_string())
        );
        assert_eq!(cleaner.cell_to_text(&RawCell::Number(1.5)), Some("1.5".to_string()));
        assert_eq!(
            cleaner.cell_to_text(&RawCell::Text("  123456 ".to_string())),
            Some("123456".to_string())
        );
        assert_eq!(cleaner.cell_to_text(&RawCell::Text(String::new())), None);
    }

    #[test]
    fn test_coerce_enum() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.coerce_enum(&RawCell::Text("laki laki".to_string()), JenisKelamin::from_token),
            EnumCell::Valid(JenisKelamin::LakiLaki)
        );
        assert_eq!(
            cleaner.coerce_enum(&RawCell::Text(" Pria ".to_string()), JenisKelamin::from_token),
            EnumCell::Unrecognized("Pria".to_string())
        );
        assert_eq!(
            cleaner.coerce_enum(&RawCell::Empty, JenisKelamin::from_token),
            EnumCell::Absent
        );
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2023-03-15"));
        assert!(!is_iso_date("2023-02-30"));
        assert!(!is_iso_date("besok"));
        assert!(!is_iso_date("2023-3-5"));
    }
}
