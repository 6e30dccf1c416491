// ==========================================
// 人事系统 - 领域类型定义
// ==========================================
// 员工档案中的枚举字段 + 导入枚举强制转换策略
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 将表格中的自由文本规范化为枚举 token
///
/// 规则: TRIM → 大写 → 空白替换为下划线
/// 例如: "laki laki" → "LAKI_LAKI"
pub fn normalize_enum_token(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

// ==========================================
// 性别 (Jenis Kelamin)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JenisKelamin {
    LakiLaki,
    Perempuan,
}

impl JenisKelamin {
    pub fn as_str(&self) -> &'static str {
        match self {
            JenisKelamin::LakiLaki => "LAKI_LAKI",
            JenisKelamin::Perempuan => "PEREMPUAN",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_enum_token(value).as_str() {
            "LAKI_LAKI" => Some(JenisKelamin::LakiLaki),
            "PEREMPUAN" => Some(JenisKelamin::Perempuan),
            _ => None,
        }
    }
}

impl fmt::Display for JenisKelamin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 宗教 (Agama)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Agama {
    Islam,
    Kristen,
    Katolik,
    Hindu,
    Buddha,
    Konghucu,
}

impl Agama {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agama::Islam => "ISLAM",
            Agama::Kristen => "KRISTEN",
            Agama::Katolik => "KATOLIK",
            Agama::Hindu => "HINDU",
            Agama::Buddha => "BUDDHA",
            Agama::Konghucu => "KONGHUCU",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_enum_token(value).as_str() {
            "ISLAM" => Some(Agama::Islam),
            "KRISTEN" => Some(Agama::Kristen),
            "KATOLIK" => Some(Agama::Katolik),
            "HINDU" => Some(Agama::Hindu),
            "BUDDHA" => Some(Agama::Buddha),
            "KONGHUCU" => Some(Agama::Konghucu),
            _ => None,
        }
    }
}

impl fmt::Display for Agama {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 血型 (Golongan Darah)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GolonganDarah {
    A,
    B,
    AB,
    O,
}

impl GolonganDarah {
    pub fn as_str(&self) -> &'static str {
        match self {
            GolonganDarah::A => "A",
            GolonganDarah::B => "B",
            GolonganDarah::AB => "AB",
            GolonganDarah::O => "O",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_enum_token(value).as_str() {
            "A" => Some(GolonganDarah::A),
            "B" => Some(GolonganDarah::B),
            "AB" => Some(GolonganDarah::AB),
            "O" => Some(GolonganDarah::O),
            _ => None,
        }
    }
}

impl fmt::Display for GolonganDarah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 婚姻状况 (Status Pernikahan)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPernikahan {
    BelumMenikah,
    Menikah,
    CeraiHidup,
    CeraiMati,
}

impl StatusPernikahan {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusPernikahan::BelumMenikah => "BELUM_MENIKAH",
            StatusPernikahan::Menikah => "MENIKAH",
            StatusPernikahan::CeraiHidup => "CERAI_HIDUP",
            StatusPernikahan::CeraiMati => "CERAI_MATI",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_enum_token(value).as_str() {
            "BELUM_MENIKAH" => Some(StatusPernikahan::BelumMenikah),
            "MENIKAH" => Some(StatusPernikahan::Menikah),
            "CERAI_HIDUP" => Some(StatusPernikahan::CeraiHidup),
            "CERAI_MATI" => Some(StatusPernikahan::CeraiMati),
            _ => None,
        }
    }
}

impl fmt::Display for StatusPernikahan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 枚举强制转换策略 (Enum Coercion Policy)
// ==========================================
// LENIENT: 无法识别的枚举文本静默丢弃
// STRICT: 无法识别的枚举文本记为行错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnumCoercionPolicy {
    #[default]
    Lenient,
    Strict,
}

impl EnumCoercionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumCoercionPolicy::Lenient => "LENIENT",
            EnumCoercionPolicy::Strict => "STRICT",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_enum_token(value).as_str() {
            "LENIENT" => Some(EnumCoercionPolicy::Lenient),
            "STRICT" => Some(EnumCoercionPolicy::Strict),
            _ => None,
        }
    }
}

impl fmt::Display for EnumCoercionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
