// ==========================================
// 人事系统 - 主数据查找缓存
// ==========================================
// 每次校验调用构建一次，不跨请求缓存
// 主数据名称键: TRIM + 小写
// 已存在 NIK: TRIM 后精确匹配；已存在邮箱: 忽略大小写
// ==========================================

use crate::domain::employee::EmployeeIdentity;
use crate::domain::master_data::{ReferenceItem, ReferenceKind};
use std::collections::{HashMap, HashSet};

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    lookups: HashMap<ReferenceKind, HashMap<String, String>>,
    existing_niks: HashSet<String>,
    existing_emails: HashSet<String>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由主数据与已存在员工标识构建
    pub fn build(
        references: Vec<(ReferenceKind, Vec<ReferenceItem>)>,
        identities: Vec<EmployeeIdentity>,
    ) -> Self {
        let mut cache = Self::new();
        for (kind, items) in references {
            cache.add_references(kind, items);
        }
        for identity in identities {
            cache.add_identity(identity);
        }
        cache
    }

    pub fn add_references(&mut self, kind: ReferenceKind, items: Vec<ReferenceItem>) {
        let lookup = self.lookups.entry(kind).or_default();
        for item in items {
            lookup.insert(normalize_key(&item.name), item.id);
        }
    }

    pub fn add_identity(&mut self, identity: EmployeeIdentity) {
        self.existing_niks
            .insert(identity.nomor_induk_karyawan.trim().to_string());
        if let Some(email) = identity.email_perusahaan {
            self.existing_emails.insert(normalize_key(&email));
        }
    }

    /// 按名称解析主数据 id
    pub fn resolve(&self, kind: ReferenceKind, name: &str) -> Option<&str> {
        self.lookups
            .get(&kind)
            .and_then(|lookup| lookup.get(&normalize_key(name)))
            .map(String::as_str)
    }

    pub fn nik_exists(&self, nik: &str) -> bool {
        self.existing_niks.contains(nik.trim())
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.existing_emails.contains(&normalize_key(email))
    }
}
