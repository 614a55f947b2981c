//! シート名の整形と重複回避
//!
//! Excelのシート名は31文字まで、`[ ] : * ? / \` は使用不可、
//! 先頭・末尾のアポストロフィも不可。大文字小文字を区別せずに一意である必要がある。

use std::collections::HashSet;

/// シート名の最大文字数
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// 空になったシート名の代替
const EMPTY_SHEET_NAME: &str = "Leer";

/// Excel の予約済みシート名
const RESERVED_SHEET_NAME: &str = "History";

lazy_static::lazy_static! {
    static ref INVALID_CHARS: regex::Regex = regex::Regex::new(r"[\[\]:*?/\\]").unwrap();
}

/// 先頭 `max` 文字
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Excelで使えるシート名に整形（31文字に切り詰め）
pub fn sanitize_sheet_name(raw: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(raw, "_");
    let truncated = truncate_chars(&replaced, MAX_SHEET_NAME_LEN);
    let trimmed = truncated.trim_matches('\'');

    if trimmed.is_empty() {
        EMPTY_SHEET_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// ワークブック内でシート名を一意に割り当てる
///
/// 衝突した場合は ` (2)`, ` (3)` … を付け、31文字に収まるよう元の名前を削る。
#[derive(Debug)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl Default for SheetNamer {
    fn default() -> Self {
        let mut namer = Self { used: HashSet::new() };
        namer.reserve(RESERVED_SHEET_NAME);
        namer
    }
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 後で使う固定名を先に確保
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_lowercase());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&name.to_lowercase())
    }

    /// 生の値からシート名を割り当て
    pub fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if !self.is_used(&base) {
            self.reserve(&base);
            return base;
        }

        let mut n = 2;
        loop {
            let suffix = format!(" ({})", n);
            let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let candidate = format!("{}{}", truncate_chars(&base, room), suffix);
            if !self.is_used(&candidate) {
                log::warn!("シート名 '{}' は使用済みのため '{}' に変更", base, candidate);
                self.reserve(&candidate);
                return candidate;
            }
            n += 1;
        }
    }
}
