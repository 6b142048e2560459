//! Prompt templates: the admin-editable fragment set, its persistence, and the
//! composer that assembles a system instruction out of it.
//!
//! Read path never fails (falls back to `PromptSet::default()`); write path
//! validates before anything touches storage.

pub mod composer;
pub mod handlers;
pub mod repository;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Style keys the UI offers.
pub const STYLE_KEYS: [&str; 3] = ["formal", "informal", "bullet"];
/// Purpose keys the UI offers.
pub const PURPOSE_KEYS: [&str; 3] = ["document", "internal", "external"];

const DEFAULT_COMMON: &str = "당신은 전문 문서 교정 도우미입니다.";
const DEFAULT_STYLES: [&str; 3] = [
    "격식체로 작성하세요.",
    "평어체로 작성하세요.",
    "개조식으로 작성하세요.",
];
const DEFAULT_PURPOSES: [&str; 3] = [
    "문서 작성용으로 작성하세요.",
    "내부 보고용으로 작성하세요.",
    "외부 보고용으로 작성하세요.",
];

/// The persisted fragment set. Serialized as-is to the on-disk JSON document:
/// `{"common": .., "styles": {..}, "purposes": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSet {
    pub common: String,
    pub styles: BTreeMap<String, String>,
    pub purposes: BTreeMap<String, String>,
}

impl PromptSet {
    pub fn style(&self, key: &str) -> &str {
        self.styles.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn purpose(&self, key: &str) -> &str {
        self.purposes.get(key).map(String::as_str).unwrap_or("")
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        let zip = |keys: [&str; 3], texts: [&str; 3]| {
            keys.iter()
                .zip(texts.iter())
                .map(|(k, t)| (k.to_string(), t.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        PromptSet {
            common: DEFAULT_COMMON.to_string(),
            styles: zip(STYLE_KEYS, DEFAULT_STYLES),
            purposes: zip(PURPOSE_KEYS, DEFAULT_PURPOSES),
        }
    }
}
