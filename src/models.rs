use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::word_forms::WordForms;

// 单词记录，JSON 字段名与导出格式保持 camelCase
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: i64,
    pub word: String,
    pub phonetic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub part_of_speech: Vec<String>,
    pub chinese_meaning: Vec<ChineseMeaning>,
    pub english_meaning: Vec<EnglishMeaning>,
    pub etymology: Etymology,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_forms: Option<WordForms>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub review_count: u32,
    pub mastery: u8, // 0-100
}

impl Word {
    pub fn is_mastered(&self) -> bool {
        self.mastery >= MASTERED_THRESHOLD
    }
}

pub const MASTERED_THRESHOLD: u8 = 80;

// 尚未入库的单词（没有 id 和复习信息）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    pub phonetic: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub part_of_speech: Vec<String>,
    pub chinese_meaning: Vec<ChineseMeaning>,
    pub english_meaning: Vec<EnglishMeaning>,
    pub etymology: Etymology,
    #[serde(default)]
    pub word_forms: Option<WordForms>,
}

// 部分更新，只覆盖给出的字段
#[derive(Debug, Clone, Default)]
pub struct WordUpdate {
    pub phonetic: Option<String>,
    pub audio_url: Option<String>,
    pub part_of_speech: Option<Vec<String>>,
    pub chinese_meaning: Option<Vec<ChineseMeaning>>,
    pub etymology: Option<Etymology>,
    pub mastery: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChineseMeaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnglishMeaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Etymology {
    pub roots: Vec<WordRoot>,
    pub origin: String,
    pub evolution: String,
    pub related_words: Vec<String>,
    pub mnemonic: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordRoot {
    pub root: String,
    pub meaning: String,
    pub language: String,
}

// 词典查询结果
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub word: String,
    pub phonetic: String,
    pub audio_url: Option<String>,
    pub part_of_speech: Vec<String>,
    pub english_meanings: Vec<EnglishMeaning>,
    pub origin: Option<String>,
    pub word_forms: Option<WordForms>,
}

// Free Dictionary API 响应结构
#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

// MyMemory 翻译 API 响应结构
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    #[serde(default)]
    pub response_data: Option<TranslationData>,
    #[serde(default)]
    pub response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationData {
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl TranslationResponse {
    /// 成功且有译文时返回译文
    pub fn translated_text(&self) -> Option<&str> {
        // responseStatus 有时是数字有时是字符串
        let status_ok = match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        };
        if !status_ok {
            return None;
        }
        self.response_data
            .as_ref()
            .and_then(|data| data.translated_text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_response_requires_status_200() {
        let ok: TranslationResponse = serde_json::from_value(serde_json::json!({
            "responseData": { "translatedText": "你好" },
            "responseStatus": 200
        }))
        .unwrap();
        assert_eq!(ok.translated_text(), Some("你好"));

        let quota: TranslationResponse = serde_json::from_value(serde_json::json!({
            "responseData": { "translatedText": "QUOTA EXCEEDED" },
            "responseStatus": "429"
        }))
        .unwrap();
        assert_eq!(quota.translated_text(), None);

        let empty: TranslationResponse = serde_json::from_value(serde_json::json!({
            "responseData": { "translatedText": "" },
            "responseStatus": 200
        }))
        .unwrap();
        assert_eq!(empty.translated_text(), None);
    }

    #[test]
    fn etymology_fields_default_when_missing() {
        let etymology: Etymology =
            serde_json::from_value(serde_json::json!({ "origin": "Latin" })).unwrap();
        assert_eq!(etymology.origin, "Latin");
        assert!(etymology.roots.is_empty());
        assert!(etymology.mnemonic.is_empty());
    }
}
