use anyhow::Result;
use chrono::Utc;

use crate::models::NewWord;
use crate::word_forms::{PartsOfSpeech, generate_word_forms};

const DEFAULT_WORDS_JSON: &str = include_str!("../data/default_words.json");

/// 首次使用时写入的示例单词
pub fn default_words() -> Result<Vec<NewWord>> {
    let mut words: Vec<NewWord> = serde_json::from_str(DEFAULT_WORDS_JSON)
        .map_err(|e| anyhow::anyhow!("内置单词数据解析失败: {}", e))?;

    let now = Utc::now().to_rfc3339();
    for word in &mut words {
        if word.etymology.generated_at.is_empty() {
            word.etymology.generated_at = now.clone();
        }
        let pos = PartsOfSpeech::classify(&word.word)
            .union(PartsOfSpeech::from_tags(&word.part_of_speech));
        let forms = generate_word_forms(&word.word, pos);
        word.word_forms = (!forms.is_empty()).then_some(forms);
    }

    Ok(words)
}
