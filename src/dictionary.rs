use itertools::Itertools;

use crate::models::{DictionaryEntry, EnglishMeaning, WordData};
use crate::word_forms::{PartsOfSpeech, generate_word_forms};

/// 从词典 API 返回的条目中提取单词信息，只使用第一个条目
pub fn extract_word_data(entries: &[DictionaryEntry]) -> Option<WordData> {
    let entry = entries.first()?;

    let (phonetic, audio_url) = pick_phonetic(entry);
    let phonetic = if phonetic.is_empty() {
        simple_phonetic(&entry.word)
    } else {
        phonetic
    };

    // 去重并保持原顺序
    let part_of_speech: Vec<String> = entry
        .meanings
        .iter()
        .map(|m| m.part_of_speech.clone())
        .unique()
        .collect();

    let english_meanings = entry
        .meanings
        .iter()
        .map(|meaning| {
            let definitions = meaning.definitions.iter().map(|d| d.definition.clone());
            let examples = meaning
                .definitions
                .iter()
                .filter_map(|d| d.example.clone());
            // 先取释义级别的同义词，再取词义级别的
            let synonyms = meaning
                .definitions
                .iter()
                .flat_map(|d| d.synonyms.iter().cloned())
                .chain(meaning.synonyms.iter().cloned());
            let antonyms = meaning
                .definitions
                .iter()
                .flat_map(|d| d.antonyms.iter().cloned())
                .chain(meaning.antonyms.iter().cloned());

            EnglishMeaning {
                part_of_speech: meaning.part_of_speech.clone(),
                definitions: definitions.unique().collect(),
                examples: examples.unique().collect(),
                synonyms: synonyms.unique().collect(),
                antonyms: antonyms.unique().collect(),
            }
        })
        .collect();

    let lower = entry.word.to_lowercase();
    let pos = PartsOfSpeech::classify(&lower).union(PartsOfSpeech::from_tags(&part_of_speech));
    let forms = generate_word_forms(&lower, pos);

    Some(WordData {
        word: entry.word.clone(),
        phonetic,
        audio_url,
        part_of_speech,
        english_meanings,
        origin: entry.origin.clone().filter(|o| !o.is_empty()),
        word_forms: (!forms.is_empty()).then_some(forms),
    })
}

// 优先使用带音频的音标
fn pick_phonetic(entry: &DictionaryEntry) -> (String, Option<String>) {
    let fallback = entry.phonetic.clone().unwrap_or_default();

    let with_audio = entry
        .phonetics
        .iter()
        .find(|p| p.audio.as_deref().is_some_and(|a| !a.is_empty()));
    if let Some(p) = with_audio {
        let text = p
            .text
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback);
        return (text, p.audio.clone());
    }

    let first_text = entry
        .phonetics
        .iter()
        .find_map(|p| p.text.clone().filter(|t| !t.is_empty()));
    (first_text.unwrap_or(fallback), None)
}

/// 词典没有音标时的简单替代：/字母/
pub fn simple_phonetic(word: &str) -> String {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    format!("/{letters}/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<DictionaryEntry> {
        serde_json::from_value(value).unwrap()
    }

    fn hello_entries() -> Vec<DictionaryEntry> {
        parse(json!([
            {
                "word": "hello",
                "phonetic": "həˈləʊ",
                "phonetics": [
                    { "text": "həˈləʊ", "audio": "" },
                    { "text": "hɛˈləʊ", "audio": "https://example.com/hello-uk.mp3" }
                ],
                "origin": "early 19th century: variant of earlier hollo.",
                "meanings": [
                    {
                        "partOfSpeech": "exclamation",
                        "definitions": [
                            {
                                "definition": "used as a greeting.",
                                "example": "hello there, Katie!",
                                "synonyms": ["hi"],
                                "antonyms": []
                            }
                        ],
                        "synonyms": ["hi", "greetings"]
                    },
                    {
                        "partOfSpeech": "noun",
                        "definitions": [
                            { "definition": "an utterance of ‘hello’; a greeting.", "example": "she was getting polite nods and hellos from people" },
                            { "definition": "an utterance of ‘hello’; a greeting." }
                        ]
                    },
                    {
                        "partOfSpeech": "noun",
                        "definitions": [ { "definition": "a second noun sense." } ]
                    }
                ]
            },
            { "word": "hello", "meanings": [] }
        ]))
    }

    #[test]
    fn test_empty_response_gives_none() {
        assert!(extract_word_data(&[]).is_none());
    }

    #[test]
    fn test_prefers_phonetic_with_audio() {
        let data = extract_word_data(&hello_entries()).unwrap();
        assert_eq!(data.phonetic, "hɛˈləʊ");
        assert_eq!(
            data.audio_url.as_deref(),
            Some("https://example.com/hello-uk.mp3")
        );
    }

    #[test]
    fn test_parts_of_speech_are_distinct_in_order() {
        let data = extract_word_data(&hello_entries()).unwrap();
        assert_eq!(data.part_of_speech, vec!["exclamation", "noun"]);
        assert_eq!(data.english_meanings.len(), 3);
    }

    #[test]
    fn test_meanings_are_deduplicated() {
        let data = extract_word_data(&hello_entries()).unwrap();
        let exclamation = &data.english_meanings[0];
        assert_eq!(exclamation.synonyms, vec!["hi", "greetings"]);
        assert_eq!(exclamation.examples, vec!["hello there, Katie!"]);

        let noun = &data.english_meanings[1];
        assert_eq!(noun.definitions.len(), 1);
        assert_eq!(noun.examples.len(), 1);
    }

    #[test]
    fn test_word_forms_use_dictionary_tags() {
        let data = extract_word_data(&hello_entries()).unwrap();
        let forms = data.word_forms.unwrap();
        // 辅音 + o 结尾按规则加 es
        assert_eq!(forms.plural.as_deref(), Some("helloes"));
        assert_eq!(forms.past_tense, None);
    }

    #[test]
    fn test_falls_back_to_first_text_then_simple_phonetic() {
        let data = extract_word_data(&parse(json!([
            {
                "word": "walk",
                "phonetics": [ { "audio": "" }, { "text": "/wɔːk/" } ],
                "meanings": [ { "partOfSpeech": "verb", "definitions": [ { "definition": "move on foot." } ] } ]
            }
        ])))
        .unwrap();
        assert_eq!(data.phonetic, "/wɔːk/");
        assert_eq!(data.audio_url, None);
        assert_eq!(data.origin, None);
        assert_eq!(
            data.word_forms.unwrap().past_tense.as_deref(),
            Some("walked")
        );

        let data = extract_word_data(&parse(json!([
            { "word": "Zzz", "meanings": [] }
        ])))
        .unwrap();
        assert_eq!(data.phonetic, "/zzz/");
        assert_eq!(data.word_forms, None);
    }

    #[test]
    fn test_simple_phonetic_strips_non_letters() {
        assert_eq!(simple_phonetic("Well-Being"), "/wellbeing/");
    }
}
