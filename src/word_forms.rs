//! 基于后缀规则的英语词形生成
//!
//! 先查不规则表，再按顺序匹配规则后缀，第一条命中的规则生效。
//! 这是启发式结果，对很多不规则词或外来词会给出错误词形。

use serde::{Deserialize, Serialize};

use crate::irregular::{
    ADJECTIVE_ENDINGS, IRREGULAR_PAST_PARTICIPLE, IRREGULAR_PAST_TENSE, IRREGULAR_PLURALS,
    NOUN_CONVERSIONS, NOUN_ENDINGS, VERB_ENDINGS, lookup,
};

/// 一个单词的各种变形，未生成的字段为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordForms {
    // 动词变形
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_participle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_participle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_person_singular: Option<String>,

    // 名词变形
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,

    // 形容词比较级
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superlative: Option<String>,

    // 派生词
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noun: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adverb: Option<String>,
}

impl WordForms {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// 按固定顺序列出已生成的词形（中文标签, 词形）
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("过去式", &self.past_tense),
            ("过去分词", &self.past_participle),
            ("现在分词", &self.present_participle),
            ("第三人称单数", &self.third_person_singular),
            ("复数", &self.plural),
            ("单数", &self.singular),
            ("比较级", &self.comparative),
            ("最高级", &self.superlative),
            ("名词形式", &self.noun),
            ("动词形式", &self.verb),
            ("形容词形式", &self.adjective),
            ("副词形式", &self.adverb),
        ]
        .into_iter()
        .filter_map(|(label, form)| form.as_deref().map(|f| (label, f)))
        .collect()
    }
}

/// 粗略词性标记，三者互相独立，一个词可以同时满足多个
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartsOfSpeech {
    pub verb: bool,
    pub noun: bool,
    pub adjective: bool,
}

impl PartsOfSpeech {
    /// 根据后缀猜测词性
    pub fn classify(word: &str) -> Self {
        PartsOfSpeech {
            verb: is_likely_verb(word),
            noun: is_likely_noun(word),
            adjective: is_likely_adjective(word),
        }
    }

    /// 从词典返回的词性名构造，其他词性名忽略
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pos = PartsOfSpeech::default();
        for tag in tags {
            match tag.as_ref().trim().to_lowercase().as_str() {
                "verb" => pos.verb = true,
                "noun" => pos.noun = true,
                "adjective" => pos.adjective = true,
                _ => {}
            }
        }
        pos
    }

    pub fn union(self, other: PartsOfSpeech) -> Self {
        PartsOfSpeech {
            verb: self.verb || other.verb,
            noun: self.noun || other.noun,
            adjective: self.adjective || other.adjective,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.verb || self.noun || self.adjective)
    }
}

pub fn is_likely_verb(word: &str) -> bool {
    VERB_ENDINGS.iter().any(|ending| word.ends_with(ending))
}

pub fn is_likely_noun(word: &str) -> bool {
    NOUN_ENDINGS.iter().any(|ending| word.ends_with(ending))
}

pub fn is_likely_adjective(word: &str) -> bool {
    ADJECTIVE_ENDINGS.iter().any(|ending| word.ends_with(ending))
}

pub fn is_vowel(c: Option<char>) -> bool {
    matches!(
        c.map(|c| c.to_ascii_lowercase()),
        Some('a' | 'e' | 'i' | 'o' | 'u')
    )
}

/// CVC 结尾且末字母不是 w/x/y 时双写末字母（不做真正的重音判断）
pub fn should_double_consonant(word: &str) -> bool {
    let mut tail = word.chars().rev();
    let (Some(last), Some(second), Some(third)) = (tail.next(), tail.next(), tail.next()) else {
        return false;
    };

    !is_vowel(Some(last))
        && is_vowel(Some(second))
        && !is_vowel(Some(third))
        && !matches!(last, 'w' | 'x' | 'y')
}

fn second_last(word: &str) -> Option<char> {
    word.chars().rev().nth(1)
}

// 辅音 + y 结尾
fn ends_with_consonant_y(word: &str) -> bool {
    word.ends_with('y') && !is_vowel(second_last(word))
}

fn ends_with_sibilant(word: &str) -> bool {
    ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|ending| word.ends_with(ending))
}

fn with_doubled_last(word: &str, suffix: &str) -> String {
    match word.chars().last() {
        Some(last) => format!("{word}{last}{suffix}"),
        None => suffix.to_string(),
    }
}

// 去掉末尾 n 个 ASCII 字符
fn drop_last(word: &str, n: usize) -> &str {
    &word[..word.len().saturating_sub(n)]
}

pub fn past_tense(word: &str) -> String {
    if let Some(form) = lookup(IRREGULAR_PAST_TENSE, word) {
        return form.to_string();
    }

    if word.ends_with('e') {
        format!("{word}d")
    } else if ends_with_consonant_y(word) {
        format!("{}ied", drop_last(word, 1))
    } else if should_double_consonant(word) {
        with_doubled_last(word, "ed")
    } else {
        format!("{word}ed")
    }
}

/// 规则动词的过去分词与过去式相同
pub fn past_participle(word: &str) -> String {
    match lookup(IRREGULAR_PAST_PARTICIPLE, word) {
        Some(form) => form.to_string(),
        None => past_tense(word),
    }
}

pub fn present_participle(word: &str) -> String {
    if word.ends_with("ie") {
        format!("{}ying", drop_last(word, 2))
    } else if word.ends_with('e') && !word.ends_with("ee") && !word.ends_with("ye") {
        format!("{}ing", drop_last(word, 1))
    } else if should_double_consonant(word) {
        with_doubled_last(word, "ing")
    } else {
        format!("{word}ing")
    }
}

pub fn third_person_singular(word: &str) -> String {
    if ends_with_sibilant(word) {
        format!("{word}es")
    } else if ends_with_consonant_y(word) {
        format!("{}ies", drop_last(word, 1))
    } else if word.ends_with('o') {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

pub fn plural(word: &str) -> String {
    if let Some(form) = lookup(IRREGULAR_PLURALS, word) {
        return form.to_string();
    }

    if ends_with_sibilant(word) {
        format!("{word}es")
    } else if ends_with_consonant_y(word) {
        format!("{}ies", drop_last(word, 1))
    } else if word.ends_with('f') {
        format!("{}ves", drop_last(word, 1))
    } else if word.ends_with("fe") {
        format!("{}ves", drop_last(word, 2))
    } else if word.ends_with('o') && !is_vowel(second_last(word)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

// 比较级/最高级共用：短词加后缀，长词前置 more/most
fn graded(word: &str, suffix: &str, periphrastic: &str) -> String {
    if word.chars().count() > 6 {
        return format!("{periphrastic} {word}");
    }

    if word.ends_with('e') {
        format!("{word}{}", &suffix[1..])
    } else if ends_with_consonant_y(word) {
        format!("{}i{suffix}", drop_last(word, 1))
    } else if should_double_consonant(word) {
        with_doubled_last(word, suffix)
    } else {
        format!("{word}{suffix}")
    }
}

pub fn comparative(word: &str) -> String {
    graded(word, "er", "more")
}

pub fn superlative(word: &str) -> String {
    graded(word, "est", "most")
}

fn adverb_of(word: &str) -> String {
    if word.ends_with("le") {
        format!("{}y", drop_last(word, 1))
    } else if word.ends_with("ic") {
        format!("{word}ally")
    } else if let Some(stem) = word.strip_suffix('y') {
        format!("{stem}ily")
    } else {
        format!("{word}ly")
    }
}

/// 跨词性派生：名词、形容词、副词形式
pub fn find_related_forms(word: &str) -> WordForms {
    let mut forms = WordForms::default();

    forms.noun = NOUN_CONVERSIONS.iter().find_map(|(ending, replacement)| {
        word.strip_suffix(ending)
            .map(|stem| format!("{stem}{replacement}"))
    });

    if word.ends_with("ly") && word.chars().count() > 3 {
        forms.adjective = Some(drop_last(word, 2).to_string());
    }

    if is_likely_adjective(word) {
        forms.adverb = Some(adverb_of(word));
    }

    forms
}

/// 按给定词性生成全部词形，空输入返回空结果
pub fn generate_word_forms(word: &str, pos: PartsOfSpeech) -> WordForms {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return WordForms::default();
    }

    let mut forms = WordForms::default();

    if pos.verb {
        forms.past_tense = Some(past_tense(&word));
        forms.past_participle = Some(past_participle(&word));
        forms.present_participle = Some(present_participle(&word));
        forms.third_person_singular = Some(third_person_singular(&word));
    }

    if pos.noun {
        forms.plural = Some(plural(&word));
    }

    if pos.adjective {
        forms.comparative = Some(comparative(&word));
        forms.superlative = Some(superlative(&word));
    }

    let related = find_related_forms(&word);
    forms.noun = related.noun;
    forms.adjective = related.adjective;
    forms.adverb = related.adverb;

    forms
}

/// 用后缀启发式猜词性后生成词形
pub fn word_forms_for(word: &str) -> WordForms {
    let lower = word.trim().to_lowercase();
    generate_word_forms(&lower, PartsOfSpeech::classify(&lower))
}
