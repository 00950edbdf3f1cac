use anyhow::Result;
use chrono::{NaiveDate, SecondsFormat};
use std::path::{Path, PathBuf};

use crate::models::{ChineseMeaning, EnglishMeaning, Etymology, Word};

const CSV_HEADERS: [&str; 9] = [
    "Word",
    "Phonetic",
    "Part of Speech",
    "Chinese Meaning",
    "English Meaning",
    "Etymology",
    "Created At",
    "Review Count",
    "Mastery (%)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

// 词性: 释义1; 释义2 | 词性: ...
trait MeaningLine {
    fn part_of_speech(&self) -> &str;
    fn definitions(&self) -> &[String];
}

impl MeaningLine for ChineseMeaning {
    fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }
    fn definitions(&self) -> &[String] {
        &self.definitions
    }
}

impl MeaningLine for EnglishMeaning {
    fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }
    fn definitions(&self) -> &[String] {
        &self.definitions
    }
}

fn format_meanings<M: MeaningLine>(meanings: &[M]) -> String {
    meanings
        .iter()
        .map(|m| format!("{}: {}", m.part_of_speech(), m.definitions().join("; ")))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_etymology(etymology: &Etymology) -> String {
    let roots = etymology
        .roots
        .iter()
        .map(|r| format!("{} ({})", r.root, r.meaning))
        .collect::<Vec<_>>()
        .join("; ");
    format!("Origin: {}. Roots: {}", etymology.origin, roots)
}

/// 导出为 CSV，只有包含逗号、引号或换行的字段才加引号
pub fn export_words_to_csv(words: &[Word]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for word in words {
        writer.write_record([
            word.word.clone(),
            word.phonetic.clone(),
            word.part_of_speech.join("; "),
            format_meanings(&word.chinese_meaning),
            format_meanings(&word.english_meaning),
            format_etymology(&word.etymology),
            word.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            word.review_count.to_string(),
            word.mastery.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV 写入失败: {}", e))?;
    let mut content = String::from_utf8(bytes)?;
    // 最后一行不带换行
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

/// 导出为带缩进的 JSON
pub fn export_words_to_json(words: &[Word]) -> Result<String> {
    Ok(serde_json::to_string_pretty(words)?)
}

/// 文件名格式：words-export-YYYY-MM-DD.{csv|json}
pub fn generate_export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("words-export-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// 写出导出文件，返回文件路径
pub fn write_export(words: &[Word], format: ExportFormat, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("无法创建导出目录 {}: {}", dir.display(), e))?;

    let content = match format {
        ExportFormat::Csv => export_words_to_csv(words)?,
        ExportFormat::Json => export_words_to_json(words)?,
    };

    let filename = generate_export_filename(format, chrono::Local::now().date_naive());
    let path = dir.join(filename);
    std::fs::write(&path, content)
        .map_err(|e| anyhow::anyhow!("无法写入导出文件 {}: {}", path.display(), e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordRoot;
    use chrono::{TimeZone, Utc};

    fn sample_word() -> Word {
        Word {
            id: 1,
            word: "ephemeral".to_string(),
            phonetic: "/ɪˈfemərəl/".to_string(),
            audio_url: None,
            part_of_speech: vec!["adjective".to_string()],
            chinese_meaning: vec![ChineseMeaning {
                part_of_speech: "adj.".to_string(),
                definitions: vec!["短暂的".to_string(), "瞬息的".to_string()],
                examples: vec![],
            }],
            english_meaning: vec![EnglishMeaning {
                part_of_speech: "adjective".to_string(),
                definitions: vec![
                    "Lasting for a very short time".to_string(),
                    "Transitory, fleeting".to_string(),
                ],
                ..Default::default()
            }],
            etymology: Etymology {
                roots: vec![
                    WordRoot {
                        root: "epi".to_string(),
                        meaning: "upon".to_string(),
                        language: "Greek".to_string(),
                    },
                    WordRoot {
                        root: "hemera".to_string(),
                        meaning: "day".to_string(),
                        language: "Greek".to_string(),
                    },
                ],
                origin: "From Greek ephemeros \"lasting only a day\"".to_string(),
                ..Default::default()
            },
            word_forms: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            last_reviewed: None,
            review_count: 3,
            mastery: 15,
        }
    }

    #[test]
    fn test_csv_export() {
        let csv = export_words_to_csv(&[sample_word()]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Word,Phonetic,Part of Speech,Chinese Meaning,English Meaning,Etymology,Created At,Review Count,Mastery (%)"
        );
        assert!(lines[1].starts_with("ephemeral,/ɪˈfemərəl/,adjective,adj.: 短暂的; 瞬息的,"));
        // 含逗号的字段加引号
        assert!(lines[1].contains("\"adjective: Lasting for a very short time; Transitory, fleeting\""));
        // 引号被转义
        assert!(lines[1].contains(
            "\"Origin: From Greek ephemeros \"\"lasting only a day\"\". Roots: epi (upon); hemera (day)\""
        ));
        assert!(lines[1].ends_with(",2024-01-02T03:04:05.000Z,3,15"));
    }

    #[test]
    fn test_csv_export_empty_list_has_header_only() {
        let csv = export_words_to_csv(&[]).unwrap();
        assert!(csv.starts_with("Word,Phonetic"));
        assert!(!csv.contains('\n'));
    }

    #[test]
    fn test_json_export() {
        let json = export_words_to_json(&[sample_word()]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 1,"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["word"], "ephemeral");
        assert_eq!(value[0]["reviewCount"], 3);
        assert_eq!(value[0]["etymology"]["roots"][1]["root"], "hemera");
    }

    #[test]
    fn test_generate_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            generate_export_filename(ExportFormat::Csv, date),
            "words-export-2024-03-07.csv"
        );
        assert_eq!(
            generate_export_filename(ExportFormat::Json, date),
            "words-export-2024-03-07.json"
        );
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(&[sample_word()], ExportFormat::Json, dir.path().join("out")).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"ephemeral\""));
        assert!(path.file_name().unwrap().to_string_lossy().ends_with(".json"));
    }
}
