use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::Config;
use crate::database::DatabaseManager;
use crate::export::{ExportFormat, write_export};
use crate::models::*;

/// 单词本统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStats {
    pub total: i64,
    pub mastered: usize,
}

pub struct WordBook {
    api_client: ApiClient,
    db_manager: DatabaseManager,
    pub config: Config,
}

impl WordBook {
    pub async fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::new(config.clone())?;
        let db_manager = DatabaseManager::new(&config).await?;

        let seeded = db_manager.seed_default_words().await?;
        if seeded > 0 {
            println!("✨ 已写入 {} 个示例单词", seeded);
        }

        Ok(WordBook {
            api_client,
            db_manager,
            config,
        })
    }

    /// 只查询，不保存
    pub async fn preview_word(&self, text: &str) -> Result<WordData> {
        let word = normalize(text)?;
        self.api_client
            .fetch_word_data(&word)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Word not found in dictionary"))
    }

    /// 查询词典、翻译释义并保存
    pub async fn add_word(&self, text: &str) -> Result<Word> {
        let word = normalize(text)?;

        if self.db_manager.word_exists(&word).await? {
            anyhow::bail!("Word already exists");
        }

        println!("🔍 查询词典: {}", word);
        let word_data = self
            .api_client
            .fetch_word_data(&word)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Word not found in dictionary"))?;

        // 词典可能返回另一个词头（如复数查到单数），按词头再查一次重
        let headword = word_data.word.to_lowercase();
        if headword != word && self.db_manager.word_exists(&headword).await? {
            anyhow::bail!("Word already exists");
        }

        println!(
            "🌐 翻译 {} 个词性的释义...",
            word_data.english_meanings.len()
        );
        let chinese_meaning = self
            .api_client
            .generate_chinese_meanings(&word_data.english_meanings)
            .await;

        let new_word = build_new_word(word_data, chinese_meaning);
        let saved = self.db_manager.insert_word(&new_word).await?;

        println!("💾 已保存: {} (ID {})", saved.word, saved.id);
        Ok(saved)
    }

    pub async fn get_word(&self, id: i64) -> Result<Option<Word>> {
        self.db_manager.get_word_by_id(id).await
    }

    pub async fn list_words(&self) -> Result<Vec<Word>> {
        self.db_manager.get_all_words().await
    }

    pub async fn recent_words(&self) -> Result<Vec<Word>> {
        self.db_manager.get_recent_words().await
    }

    pub async fn mastered_words(&self) -> Result<Vec<Word>> {
        self.db_manager.get_mastered_words().await
    }

    pub async fn review_word(&self, id: i64) -> Result<Word> {
        self.db_manager
            .increment_review(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("未找到ID为 {} 的单词", id))
    }

    pub async fn set_mastery(&self, id: i64, mastery: u8) -> Result<Word> {
        let update = WordUpdate {
            mastery: Some(mastery),
            ..Default::default()
        };
        self.db_manager
            .update_word(id, update)
            .await?
            .ok_or_else(|| anyhow::anyhow!("未找到ID为 {} 的单词", id))
    }

    pub async fn delete_word(&self, id: i64) -> Result<bool> {
        self.db_manager.delete_word(id).await
    }

    pub async fn export(&self, format: ExportFormat, dir: Option<PathBuf>) -> Result<PathBuf> {
        let words = self.db_manager.get_all_words().await?;
        let dir = dir.unwrap_or_else(|| PathBuf::from(&self.config.output.export_dir));
        let path = write_export(&words, format, dir)?;
        println!("✅ 已导出 {} 个单词：{}", words.len(), path.display());
        Ok(path)
    }

    pub async fn stats(&self) -> Result<WordStats> {
        Ok(WordStats {
            total: self.db_manager.count_words().await?,
            mastered: self.db_manager.get_mastered_words().await?.len(),
        })
    }
}

fn normalize(text: &str) -> Result<String> {
    let word = text.trim().to_lowercase();
    if word.is_empty() {
        anyhow::bail!("请输入要查询的单词");
    }
    Ok(word)
}

/// 由词典结果和中文释义组装待保存的单词
pub fn build_new_word(word_data: WordData, chinese_meaning: Vec<ChineseMeaning>) -> NewWord {
    NewWord {
        word: word_data.word.to_lowercase(),
        phonetic: word_data.phonetic,
        audio_url: word_data.audio_url,
        part_of_speech: word_data.part_of_speech,
        chinese_meaning,
        english_meaning: word_data.english_meanings,
        etymology: Etymology {
            origin: word_data.origin.unwrap_or_default(),
            generated_at: Utc::now().to_rfc3339(),
            ..Default::default()
        },
        word_forms: word_data.word_forms,
    }
}
