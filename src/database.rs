use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::defaults::default_words;
use crate::models::*;

const RECENT_LIMIT: i64 = 10;

const WORD_COLUMNS: &str = "id, word, phonetic, audio_url, part_of_speech, chinese_meaning, \
    english_meaning, etymology, word_forms, created_at, last_reviewed, review_count, mastery";

// 数据库行，列表和嵌套结构以 JSON 文本保存
#[derive(Debug, sqlx::FromRow)]
struct WordRow {
    id: i64,
    word: String,
    phonetic: String,
    audio_url: Option<String>,
    part_of_speech: String,
    chinese_meaning: String,
    english_meaning: String,
    etymology: String,
    word_forms: Option<String>,
    created_at: String,
    last_reviewed: Option<String>,
    review_count: i64,
    mastery: i64,
}

impl TryFrom<WordRow> for Word {
    type Error = anyhow::Error;

    fn try_from(row: WordRow) -> Result<Self> {
        let word_forms = match row.word_forms {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        };
        let last_reviewed = match row.last_reviewed {
            Some(ts) => Some(parse_timestamp(&ts)?),
            None => None,
        };

        Ok(Word {
            id: row.id,
            word: row.word,
            phonetic: row.phonetic,
            audio_url: row.audio_url,
            part_of_speech: serde_json::from_str(&row.part_of_speech)?,
            chinese_meaning: serde_json::from_str(&row.chinese_meaning)?,
            english_meaning: serde_json::from_str(&row.english_meaning)?,
            etymology: serde_json::from_str(&row.etymology)?,
            word_forms,
            created_at: parse_timestamp(&row.created_at)?,
            last_reviewed,
            review_count: row.review_count.max(0) as u32,
            mastery: row.mastery.clamp(0, 100) as u8,
        })
    }
}

fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(ts)
        .map_err(|e| anyhow::anyhow!("时间格式错误 {}: {}", ts, e))?;
    Ok(parsed.with_timezone(&Utc))
}

// 统一格式，保证按字符串排序即按时间排序
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(config: &Config) -> Result<Self> {
        // 创建数据库文件路径
        let db_path = std::env::current_dir()?.join(&config.database.db_file);
        let db_url = format!("sqlite:{}", db_path.display());

        log::info!("连接数据库: {}", db_path.display());

        // 如果数据库文件不存在，先创建一个空文件
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(&db_path)?;
            log::info!("创建新数据库文件: {}", db_path.display());
        }

        let pool = SqlitePool::connect(&db_url).await?;

        let manager = DatabaseManager { pool };
        manager.initialize_tables().await?;

        Ok(manager)
    }

    async fn initialize_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT NOT NULL UNIQUE,
                phonetic TEXT NOT NULL DEFAULT '',
                audio_url TEXT,
                part_of_speech TEXT NOT NULL DEFAULT '[]',
                chinese_meaning TEXT NOT NULL DEFAULT '[]',
                english_meaning TEXT NOT NULL DEFAULT '[]',
                etymology TEXT NOT NULL DEFAULT '{}',
                word_forms TEXT,
                created_at TEXT NOT NULL,
                last_reviewed TEXT,
                review_count INTEGER NOT NULL DEFAULT 0,
                mastery INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 首次使用时写入示例单词；之后即使单词被全部删除也不再写入
    pub async fn seed_default_words(&self) -> Result<usize> {
        let seeded: Option<(String,)> = sqlx::query_as("SELECT value FROM meta WHERE key = 'seeded'")
            .fetch_optional(&self.pool)
            .await?;
        if seeded.is_some() {
            return Ok(0);
        }

        let mut inserted = 0;
        if self.count_words().await? == 0 {
            for word in default_words()? {
                self.insert_word(&word).await?;
                inserted += 1;
            }
        }

        sqlx::query("INSERT OR REPLACE INTO meta (key, value) VALUES ('seeded', ?)")
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await?;

        Ok(inserted)
    }

    // 检查单词是否已存在
    pub async fn word_exists(&self, word: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM words WHERE word = ?")
            .bind(word.to_lowercase())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    pub async fn insert_word(&self, word: &NewWord) -> Result<Word> {
        let word_forms = match &word.word_forms {
            Some(forms) => Some(serde_json::to_string(forms)?),
            None => None,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO words (word, phonetic, audio_url, part_of_speech, chinese_meaning,
                english_meaning, etymology, word_forms, created_at, review_count, mastery)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
            "#,
        )
        .bind(word.word.to_lowercase())
        .bind(&word.phonetic)
        .bind(&word.audio_url)
        .bind(serde_json::to_string(&word.part_of_speech)?)
        .bind(serde_json::to_string(&word.chinese_meaning)?)
        .bind(serde_json::to_string(&word.english_meaning)?)
        .bind(serde_json::to_string(&word.etymology)?)
        .bind(word_forms)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        log::debug!("新增单词: {} (ID {})", word.word, id);

        self.get_word_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("单词 ID {} 写入后未找到", id))
    }

    // 根据ID获取单词信息
    pub async fn get_word_by_id(&self, id: i64) -> Result<Option<Word>> {
        let row = sqlx::query_as::<_, WordRow>(&format!(
            "SELECT {} FROM words WHERE id = ?",
            WORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Word::try_from).transpose()
    }

    /// 获取所有单词，最新添加的在前
    pub async fn get_all_words(&self) -> Result<Vec<Word>> {
        self.fetch_words("ORDER BY id DESC").await
    }

    /// 掌握度不低于 80 的单词
    pub async fn get_mastered_words(&self) -> Result<Vec<Word>> {
        self.fetch_words(&format!(
            "WHERE mastery >= {} ORDER BY id DESC",
            MASTERED_THRESHOLD
        ))
        .await
    }

    /// 按创建时间最近的 10 个单词
    pub async fn get_recent_words(&self) -> Result<Vec<Word>> {
        self.fetch_words(&format!(
            "ORDER BY created_at DESC, id DESC LIMIT {}",
            RECENT_LIMIT
        ))
        .await
    }

    async fn fetch_words(&self, clause: &str) -> Result<Vec<Word>> {
        let rows = sqlx::query_as::<_, WordRow>(&format!(
            "SELECT {} FROM words {}",
            WORD_COLUMNS, clause
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Word::try_from).collect()
    }

    pub async fn count_words(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM words")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// 删除单词，返回是否真的删除了记录
    pub async fn delete_word(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM words WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 部分更新，后写入的覆盖先写入的
    pub async fn update_word(&self, id: i64, update: WordUpdate) -> Result<Option<Word>> {
        let Some(mut word) = self.get_word_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(phonetic) = update.phonetic {
            word.phonetic = phonetic;
        }
        if let Some(audio_url) = update.audio_url {
            word.audio_url = Some(audio_url);
        }
        if let Some(part_of_speech) = update.part_of_speech {
            word.part_of_speech = part_of_speech;
        }
        if let Some(chinese_meaning) = update.chinese_meaning {
            word.chinese_meaning = chinese_meaning;
        }
        if let Some(etymology) = update.etymology {
            word.etymology = etymology;
        }
        if let Some(mastery) = update.mastery {
            word.mastery = mastery.min(100);
        }

        sqlx::query(
            r#"
            UPDATE words SET phonetic = ?, audio_url = ?, part_of_speech = ?,
                chinese_meaning = ?, etymology = ?, mastery = ?
            WHERE id = ?
            "#,
        )
        .bind(&word.phonetic)
        .bind(&word.audio_url)
        .bind(serde_json::to_string(&word.part_of_speech)?)
        .bind(serde_json::to_string(&word.chinese_meaning)?)
        .bind(serde_json::to_string(&word.etymology)?)
        .bind(word.mastery as i64)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(word))
    }

    /// 复习一次：次数 +1，记录时间，掌握度 +5（上限 100）
    pub async fn increment_review(&self, id: i64) -> Result<Option<Word>> {
        let result = sqlx::query(
            r#"
            UPDATE words SET review_count = review_count + 1,
                last_reviewed = ?,
                mastery = MIN(100, mastery + 5)
            WHERE id = ?
            "#,
        )
        .bind(format_timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_word_by_id(id).await
    }
}
