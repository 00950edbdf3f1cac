use anyhow::Result;
use futures::stream::{self, StreamExt};
use reqwest::{Client, ClientBuilder, Response, StatusCode, Url};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::dictionary::extract_word_data;
use crate::models::{ChineseMeaning, DictionaryEntry, EnglishMeaning, TranslationResponse, WordData};

// 单次翻译的最大字符数
const MAX_TRANSLATION_CHARS: usize = 500;

pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.processing.request_timeout_seconds))
            .build()?;

        Ok(ApiClient { client, config })
    }

    // 带重试机制的 GET 请求：网络错误和 5xx 会重试，其他状态码直接返回
    // 最后一次仍是 5xx 时把响应交回调用方处理状态码
    async fn get_with_retry(&self, url: Url) -> Result<Response> {
        let max_retries = self.config.processing.max_retries;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.config.processing.request_delay_ms * (attempt as u64 + 1),
                );
                println!(
                    "    ⏳ 重试 {}/{} 次，等待 {:?}...",
                    attempt, max_retries, delay
                );
                sleep(delay).await;
            }

            match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_server_error() && attempt < max_retries => {
                    let error_msg = format!("服务器错误 (状态码: {})", response.status());
                    log::warn!("尝试 {}: {}", attempt + 1, error_msg);
                    last_error = Some(anyhow::anyhow!(error_msg));
                }
                Ok(response) => {
                    if attempt > 0 && response.status().is_success() {
                        println!("    ✅ 重试成功！");
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let error_msg = format!("网络请求失败: {}", e);
                    log::warn!("尝试 {}: {}", attempt + 1, error_msg);
                    last_error = Some(anyhow::anyhow!(error_msg));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("所有重试都失败了")))
    }

    pub(crate) fn dictionary_url(&self, word: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.api.dictionary_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("无效的词典 API 地址: {}", self.config.api.dictionary_url))?
            .pop_if_empty()
            .push(&word.to_lowercase());
        Ok(url)
    }

    /// 查询 Free Dictionary API 的原始条目
    pub async fn fetch_entries(&self, word: &str) -> Result<Vec<DictionaryEntry>> {
        let url = self.dictionary_url(word)?;
        log::debug!("GET {}", url);

        let response = self.get_with_retry(url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("Word \"{}\" not found in dictionary", word);
        }
        if !status.is_success() {
            anyhow::bail!("Dictionary API error: {}", status.as_u16());
        }

        let entries: Vec<DictionaryEntry> = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("解析词典响应失败: {}", e))?;
        Ok(entries)
    }

    /// 查询单词并提取音标、词性、释义和词形
    pub async fn fetch_word_data(&self, word: &str) -> Result<Option<WordData>> {
        let entries = self.fetch_entries(word).await?;
        Ok(extract_word_data(&entries))
    }

    async fn try_translate(&self, text: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.config.api.translation_url)
            .query(&[("q", truncate_for_translation(text)), ("langpair", "en|zh-CN")])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Translation API error: {}", response.status().as_u16());
        }

        let data: TranslationResponse = response.json().await?;
        Ok(data.translated_text().map(str::to_string))
    }

    /// 英译中，失败时返回原文
    pub async fn translate_to_chinese(&self, text: &str) -> String {
        match self.try_translate(text).await {
            Ok(Some(translated)) => translated,
            Ok(None) => {
                log::warn!("没有可用的译文: {}", text);
                text.to_string()
            }
            Err(e) => {
                log::warn!("翻译失败: {}", e);
                text.to_string()
            }
        }
    }

    /// 逐条翻译，请求之间固定延迟以避免触发限流
    pub async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
        let delay = Duration::from_millis(self.config.processing.translation_delay_ms);
        let mut results = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                results.push(String::new());
                continue;
            }

            results.push(self.translate_to_chinese(text).await);

            if i + 1 < texts.len() && !delay.is_zero() {
                sleep(delay).await;
            }
        }

        results
    }

    /// 根据英文释义生成中文释义（每个词性取前几条释义和例句）
    pub async fn generate_chinese_meanings(
        &self,
        english_meanings: &[EnglishMeaning],
    ) -> Vec<ChineseMeaning> {
        let max_definitions = self.config.processing.max_definitions;
        let max_examples = self.config.processing.max_examples;

        stream::iter(english_meanings)
            .then(|meaning| async move {
                let definitions: Vec<String> = meaning
                    .definitions
                    .iter()
                    .take(max_definitions)
                    .cloned()
                    .collect();
                let examples: Vec<String> =
                    meaning.examples.iter().take(max_examples).cloned().collect();

                let definitions = self.translate_batch(&definitions).await;
                let examples = self.translate_batch(&examples).await;

                ChineseMeaning {
                    part_of_speech: meaning.part_of_speech.clone(),
                    definitions: definitions.into_iter().filter(|d| !d.is_empty()).collect(),
                    examples: examples.into_iter().filter(|e| !e.is_empty()).collect(),
                }
            })
            .collect()
            .await
    }
}

/// 超过长度限制的文本只翻译前 500 个字符
pub fn truncate_for_translation(text: &str) -> &str {
    match text.char_indices().nth(MAX_TRANSLATION_CHARS) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
