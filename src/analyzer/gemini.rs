//! Gemini API連携
//!
//! generateContent に要約プロンプトを送り、最初の候補のテキストを返す

use super::Summarizer;
use crate::config::Config;
use crate::error::{ProfCalcError, Result};
use profcalc_common::{build_summary_prompt, parse_summary_response};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Deserialize, Debug)]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProfCalcError::ApiCall(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            model: model.into(),
            endpoint: GEMINI_API_BASE.to_string(),
        })
    }

    /// APIキーが無くても作成できる（呼び出し時に MissingApiKey）
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key().ok(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }

    /// プロンプトを送信して生テキストを取得
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(ProfCalcError::MissingApiKey)?;

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig { temperature: 0.4 },
        };

        debug!("gemini request: model={}, prompt {} chars", self.model, prompt.len());

        let response = self
            .http
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProfCalcError::ApiCall(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            return Err(ProfCalcError::ApiCall(format!("HTTP {}: {}", status, preview)));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProfCalcError::ApiParse(e.without_url().to_string()))?;

        extract_text(payload)
    }
}

/// 最初の候補のテキストを連結して取り出す
pub fn extract_text(response: GeminiResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProfCalcError::ApiParse("aucun candidat dans la réponse".into()))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ProfCalcError::ApiParse("réponse vide".into()));
    }
    Ok(text)
}

impl Summarizer for GeminiClient {
    fn summarize(&self, points: &[f64]) -> impl Future<Output = Result<String>> + Send {
        let prompt = build_summary_prompt(points);
        async move {
            let text = self.generate(&prompt).await?;
            Ok(parse_summary_response(&text)?)
        }
    }
}
