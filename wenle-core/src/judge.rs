//! AI curiosity judge.
//!
//! Wraps the Gemini client to score a submitted question: builds the judging
//! prompt, strips code fences from the reply, and validates the JSON verdict.
//! Every failure mode degrades into a fixed low-score rating, so [`rate`]
//! never surfaces an error to the caller.
//!
//! [`rate`]: CuriosityJudge::rate

use gemini::{Gemini, Message, Request};
use serde::Deserialize;
use thiserror::Error;

/// Score assigned when the generation call or verdict parse fails.
pub const DEGRADED_SCORE: u8 = 10;

const DEGRADED_COMMENT: &str = "AI 脑子卡住了...";
const MISSING_ANSWER: &str = "AI 正在思考更深层的问题，暂时无法回答。";

/// The judge's verdict on a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    /// Question quality in `[1, 100]`. The degraded path uses [`DEGRADED_SCORE`].
    pub score: u8,

    /// Short evaluative remark, always present.
    pub comment: String,

    /// Longer answer to the question itself. `None` only on the degraded
    /// path; consumers treat that as "unavailable", not as a defect.
    pub answer: Option<String>,
}

impl Rating {
    /// The fixed fallback rating, carrying the failure reason in its comment.
    pub fn degraded(reason: impl std::fmt::Display) -> Self {
        Self {
            score: DEGRADED_SCORE,
            comment: format!("{DEGRADED_COMMENT} ({reason})"),
            answer: None,
        }
    }
}

/// Internal failure modes; all of them collapse into a degraded rating.
#[derive(Debug, Error)]
enum JudgeError {
    #[error("Gemini API error: {0}")]
    Api(#[from] gemini::Error),

    #[error("Malformed verdict: {0}")]
    Verdict(String),
}

/// Configuration for the curiosity judge.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// The model to use (defaults to the client's default).
    pub model: Option<String>,

    /// Temperature for generation.
    pub temperature: Option<f32>,

    /// Maximum tokens for the verdict.
    pub max_output_tokens: Option<usize>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: Some(0.8),
            max_output_tokens: Some(1024),
        }
    }
}

/// The AI judge that scores questions.
pub struct CuriosityJudge {
    client: Gemini,
    config: JudgeConfig,
}

impl CuriosityJudge {
    /// Create a new judge with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Gemini::new(api_key),
            config: JudgeConfig::default(),
        }
    }

    /// Create a judge from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, gemini::Error> {
        Ok(Self {
            client: Gemini::from_env()?,
            config: JudgeConfig::default(),
        })
    }

    /// Configure the judge.
    pub fn with_config(mut self, config: JudgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Score a question.
    ///
    /// Always returns a well-formed [`Rating`]: any transport, API, or parse
    /// failure yields the degraded fallback instead of an error. There is no
    /// retry; the caller decides whether to resubmit.
    pub async fn rate(&self, question: &str) -> Rating {
        match self.try_rate(question).await {
            Ok(rating) => rating,
            Err(e) => Rating::degraded(e),
        }
    }

    async fn try_rate(&self, question: &str) -> Result<Rating, JudgeError> {
        let mut request = Request::new(vec![Message::user(build_prompt(question))]);

        if let Some(ref model) = self.config.model {
            request = request.with_model(model);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_output_tokens) = self.config.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }

        let response = self.client.complete(request).await?;
        parse_verdict(&response.text())
    }
}

/// Expected shape of the model's JSON reply.
#[derive(Debug, Deserialize)]
struct Verdict {
    score: i64,
    comment: String,
    #[serde(default)]
    answer: Option<String>,
}

fn build_prompt(question: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(include_str!("prompts/judge_rubric.txt"));
    prompt.push_str("\nRate this question: \"");
    prompt.push_str(question);
    prompt.push_str("\"\n");
    prompt
}

/// Parse the cleaned reply into a rating.
///
/// A missing `score` or `comment`, or a type mismatch, is a parse failure;
/// a missing `answer` gets the fixed placeholder. Out-of-range scores are
/// clamped into `[1, 100]` so downstream health math stays bounded.
fn parse_verdict(raw: &str) -> Result<Rating, JudgeError> {
    let cleaned = strip_code_fences(raw);
    let verdict: Verdict =
        serde_json::from_str(cleaned).map_err(|e| JudgeError::Verdict(e.to_string()))?;

    Ok(Rating {
        score: verdict.score.clamp(1, 100) as u8,
        comment: verdict.comment,
        answer: Some(verdict.answer.unwrap_or_else(|| MISSING_ANSWER.to_string())),
    })
}

/// Strip a Markdown code fence the model may have wrapped around the JSON.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_embeds_question() {
        let prompt = build_prompt("为什么猫会发出呼噜声?");
        assert!(prompt.contains("Curiosity Judge"));
        assert!(prompt.contains("\"为什么猫会发出呼噜声?\""));
        assert!(prompt.contains("Return JSON ONLY"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json {\"a\":1} ```  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_verdict_full() {
        let rating =
            parse_verdict(r#"{"score": 87, "comment": "妙啊", "answer": "因为……"}"#).unwrap();

        assert_eq!(rating.score, 87);
        assert_eq!(rating.comment, "妙啊");
        assert_eq!(rating.answer.as_deref(), Some("因为……"));
    }

    #[test]
    fn test_parse_verdict_fenced() {
        let raw = "```json\n{\"score\": 42, \"comment\": \"还行\", \"answer\": \"嗯\"}\n```";
        let rating = parse_verdict(raw).unwrap();
        assert_eq!(rating.score, 42);
    }

    #[test]
    fn test_parse_verdict_missing_answer_gets_placeholder() {
        let rating = parse_verdict(r#"{"score": 60, "comment": "可以"}"#).unwrap();
        assert_eq!(rating.answer.as_deref(), Some(MISSING_ANSWER));
    }

    #[test]
    fn test_parse_verdict_missing_score_fails() {
        assert!(parse_verdict(r#"{"comment": "缺分数"}"#).is_err());
    }

    #[test]
    fn test_parse_verdict_wrong_type_fails() {
        assert!(parse_verdict(r#"{"score": "high", "comment": "类型不对"}"#).is_err());
    }

    #[test]
    fn test_parse_verdict_not_json_fails() {
        assert!(parse_verdict("I'd rate this 80 out of 100.").is_err());
    }

    #[test]
    fn test_parse_verdict_clamps_out_of_range() {
        let rating = parse_verdict(r#"{"score": 250, "comment": "过誉"}"#).unwrap();
        assert_eq!(rating.score, 100);

        let rating = parse_verdict(r#"{"score": 0, "comment": "过低"}"#).unwrap();
        assert_eq!(rating.score, 1);
    }

    #[test]
    fn test_degraded_rating() {
        let rating = Rating::degraded("Network error: timeout");

        assert_eq!(rating.score, DEGRADED_SCORE);
        assert!(rating.comment.contains("AI 脑子卡住了"));
        assert!(rating.comment.contains("timeout"));
        assert!(rating.answer.is_none());
    }
}
