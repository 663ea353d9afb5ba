use crate::config::GeminiConfig;
use crate::error::{ClientError, TranslationError};
use crate::model::NameTranslation;
use crate::services::ai_types::{
    name_translation_schema, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part,
};

use reqwest::blocking::Client;
use tracing::{debug, error};

use std::time::Duration;

/// Converts a foreign name into its Korean spelling.
///
/// Implementations receive an already trimmed, non-empty name.
pub trait Translator: Send + Sync {
    fn translate(&self, name: &str) -> Result<NameTranslation, TranslationError>;
}

/// Client for the Gemini `generateContent` endpoint with structured output.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(cfg.request_timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self::with_http_client(http, cfg))
    }

    pub fn with_http_client(http: Client, cfg: &GeminiConfig) -> Self {
        Self {
            http,
            endpoint: endpoint_for(&cfg.base_url, &cfg.model),
            api_key: cfg.api_key.clone(),
            temperature: cfg.temperature,
        }
    }

    fn request(&self, name: &str) -> Result<NameTranslation, ClientError> {
        let body = build_request(name, self.temperature);

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();

        // Read as text first so an error body is not lost to a JSON failure.
        let text = resp.text()?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        parse_response(&text)
    }
}

impl Translator for GeminiClient {
    fn translate(&self, name: &str) -> Result<NameTranslation, TranslationError> {
        debug!(input = name, "requesting name conversion");

        self.request(name).map_err(|cause| {
            error!(input = name, error = %cause, "name conversion failed");
            TranslationError::new()
        })
    }
}

fn endpoint_for(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

pub fn build_prompt(name: &str) -> String {
    let mut p = String::new();

    p.push_str(&format!(
        "Translate the foreign name \"{name}\" into natural Korean (Hangul).\n"
    ));
    p.push_str(
        "If there are several ways to write it, choose the most standard or popular transliteration used in Korea.\n",
    );
    p.push_str(
        "Answer in JSON with the Hangul spelling, its Revised Romanization, a brief description or meaning written in Korean, and the name's linguistic origin.",
    );

    p
}

pub fn build_request(name: &str, temperature: f32) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: build_prompt(name),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: name_translation_schema(),
            temperature,
        },
    }
}

/// Parse a `generateContent` response body into a complete [`NameTranslation`].
pub fn parse_response(body: &str) -> Result<NameTranslation, ClientError> {
    let resp: GenerateContentResponse = serde_json::from_str(body)?;

    let text = resp.text();
    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    let parsed: NameTranslation = serde_json::from_str(text)?;
    parsed.validated()
}

fn extract_error_message(body_text: &str) -> String {
    // { "error": { "message": "..." } } or { "message": "..." }
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.chars().count() > 400 {
        let head: String = trimmed.chars().take(400).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TRANSLATION_FAILED_MESSAGE;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn gemini_body(inner: &str) -> String {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": inner } ] } }
            ]
        })
        .to_string()
    }

    const MICHAEL: &str = r#"{"hangul":"마이클","romanization":"Maikeul","meaning":"'누가 하나님과 같으랴'라는 뜻의 히브리어 이름","origin":"English"}"#;

    #[test]
    fn request_carries_schema_and_temperature() {
        let v = serde_json::to_value(build_request("Michael", 0.3)).unwrap();

        let prompt = v["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"Michael\""));

        let cfg = &v["generationConfig"];
        assert_eq!(cfg["responseMimeType"], "application/json");
        assert!((cfg["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(
            cfg["responseSchema"]["required"],
            json!(["hangul", "romanization", "meaning", "origin"])
        );
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        assert_eq!(
            endpoint_for("https://example.test/v1beta/", "gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn parses_complete_response() {
        let t = parse_response(&gemini_body(MICHAEL)).unwrap();
        assert_eq!(t.hangul, "마이클");
        assert_eq!(t.romanization, "Maikeul");
        assert_eq!(t.origin, "English");
    }

    #[test]
    fn joins_split_parts() {
        let split = MICHAEL.find("\"romanization\"").unwrap();
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": &MICHAEL[..split] },
                { "text": &MICHAEL[split..] }
            ] } }]
        })
        .to_string();
        assert_eq!(parse_response(&body).unwrap().hangul, "마이클");
    }

    #[test]
    fn missing_field_is_a_schema_error() {
        let inner = r#"{"hangul":"마이클","romanization":"Maikeul","meaning":"..."}"#;
        let err = parse_response(&gemini_body(inner)).unwrap_err();
        assert!(matches!(err, ClientError::Schema(_)));
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = parse_response(&gemini_body("  ")).unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse));

        let err = parse_response(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse));
    }

    #[test]
    fn blank_field_is_rejected() {
        let inner = r#"{"hangul":"","romanization":"Maikeul","meaning":"...","origin":"English"}"#;
        let err = parse_response(&gemini_body(inner)).unwrap_err();
        assert!(matches!(err, ClientError::BlankField("hangul")));
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(extract_error_message(body), "API key not valid");
        assert_eq!(extract_error_message("  gateway down "), "gateway down");
    }

    /// Serves one canned HTTP response on a loopback port and hands back the
    /// raw request it received.
    fn serve_once(status_line: &'static str, body: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= pos + 4 + len {
                        break;
                    }
                }
            }

            let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());

            let resp = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    fn client_for(base_url: String) -> GeminiClient {
        let cfg = GeminiConfig {
            api_key: "test-key".into(),
            base_url,
            ..GeminiConfig::default()
        };
        let http = Client::builder().no_proxy().build().unwrap();
        GeminiClient::with_http_client(http, &cfg)
    }

    #[test]
    fn translates_over_http() {
        let (base, requests) = serve_once("HTTP/1.1 200 OK", gemini_body(MICHAEL));
        let client = client_for(base);

        let t = client.translate("Michael").unwrap();
        assert_eq!(t.hangul, "마이클");

        let raw = requests.recv().unwrap();
        assert!(raw.starts_with("POST /models/gemini-2.5-flash:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains("Michael"));
    }

    #[test]
    fn http_failure_collapses_to_fixed_message() {
        let body = json!({ "error": { "message": "quota exceeded" } }).to_string();
        let (base, _requests) = serve_once("HTTP/1.1 429 Too Many Requests", body);
        let client = client_for(base);

        let err = client.translate("Michael").unwrap_err();
        assert_eq!(err.to_string(), TRANSLATION_FAILED_MESSAGE);
        assert!(!err.to_string().contains("quota"));
    }
}
