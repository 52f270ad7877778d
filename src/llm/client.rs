//! Completion API client with bounded retry and exponential backoff

use crate::config::LlmConfig;
use crate::error::{Result, ScreenerError};
use log::{debug, error, info, warn};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Anything that can turn a prompt into text.
///
/// Implementations never fail: an exhausted or unusable remote call yields an
/// empty string, which callers treat as "unavailable".
pub trait TextGenerator {
    fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_retries: u32,
    ) -> impl Future<Output = String> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScreenerError::Network(format!("Failed to build HTTP client: {}", e)))?;

        info!("Initialized completion client, model: {}", config.model);

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single request to the endpoint, returning the raw message content
    async fn complete_once(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ScreenerError::Network(format!("API returned {}: {}", status, message)));
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

impl TextGenerator for CompletionClient {
    async fn generate(&self, prompt: &str, temperature: f32, max_retries: u32) -> String {
        let attempts = max_retries.max(1);

        for attempt in 0..attempts {
            debug!("Sending completion request, attempt {}/{}", attempt + 1, attempts);

            match self.complete_once(prompt, temperature).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!("Received an empty response from the completion API"),
                Err(e) => warn!("Completion request failed: {}", e),
            }

            // The wait also follows the final attempt
            let jitter = rand::thread_rng().gen_range(0.0..1.0);
            let wait = backoff_delay(attempt, jitter);
            info!("Waiting {:.2} seconds before the next attempt", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }

        error!("No response from the completion API after {} attempts", attempts);
        String::new()
    }
}

/// Backoff before retrying after attempt `attempt` (0-indexed): `2^attempt + jitter` seconds
pub fn backoff_delay(attempt: u32, jitter: f64) -> Duration {
    let base = 2f64.powi(attempt.min(16) as i32);
    Duration::from_secs_f64(base + jitter.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Read one HTTP request, headers and body, off the socket
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let line = line.to_ascii_lowercase();
                        line.strip_prefix("content-length:").and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    /// Local endpoint answering the n-th request with the n-th `(status, body)`,
    /// repeating the last one. Returns the base URL and a request counter.
    async fn canned_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                read_request(&mut socket).await;
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];
                let reply = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (base, hits)
    }

    fn local_client(base: &str) -> CompletionClient {
        let mut config = crate::config::Config::default().llm;
        config.api_base = base.to_string();
        config.timeout_secs = 10;
        CompletionClient::new(&config, "key".to_string()).unwrap()
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        assert_eq!(backoff_delay(0, 0.0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1, 0.0), Duration::from_secs(2));
        assert_eq!(backoff_delay(2, 0.0), Duration::from_secs(4));
        assert_eq!(backoff_delay(1, 0.5), Duration::from_millis(2500));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut config = crate::config::Config::default().llm;
        config.api_base = "http://localhost:9000/v1/".to_string();

        let client = CompletionClient::new(&config, "key".to_string()).unwrap();
        assert_eq!(client.endpoint, "http://localhost:9000/v1/chat/completions");
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_response_content_extraction() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  hello  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("  hello  "));

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_endpoint_degrades_to_empty_text() {
        let mut config = crate::config::Config::default().llm;
        // Nothing listens on port 9 locally; every attempt fails fast
        config.api_base = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 1;

        let client = CompletionClient::new(&config, "key".to_string()).unwrap();
        let text = client.generate("prompt", 0.5, 2).await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_retried_and_text_trimmed() {
        let (base, hits) = canned_server(vec![
            (500, r#"{"error":{"message":"overloaded"}}"#),
            (200, r#"{"choices":[{"message":{"content":"  hi  "}}]}"#),
        ])
        .await;
        let client = local_client(&base);

        let started = Instant::now();
        let text = client.generate("prompt", 0.5, 3).await;
        let elapsed = started.elapsed();

        assert_eq!(text, "hi");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        // One backoff of 1s plus jitter, none after the success
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_empty_responses_exhaust_attempts() {
        let (base, hits) = canned_server(vec![(200, r#"{"choices":[]}"#)]).await;
        let client = local_client(&base);

        let started = Instant::now();
        let text = client.generate("prompt", 0.5, 2).await;
        let elapsed = started.elapsed();

        assert!(text.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        // Backoff of 1s and 2s, the second one after the final attempt
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(6));
    }
}
