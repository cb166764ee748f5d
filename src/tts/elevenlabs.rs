//! ElevenLabs cloud text-to-speech backend.
//!
//! Requests raw PCM (`output_format=pcm_<rate>`) so clips can be joined
//! without a lossy codec round-trip.

use crate::audio::AudioBuffer;
use crate::config::ElevenLabsConfig;
use crate::defaults;
use crate::error::{InterviewTtsError, Result};
use crate::tts::synthesizer::Synthesizer;
use serde::Serialize;

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// PCM sample rates the API can return.
pub const SUPPORTED_SAMPLE_RATES: [u32; 6] = [8000, 16000, 22050, 24000, 44100, 48000];

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    sample_rate: u32,
}

impl ElevenLabsSynthesizer {
    /// Create a synthesizer from config.
    ///
    /// # Errors
    /// `MissingApiKey` if no key is configured, `ConfigInvalidValue` for an
    /// unsupported sample rate.
    pub fn new(config: &ElevenLabsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| InterviewTtsError::MissingApiKey {
                backend: "ElevenLabs".to_string(),
                env_var: defaults::API_KEY_ENV.to_string(),
            })?;

        if !SUPPORTED_SAMPLE_RATES.contains(&config.sample_rate) {
            return Err(InterviewTtsError::ConfigInvalidValue {
                key: "elevenlabs.sample_rate".to_string(),
                message: format!(
                    "{} is not one of {:?}",
                    config.sample_rate, SUPPORTED_SAMPLE_RATES
                ),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sample_rate: config.sample_rate,
        })
    }

    fn endpoint(&self, voice: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}?output_format=pcm_{}",
            self.base_url, voice, self.sample_rate
        )
    }
}

/// Pull the human-readable message out of an API error body.
///
/// Errors come back as `{"detail": {"status": "...", "message": "..."}}` or
/// `{"detail": "..."}`; anything else is returned trimmed.
fn error_detail(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(|v| v.get("detail"));
    match detail {
        Some(serde_json::Value::String(msg)) => msg.clone(),
        Some(d) => d
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| d.to_string()),
        None => body.trim().to_string(),
    }
}

#[async_trait::async_trait]
impl Synthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer> {
        let response = self
            .client
            .post(self.endpoint(voice))
            .header(XI_API_KEY_HEADER, &self.api_key)
            .json(&TtsRequest {
                text,
                model_id: &self.model,
            })
            .send()
            .await
            .map_err(|e| InterviewTtsError::Synthesis {
                message: format!("ElevenLabs request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InterviewTtsError::Synthesis {
                message: format!("ElevenLabs returned status {status}: {}", error_detail(&body)),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InterviewTtsError::Synthesis {
                message: format!("Failed to read ElevenLabs audio: {e}"),
            })?;

        Ok(AudioBuffer::from_pcm_le_bytes(&bytes, self.sample_rate))
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config_with_key(base_url: &str) -> ElevenLabsConfig {
        ElevenLabsConfig {
            api_key: Some("test-key".to_string()),
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Serve exactly one HTTP response and hand back the raw request text.
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let header = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let config = ElevenLabsConfig {
            api_key: None,
            ..Default::default()
        };
        match ElevenLabsSynthesizer::new(&config) {
            Err(InterviewTtsError::MissingApiKey { env_var, .. }) => {
                assert_eq!(env_var, "ELEVENLABS_API_KEY");
            }
            Err(e) => panic!("Expected MissingApiKey, got {e}"),
            Ok(_) => panic!("Expected MissingApiKey, got Ok"),
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = ElevenLabsConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(ElevenLabsSynthesizer::new(&config).is_err());
    }

    #[test]
    fn unsupported_sample_rate_is_rejected() {
        let config = ElevenLabsConfig {
            sample_rate: 12345,
            ..config_with_key("http://localhost")
        };
        assert!(matches!(
            ElevenLabsSynthesizer::new(&config),
            Err(InterviewTtsError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn endpoint_includes_voice_and_format() {
        let synth = ElevenLabsSynthesizer::new(&config_with_key("https://api.example.com/")).unwrap();
        assert_eq!(
            synth.endpoint("voice123"),
            "https://api.example.com/v1/text-to-speech/voice123?output_format=pcm_24000"
        );
        assert_eq!(synth.sample_rate(), 24000);
        assert_eq!(synth.name(), "elevenlabs");
    }

    #[test]
    fn higher_rate_is_opt_in() {
        let config = ElevenLabsConfig {
            sample_rate: 44100,
            ..config_with_key("https://api.example.com")
        };
        let synth = ElevenLabsSynthesizer::new(&config).unwrap();
        assert!(synth.endpoint("v").ends_with("?output_format=pcm_44100"));
    }

    #[test]
    fn error_detail_shapes() {
        assert_eq!(error_detail(r#"{"detail":"invalid key"}"#), "invalid key");
        assert_eq!(
            error_detail(r#"{"detail":{"status":"voice_not_found","message":"Voice not found"}}"#),
            "Voice not found"
        );
        assert_eq!(error_detail("  Bad Gateway\n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn synthesize_decodes_pcm_response() {
        let (base_url, server) = serve_once("200 OK", vec![0x01, 0x00, 0xff, 0xff]).await;
        let synth = ElevenLabsSynthesizer::new(&config_with_key(&base_url)).unwrap();

        let audio = synth.synthesize("Hello there.", "voice-a").await.unwrap();
        assert_eq!(audio.samples(), &[1, -1]);
        assert_eq!(audio.sample_rate(), 24000);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/text-to-speech/voice-a?output_format=pcm_24000 "));
        assert!(request.to_lowercase().contains("xi-api-key: test-key"));
        assert!(request.contains(r#""text":"Hello there.""#));
        assert!(request.contains(r#""model_id":"eleven_turbo_v2_5""#));
    }

    #[tokio::test]
    async fn synthesize_reports_http_errors() {
        let (base_url, server) =
            serve_once("401 Unauthorized", br#"{"detail":"invalid key"}"#.to_vec()).await;
        let synth = ElevenLabsSynthesizer::new(&config_with_key(&base_url)).unwrap();

        match synth.synthesize("Hi", "v").await {
            Err(InterviewTtsError::Synthesis { message }) => {
                assert!(message.contains("401"), "{message}");
                assert!(message.contains("invalid key"), "{message}");
            }
            other => panic!("Expected Synthesis error, got {:?}", other.map(|a| a.len())),
        }
        server.await.unwrap();
    }
}
