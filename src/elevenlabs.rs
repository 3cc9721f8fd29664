//! Blocking ElevenLabs text-to-speech client.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::synth::{ApiKey, SpeechSynthesizer};
use crate::voice::SynthesisRequest;
use crate::{Error, Result};

/// Default API root.
pub const API_URL: &str = "https://api.elevenlabs.io/v1";

const API_KEY_HEADER: &str = "xi-api-key";

/// A synthesizer backed by the ElevenLabs HTTP API.
pub struct ElevenLabsClient {
    client: Client,
    api_key: ApiKey,
    api_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: ApiKey) -> Result<Self> {
        Self::with_api_url(api_key, API_URL)
    }

    /// Point the client at a different API root (a proxy or a local stub).
    pub fn with_api_url(api_key: ApiKey, api_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("quest-audio")
            .build()
            .map_err(|err| Error::msg(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!("{}/text-to-speech/{voice_id}", self.api_url)
    }
}

impl SpeechSynthesizer for ElevenLabsClient {
    fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(voice_id);
        let body = serde_json::to_vec(&SynthesisRequest::new(text))?;

        debug!(url = %url, chars = text.chars().count(), "requesting speech");

        let resp = self
            .client
            .post(&url)
            .header(ACCEPT, "audio/mpeg")
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.expose())
            .body(body)
            .send()
            .map_err(|err| Error::Transport(err.to_string()))?;

        read_audio(resp)
    }
}

fn read_audio(resp: Response) -> Result<Vec<u8>> {
    let status = resp.status();
    if status != StatusCode::OK {
        let message = resp.text().unwrap_or_default();
        return Err(api_error(status, message));
    }

    let bytes = resp
        .bytes()
        .map_err(|err| Error::Transport(err.to_string()))?;
    Ok(bytes.to_vec())
}

fn api_error(status: StatusCode, message: String) -> Error {
    let message = match message.trim() {
        "" => status.canonical_reason().unwrap_or("unknown error").to_owned(),
        trimmed => trimmed.to_owned(),
    };
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer a single HTTP request with `status` and `body`; the handle yields the raw request.
    fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let url = format!("http://{}/v1", listener.local_addr().expect("stub addr"));

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = stream.read(&mut buf).expect("read request");
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).expect("write head");
            stream.write_all(body).expect("write body");

            String::from_utf8(raw).expect("utf8 request")
        });

        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + content_length
    }

    fn key() -> ApiKey {
        ApiKey::from_lookup(|_| Some("sk-test".into())).expect("test key")
    }

    #[test]
    fn endpoint_includes_voice_id() -> anyhow::Result<()> {
        let client = ElevenLabsClient::new(key())?;
        assert_eq!(
            client.endpoint("nPczCjzI2devNBz1zQrb"),
            "https://api.elevenlabs.io/v1/text-to-speech/nPczCjzI2devNBz1zQrb"
        );

        let proxied = ElevenLabsClient::with_api_url(key(), "http://localhost:9000/v1/")?;
        assert_eq!(
            proxied.endpoint("abc"),
            "http://localhost:9000/v1/text-to-speech/abc"
        );
        Ok(())
    }

    #[test]
    fn api_error_keeps_status_and_body() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            "{\"detail\":\"invalid_api_key\"}\n".into(),
        );
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "{\"detail\":\"invalid_api_key\"}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_reason_phrase() {
        let err = api_error(StatusCode::TOO_MANY_REQUESTS, String::new());
        assert_eq!(
            err.to_string(),
            "synthesis failed with status 429: Too Many Requests"
        );
    }

    #[test]
    fn synthesize_posts_json_with_credentials() -> anyhow::Result<()> {
        let (url, stub) = serve_once("200 OK", b"ID3bytes");
        let client = ElevenLabsClient::with_api_url(key(), url)?;

        let audio = client.synthesize("Hello ... world", "VOICE")?;
        assert_eq!(audio, b"ID3bytes");

        let request = stub.join().expect("stub thread");
        let (head, body) = request.split_once("\r\n\r\n").expect("request head");
        let head = head.to_ascii_lowercase();

        assert!(head.starts_with("post /v1/text-to-speech/voice http/1.1"));
        assert!(head.contains("accept: audio/mpeg"));
        assert!(head.contains("content-type: application/json"));
        assert!(head.contains("xi-api-key: sk-test"));

        let body: serde_json::Value = serde_json::from_str(body)?;
        assert_eq!(
            body,
            serde_json::json!({
                "text": "Hello ... world",
                "model_id": "eleven_turbo_v2_5",
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75,
                    "style": 0.3,
                    "use_speaker_boost": true
                }
            })
        );
        Ok(())
    }

    #[test]
    fn synthesize_maps_rejection_to_api_error() -> anyhow::Result<()> {
        let (url, stub) = serve_once("401 Unauthorized", br#"{"detail":"bad key"}"#);
        let client = ElevenLabsClient::with_api_url(key(), url)?;

        let err = client.synthesize("Hello ... world", "VOICE").unwrap_err();
        stub.join().expect("stub thread");

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, r#"{"detail":"bad key"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn synthesize_reports_unreachable_service_as_transport() -> anyhow::Result<()> {
        // Bind then drop so the port is known to refuse connections.
        let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
        let client = ElevenLabsClient::with_api_url(key(), format!("http://{addr}/v1"))?;

        let err = client.synthesize("Hello ... world", "VOICE").unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
        assert!(err.is_service_failure());
        Ok(())
    }
}
