//! Text-to-speech via the Google Translate speech endpoint
//!
//! The endpoint accepts at most ~200 characters per request, so text is
//! split on whitespace and the MP3 segments are concatenated.

use crate::constants::api::TTS_URL;
use crate::constants::USER_AGENT;
use crate::error::{Error, Result};
use crate::summary::SpeechSynthesizer;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Maximum characters per speech request
pub const MAX_CHUNK_CHARS: usize = 200;

/// Speech synthesis client
#[derive(Debug, Clone)]
pub struct TtsClient {
    client: reqwest::Client,
}

impl TtsClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn chunk_url(chunk: &str, language: &str, index: usize, total: usize) -> String {
        format!(
            "{}?ie=UTF-8&client=tw-ob&tl={}&total={}&idx={}&textlen={}&q={}",
            TTS_URL,
            urlencoding::encode(language),
            total,
            index,
            chunk.chars().count(),
            urlencoding::encode(chunk)
        )
    }

    /// Synthesize `text` as MP3 bytes
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Summary("Nothing to narrate".to_string()));
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let response = self
                .client
                .get(Self::chunk_url(chunk, language, index, chunks.len()))
                .send()
                .await
                .map_err(|e| Error::Provider(format!("TTS request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(Error::Provider(format!(
                    "TTS returned status: {}",
                    response.status()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::Provider(format!("Failed to read TTS audio: {}", e)))?;
            audio.extend_from_slice(&bytes);
        }

        debug!("Synthesized {} chunks, {} bytes", chunks.len(), audio.len());
        Ok(audio)
    }
}

/// Split text into chunks of at most `max_chars` characters
///
/// Breaks on whitespace; a single word longer than `max_chars` is split
/// mid-word.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl SpeechSynthesizer for TtsClient {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        TtsClient::synthesize(self, text, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_short_text() {
        assert_eq!(chunk_text("The Taj Mahal", 200), vec!["The Taj Mahal"]);
        assert!(chunk_text("   ", 200).is_empty());
    }

    #[test]
    fn test_chunk_respects_limit() {
        let text = "word ".repeat(100);
        let chunks = chunk_text(&text, 22);

        assert!(chunks.iter().all(|c| c.chars().count() <= 22));
        assert_eq!(chunks[0], "word word word word");
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn test_chunk_long_word() {
        let chunks = chunk_text("a abcdefghij b", 4);
        assert_eq!(chunks, vec!["a", "abcd", "efgh", "ij", "b"]);
    }

    #[test]
    fn test_chunk_counts_chars_not_bytes() {
        // Devanagari is 3 bytes per char in UTF-8
        let chunks = chunk_text("ताज महल", 7);
        assert_eq!(chunks, vec!["ताज महल"]);
    }

    #[test]
    fn test_chunk_url_encodes_text() {
        let url = TtsClient::chunk_url("Qutub Minar & more", "en", 0, 1);
        assert!(url.starts_with(TTS_URL));
        assert!(url.contains("tl=en"));
        assert!(url.contains("q=Qutub%20Minar%20%26%20more"));
    }
}
