//! Narrated landmark summaries
//!
//! A `Narrator` asks an LLM for a short history of the landmark in the
//! visitor's language, then voices it with text-to-speech. The audio is
//! optional: when speech synthesis fails the text is still returned.

pub mod openai;
pub mod tts;

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// A generated landmark summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub landmark: String,
    pub language: String,
    pub text: String,
    /// File name of the narration inside the audio directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

/// Produces summaries for a landmark name
#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn summarize(&self, landmark: &str, language: &str) -> Result<Summary>;
}

/// Writes the summary text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn landmark_summary(&self, landmark: &str, language: &str) -> Result<String>;
}

/// Voices text as MP3 bytes
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Validate a language code such as `en`, `hi`, `kn` or `pt-BR`
pub fn validate_language(code: &str) -> Result<()> {
    let mut parts = code.splitn(2, '-');
    let primary = parts.next().unwrap_or_default();
    let region = parts.next();

    let primary_ok = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let region_ok = region.map_or(true, |r| {
        (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
    });

    if primary_ok && region_ok {
        Ok(())
    } else {
        Err(Error::InvalidLanguage(format!("Unsupported language code: {:?}", code)))
    }
}

/// LLM text plus text-to-speech audio
pub struct Narrator {
    llm: Box<dyn TextGenerator>,
    tts: Box<dyn SpeechSynthesizer>,
    audio_dir: PathBuf,
}

impl Narrator {
    pub fn new(
        llm: impl TextGenerator + 'static,
        tts: impl SpeechSynthesizer + 'static,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            llm: Box::new(llm),
            tts: Box::new(tts),
            audio_dir,
        }
    }

    /// Synthesize `text` into a new file in the audio directory
    async fn narrate(&self, text: &str, language: &str) -> Result<String> {
        let audio = self.tts.synthesize(text, language).await?;

        tokio::fs::create_dir_all(&self.audio_dir).await?;
        let file_name = format!("{}_{}.mp3", uuid::Uuid::new_v4().simple(), language);
        tokio::fs::write(self.audio_dir.join(&file_name), audio).await?;

        Ok(file_name)
    }
}

#[async_trait]
impl SummaryService for Narrator {
    async fn summarize(&self, landmark: &str, language: &str) -> Result<Summary> {
        validate_language(language)?;
        if landmark.trim().is_empty() {
            return Err(Error::Summary("Landmark name is empty".to_string()));
        }

        let text = self.llm.landmark_summary(landmark, language).await?;

        let audio_file = match self.narrate(&text, language).await {
            Ok(file_name) => Some(file_name),
            Err(e) => {
                warn!("Narration for '{}' failed, returning text only: {}", landmark, e);
                None
            }
        };

        info!("Generated {} summary for '{}'", language, landmark);

        Ok(Summary {
            landmark: landmark.to_string(),
            language: language.to_string(),
            text,
            audio_file,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
