//! Natural-language scene description collaborator
//!
//! The hosted captioning model lives behind `CaptionBackend`. The navigator
//! never looks at the text; it only travels next to the analysis in reports.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// Returned instead of a description when no credential is configured
pub const NOT_CONFIGURED: &str = "service not configured";

/// Prompt used when the caller does not supply one
pub const DEFAULT_PROMPT: &str = "Describe what's in this image";

/// Instructions sent with every request
pub const ANALYSIS_INSTRUCTIONS: &str = "You are an expert in analyzing images for robotics applications and obstacle detection. \
Provide a detailed description of the image, focusing on:
1. Identifying potential obstacles and their positions
2. Describing the scene environment
3. Explaining what path planning challenges might exist
4. Suggesting possible navigation strategies
Keep your analysis concise but informative for robotics applications.";

/// Credential and model selection, passed in explicitly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub default_prompt: Option<String>,
}

impl CaptionConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: "gemini-1.5-flash".to_string(),
            default_prompt: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Raw image handed to the captioning model
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl ImagePayload {
    /// `image/png` for `.png` files, `image/jpeg` otherwise
    pub fn mime_for(path: &Path) -> &'static str {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
            _ => "image/jpeg",
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).with_context(|| format!("Failed to read image: {:?}", path))?;
        Ok(Self {
            mime_type: Self::mime_for(path),
            data,
        })
    }
}

/// A hosted model that turns an image and prompt into text
pub trait CaptionBackend: Send + Sync {
    fn describe(
        &self,
        config: &CaptionConfig,
        image: &ImagePayload,
        prompt: &str,
        instructions: &str,
    ) -> Result<String>;
}

/// Front door for scene descriptions
pub struct CaptionService {
    config: CaptionConfig,
    backend: Option<Box<dyn CaptionBackend>>,
}

impl CaptionService {
    pub fn new(config: CaptionConfig) -> Self {
        Self { config, backend: None }
    }

    pub fn with_backend(mut self, backend: Box<dyn CaptionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Describe the image; failures come back as text, never as errors
    pub fn describe(&self, image: &ImagePayload, prompt: Option<&str>) -> String {
        let backend = match (&self.backend, self.config.is_configured()) {
            (Some(backend), true) => backend,
            _ => {
                debug!("captioning skipped: {}", NOT_CONFIGURED);
                return NOT_CONFIGURED.to_string();
            }
        };

        let prompt = prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .or(self.config.default_prompt.as_deref())
            .unwrap_or(DEFAULT_PROMPT);

        match backend.describe(&self.config, image, prompt, ANALYSIS_INSTRUCTIONS) {
            Ok(text) => text,
            Err(e) => {
                error!("Error generating scene description: {e:#}");
                format!("Could not generate description: {e}")
            }
        }
    }

    pub fn describe_file(&self, path: &Path, prompt: Option<&str>) -> String {
        if !self.config.is_configured() {
            return NOT_CONFIGURED.to_string();
        }
        match ImagePayload::from_file(path) {
            Ok(image) => self.describe(&image, prompt),
            Err(e) => format!("Could not generate description: {e}"),
        }
    }
}
