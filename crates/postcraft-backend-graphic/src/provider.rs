//! Optional content collaborators.
//!
//! Text and image generation live outside the engine behind
//! [`ContentProvider`]. Every call goes through [`call_with_timeout`], so a
//! slow or hung collaborator costs at most the configured timeout and is then
//! treated exactly like an unavailable one. Calls are never retried.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default time allowed for a collaborator call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from a collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No collaborator is configured, or it declined the request.
    #[error("Content provider unavailable: {0}")]
    Unavailable(String),

    /// The collaborator does not implement this kind of generation.
    #[error("Content provider does not support {0} generation")]
    Unsupported(&'static str),

    /// The call did not finish in time.
    #[error("Content provider timed out after {0:?}")]
    Timeout(Duration),

    /// The call ran but failed.
    #[error("Content provider failed: {0}")]
    Failed(String),
}

/// Input for text generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPrompt {
    pub category: String,
    /// Free-form topic, such as a day's content idea.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl TextPrompt {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            topic: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

/// Copy returned by a text collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// A text/image generation collaborator.
pub trait ContentProvider: Send + Sync {
    /// Generate headline, description and hashtags.
    fn generate_text(&self, prompt: &TextPrompt) -> Result<GeneratedText, ProviderError>;

    /// Generate an encoded image (PNG, JPEG, ...) for a prompt.
    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Run `call` on a worker thread and give up after `timeout`.
///
/// A timed-out worker is left to finish on its own; its result is dropped.
pub fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, ProviderError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("postcraft-provider".to_string())
        .spawn(move || {
            let _ = tx.send(call());
        })
        .map_err(|e| ProviderError::Failed(format!("failed to spawn worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(ProviderError::Timeout(timeout)),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(ProviderError::Failed("provider worker exited without a result".to_string()))
        }
    }
}

/// Generate an image through `provider`, bounded by `timeout`.
pub fn generate_image_with_timeout(
    provider: &Arc<dyn ContentProvider>,
    prompt: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ProviderError> {
    let provider = Arc::clone(provider);
    let prompt = prompt.to_string();
    call_with_timeout(timeout, move || provider.generate_image(&prompt))
}

/// Generate text through `provider`, bounded by `timeout`.
pub fn generate_text_with_timeout(
    provider: &Arc<dyn ContentProvider>,
    prompt: &TextPrompt,
    timeout: Duration,
) -> Result<GeneratedText, ProviderError> {
    let provider = Arc::clone(provider);
    let prompt = prompt.clone();
    call_with_timeout(timeout, move || provider.generate_text(&prompt))
}

/// Provider with canned responses, for tests and offline use.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    text: Result<GeneratedText, ProviderError>,
    image: Result<Vec<u8>, ProviderError>,
    delay: Option<Duration>,
}

impl StaticProvider {
    /// Fails every call with [`ProviderError::Unavailable`].
    pub fn unavailable() -> Self {
        let err = ProviderError::Unavailable("static provider has no content".to_string());
        Self {
            text: Err(err.clone()),
            image: Err(err),
            delay: None,
        }
    }

    /// Succeed image calls with these bytes.
    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Ok(bytes);
        self
    }

    /// Succeed text calls with this copy.
    pub fn with_text(mut self, text: GeneratedText) -> Self {
        self.text = Ok(text);
        self
    }

    /// Fail image calls with this error.
    pub fn with_image_error(mut self, error: ProviderError) -> Self {
        self.image = Err(error);
        self
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn wait(&self) {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
    }
}

impl ContentProvider for StaticProvider {
    fn generate_text(&self, _prompt: &TextPrompt) -> Result<GeneratedText, ProviderError> {
        self.wait();
        self.text.clone()
    }

    fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>, ProviderError> {
        self.wait();
        self.image.clone()
    }
}

#[cfg(feature = "remote")]
pub use remote::{HttpImageProvider, DEFAULT_IMAGE_ENDPOINT};

#[cfg(feature = "remote")]
mod remote {
    use std::time::Duration;

    use super::{ContentProvider, GeneratedText, ProviderError, TextPrompt};

    /// Hosted Stable Diffusion XL inference endpoint.
    pub const DEFAULT_IMAGE_ENDPOINT: &str =
        "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

    /// Image collaborator backed by an HTTP inference endpoint.
    ///
    /// Posts `{"inputs": prompt}` with a bearer token and returns the response
    /// body as image bytes.
    #[derive(Debug, Clone)]
    pub struct HttpImageProvider {
        endpoint: String,
        token: String,
        timeout: Duration,
    }

    impl HttpImageProvider {
        pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
            Self {
                endpoint: endpoint.into(),
                token: token.into(),
                timeout: super::DEFAULT_PROVIDER_TIMEOUT,
            }
        }

        /// HTTP-level timeout. The composer applies its own timeout on top.
        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl ContentProvider for HttpImageProvider {
        fn generate_text(&self, _prompt: &TextPrompt) -> Result<GeneratedText, ProviderError> {
            Err(ProviderError::Unsupported("text"))
        }

        fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| ProviderError::Failed(format!("failed to create HTTP client: {e}")))?;

            let response = client
                .post(&self.endpoint)
                .bearer_auth(&self.token)
                .json(&serde_json::json!({ "inputs": prompt }))
                .send()
                .map_err(|e| {
                    if e.is_timeout() {
                        ProviderError::Timeout(self.timeout)
                    } else {
                        ProviderError::Unavailable(format!("request failed: {e}"))
                    }
                })?;

            if !response.status().is_success() {
                return Err(ProviderError::Failed(format!(
                    "HTTP status {}",
                    response.status()
                )));
            }

            response
                .bytes()
                .map(|b| b.to_vec())
                .map_err(|e| ProviderError::Failed(format!("failed to read response body: {e}")))
        }
    }
}
