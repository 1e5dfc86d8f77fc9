use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::models::travel_plan::TravelPlan;
use crate::services::gemini_service::{GeminiClient, GeminiError};
use crate::services::json_repair;

const DEFAULT_MAX_ATTEMPTS: u32 = 4;
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Anything that can turn a rendered prompt into raw response text.
pub trait TextModel {
    async fn invoke(&self, prompt: &str) -> Result<String, GeminiError>;
}

impl TextModel for GeminiClient {
    async fn invoke(&self, prompt: &str) -> Result<String, GeminiError> {
        self.generate_content(prompt).await
    }
}

#[derive(Clone)]
pub struct GenerationConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

/// Liveness flag owned by the request flow. Cleared on teardown; a backoff
/// timer that is already queued then wakes up to a no-op instead of running
/// another attempt or mutating state.
#[derive(Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub enum GenerationError {
    Transport(GeminiError),
    Parse(json_repair::PlanParseError),
    Exhausted { attempts: u32, cause: String },
    Cancelled,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Transport(err) => write!(f, "Model invocation failed: {}", err),
            GenerationError::Parse(err) => write!(f, "Model response rejected: {}", err),
            GenerationError::Exhausted { attempts, cause } => write!(
                f,
                "Trip generation failed after {} attempts: {}",
                attempts, cause
            ),
            GenerationError::Cancelled => write!(f, "Trip generation was cancelled"),
        }
    }
}

impl Error for GenerationError {}

/// Drives the model until it yields a plan that survives sanitization.
/// Transport failures and malformed output share one retry budget; both are
/// resampled with exponential backoff until the attempt cap.
pub struct TripGenerator<C = GeminiClient> {
    model: C,
    config: GenerationConfig,
}

impl<C: TextModel> TripGenerator<C> {
    pub fn new(model: C) -> Self {
        Self {
            model,
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(model: C, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    pub async fn generate_plan(
        &self,
        prompt: &str,
        cancel: &CancellationFlag,
    ) -> Result<TravelPlan, GenerationError> {
        let mut last_failure = String::new();

        for attempt in 0..self.config.max_attempts {
            if attempt > 0 {
                // Backoff before attempt n is base * 2^(n-1): 1s, 2s, 4s...
                let delay = self.config.base_delay * 2u32.pow(attempt - 1);
                println!(
                    "Retrying trip generation (attempt {} of {}) after {:?}",
                    attempt + 1,
                    self.config.max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            if cancel.is_cancelled() {
                return Err(GenerationError::Cancelled);
            }

            let raw = match self.model.invoke(prompt).await {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("Model invocation failed: {}", err);
                    last_failure = GenerationError::Transport(err).to_string();
                    continue;
                }
            };

            match json_repair::parse_travel_plan(&raw) {
                Ok(plan) => return Ok(plan),
                Err(err) => {
                    eprintln!("Model response rejected: {}", err);
                    last_failure = GenerationError::Parse(err).to_string();
                }
            }
        }

        Err(GenerationError::Exhausted {
            attempts: self.config.max_attempts,
            cause: last_failure,
        })
    }
}
