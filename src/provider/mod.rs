mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::PlanError;
use crate::models::Citation;

/// Raw outcome of a grounded generation call: the schema-constrained JSON
/// payload plus whatever web citations the provider attached.
#[derive(Debug, Clone)]
pub struct Grounded {
    pub payload: serde_json::Value,
    pub citations: Vec<Citation>,
}

/// A provider capable of search-grounded, schema-constrained generation.
/// Any implementation returning a JSON payload and retrievable citations can
/// back the planner.
#[async_trait]
pub trait GroundedGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Grounded, PlanError>;
}
