use serde::{Deserialize, Serialize};

/// Trip parameters submitted by the client. Consumed once per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub budget: f64,
    pub location: String,
    pub people: u32,
    pub days: u32,
    pub traveler_type: TravelerType,
}

/// Closed set of traveler profiles. Used only as a hint in the outbound
/// prompt; the provider decides what price band each tier maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelerType {
    Budget,
    Poor,
    Luxury,
}

impl TravelerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerType::Budget => "Budget",
            TravelerType::Poor => "Poor",
            TravelerType::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for TravelerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-ratio split of the total budget, computed locally and never
/// inferred from the provider's own cost figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub stay: f64,
    pub food: f64,
    pub activities: f64,
    pub per_person_per_day: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub condition: String,
    pub is_outdoor_friendly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOption {
    pub name: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub description: String,
    pub address: String,
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCategory {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOption {
    pub name: String,
    pub cost: f64,
    #[serde(rename = "type")]
    pub category: ActivityCategory,
    pub description: String,
}

/// Provenance of a grounded fact: title plus source URI of a web page the
/// provider consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// The provider-generated part of the plan. Every field is required: a
/// payload missing any of them fails deserialization and the whole request
/// fails with it. No partially populated results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub weather: WeatherSnapshot,
    pub hotels: Vec<HotelOption>,
    pub activities: Vec<ActivityOption>,
    pub food_suggestions: Vec<String>,
    pub total_estimated_cost: f64,
}

/// Complete response for `POST /api/plan`: provider payload merged with the
/// locally computed breakdown and any grounding citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    #[serde(flatten)]
    pub payload: PlanPayload,
    pub budget_breakdown: BudgetBreakdown,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Wire types for the generateContent API. Only the fields the planner reads.

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// A single grounding source. Non-web chunks (e.g. retrieved documents)
/// deserialize with `web: None` and are skipped during citation extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub title: Option<String>,
    pub uri: Option<String>,
}
