use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::budget;
use crate::error::PlanError;
use crate::models::{BudgetBreakdown, PlanPayload, PlanResult, TripRequest};
use crate::provider::GroundedGenerator;

const MAX_PEOPLE: u32 = 1_000;
const MAX_DAYS: u32 = 365;
const MAX_LOCATION_CHARS: usize = 200;

/// Builds the outbound prompt, delegates to the grounded generation provider
/// and assembles the final plan. Holds no per-request state, so sequential
/// requests are fully independent.
pub struct Planner {
    provider: Arc<dyn GroundedGenerator>,
}

impl Planner {
    pub fn new(provider: Arc<dyn GroundedGenerator>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self, request), fields(location = %request.location))]
    pub async fn plan(&self, request: TripRequest) -> Result<PlanResult, PlanError> {
        validate(&request)?;

        let breakdown = budget::allocate(request.budget, request.people, request.days);
        let prompt = build_prompt(&request, &breakdown);

        info!("Requesting grounded trip plan for {}", request.location);
        let grounded = self.provider.generate(&prompt).await?;

        let payload: PlanPayload = serde_json::from_value(grounded.payload)
            .map_err(|e| PlanError::Provider(format!("payload failed validation: {e}")))?;

        info!(
            hotels = payload.hotels.len(),
            activities = payload.activities.len(),
            citations = grounded.citations.len(),
            "Assembled trip plan"
        );

        Ok(PlanResult {
            payload,
            budget_breakdown: breakdown,
            citations: grounded.citations,
        })
    }
}

/// Fail-fast request validation. Nothing leaves the process until the
/// request passes.
fn validate(request: &TripRequest) -> Result<(), PlanError> {
    if !request.budget.is_finite() || request.budget <= 0.0 {
        return Err(PlanError::Validation(
            "budget must be a positive number".to_string(),
        ));
    }
    if request.location.trim().is_empty() {
        return Err(PlanError::Validation("location must not be empty".to_string()));
    }
    if request.location.chars().count() > MAX_LOCATION_CHARS {
        return Err(PlanError::Validation(format!(
            "location must be at most {MAX_LOCATION_CHARS} characters"
        )));
    }
    if request.people == 0 || request.people > MAX_PEOPLE {
        return Err(PlanError::Validation(format!(
            "people must be between 1 and {MAX_PEOPLE}"
        )));
    }
    if request.days == 0 || request.days > MAX_DAYS {
        return Err(PlanError::Validation(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }
    Ok(())
}

fn build_prompt(request: &TripRequest, breakdown: &BudgetBreakdown) -> String {
    let location = request.location.trim();
    let today = Utc::now().format("%B %-d, %Y");

    format!(
        r#"I am planning a trip to {location}. Use live web search grounding to provide accurate, real-time information as of {today}.

HOTEL PROXIMITY RULE:
- Search for hotels strictly within or immediately adjacent to "{location}".
- You MUST prioritize proximity. Start with the most central or "nearby" options relative to the heart of the searched location.
- Only suggest hotels further away (the "far" options) if no suitable matches for the {traveler_type} budget exist in the immediate vicinity.

Trip Details:
- Duration: {days} days
- Group Size: {people} people
- Total Budget: {budget:.0}
- Traveler Profile: {traveler_type}

Requirements:
1. CURRENT weather in {location} (temperature in Celsius and conditions).
2. Exactly 3 real, currently operating hotels that follow the PROXIMITY RULE and fit the {traveler_type} budget.
   Ensure the total stay cost is roughly {stay:.0}.
3. Exactly 4 popular tourist activities or hidden gems in {location} with current estimated entry fees/costs.
4. Exactly 4 local food recommendations or specific dining experiences.

CRITICAL:
- Provide real physical addresses for hotels.
- The totalEstimatedCost must be a realistic sum of stay, food, and activities.

Return the response in JSON format."#,
        location = location,
        today = today,
        traveler_type = request.traveler_type,
        days = request.days,
        people = request.people,
        budget = request.budget,
        stay = breakdown.stay,
    )
}
