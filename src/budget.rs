use crate::models::BudgetBreakdown;

const STAY_RATIO: f64 = 0.55;
const FOOD_RATIO: f64 = 0.25;
const ACTIVITY_RATIO: f64 = 0.20;

/// Splits the total budget into fixed-ratio categories and computes the
/// per-person-per-day spend. Pure arithmetic; callers validate that budget,
/// people and days are positive before calling.
pub fn allocate(budget: f64, people: u32, days: u32) -> BudgetBreakdown {
    BudgetBreakdown {
        stay: budget * STAY_RATIO,
        food: budget * FOOD_RATIO,
        activities: budget * ACTIVITY_RATIO,
        per_person_per_day: budget / (people as f64 * days as f64),
    }
}
