//! Top-level plan generation: completes the session record, computes the
//! daily targets, assembles the meals and attaches the water intake.

use rand::Rng;

use crate::catalog::Catalog;
use crate::energy::{daily_targets, water_intake_liters};
use crate::error::PlanError;
use crate::plan::DietPlan;
use crate::planner::build_meals;
use crate::session::SessionState;
use crate::summary::summarize;

/// Generates a fresh one-day diet plan from a session state and catalog.
///
/// Refuses with [`PlanError::IncompleteInput`] when any form section is
/// missing. Every call produces a new plan; nothing is cached or mutated.
pub fn generate_plan<R: Rng>(
    session: &SessionState,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<DietPlan, PlanError> {
    let request = session.clone().into_request()?;
    let level = request.activity.level;
    let targets = daily_targets(&request.profile, level, request.goal);
    let meals = build_meals(
        &targets,
        &request.routine,
        &request.restrictions,
        catalog,
        rng,
    );
    let totals = summarize(&meals);
    let water_liters = water_intake_liters(request.profile.weight_kg, level);
    Ok(DietPlan {
        meals,
        totals,
        water_liters,
    })
}
