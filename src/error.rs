//! Error types for plan generation.

use thiserror::Error;

/// Form sections that must all be present before a plan can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Activity,
    Goal,
    Routine,
    FoodPreferences,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Profile => "profile",
            Section::Activity => "activity",
            Section::Goal => "goal",
            Section::Routine => "routine",
            Section::FoodPreferences => "food preferences",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur when generating a diet plan.
///
/// The core has exactly one failure mode: refusing to compute when a
/// required section of the user record is missing. Everything downstream
/// of a complete record is a total function.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("incomplete input: missing {0} section")]
    IncompleteInput(Section),
}
