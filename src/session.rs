//! User-facing input record: profile, activity, goal, routine and food
//! preferences, accumulated step by step by the form layer and assembled
//! into a complete request before plan generation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Validated body measurements from the profile step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
}

/// Self-reported training level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl TrainingLevel {
    /// Lenient parser for the free-ish strings the form layer produces.
    /// Unknown values yield `None`; callers fall back to the sedentary
    /// defaults downstream.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Some(TrainingLevel::Sedentary),
            "light" | "lightly_active" => Some(TrainingLevel::Light),
            "moderate" | "moderately_active" => Some(TrainingLevel::Moderate),
            "intense" | "active" => Some(TrainingLevel::Intense),
            "very_intense" | "very_active" => Some(TrainingLevel::VeryIntense),
            _ => None,
        }
    }
}

/// The activity step. The section itself is required, but an unrecognized
/// level inside it is tolerated and maps to the sedentary multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityProfile {
    pub level: Option<TrainingLevel>,
}

impl ActivityProfile {
    pub fn from_input(raw: &str) -> Self {
        ActivityProfile {
            level: TrainingLevel::parse(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    HealthyEating,
}

/// Named meal times from the routine step, 24-hour HH:MM strings.
/// Snack is optional; its presence decides whether the plan has a
/// fourth meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub wake: String,
    pub breakfast: String,
    pub lunch: String,
    pub snack: Option<String>,
    pub dinner: String,
    pub sleep: String,
}

impl Routine {
    /// Whether every time string parses as 24-hour HH:MM. The form layer
    /// validates before submission; this is for callers that want to
    /// re-check (the CLI warns on failure).
    pub fn validate(&self) -> bool {
        let times = [
            Some(&self.wake),
            Some(&self.breakfast),
            Some(&self.lunch),
            self.snack.as_ref(),
            Some(&self.dinner),
            Some(&self.sleep),
        ];
        times
            .into_iter()
            .flatten()
            .all(|t| NaiveTime::parse_from_str(t, "%H:%M").is_ok())
    }
}

/// Dietary restriction flags derived from the food-preferences step.
///
/// `low_carb` is carried through for display purposes but does not
/// participate in item eligibility.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Restrictions {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
    pub low_carb: bool,
}

impl Restrictions {
    pub fn none() -> Self {
        Restrictions::default()
    }

    /// Keyword scan over free-text or joined multi-select restriction input.
    pub fn from_free_text(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        Restrictions {
            vegetarian: lower.contains("vegetarian"),
            vegan: lower.contains("vegan"),
            gluten_free: lower.contains("gluten"),
            lactose_free: lower.contains("lactose") || lower.contains("dairy"),
            low_carb: lower.contains("low carb") || lower.contains("low-carb"),
        }
    }

    pub fn any(&self) -> bool {
        self.vegetarian || self.vegan || self.gluten_free || self.lactose_free || self.low_carb
    }
}

/// Immutable accumulation of the five form sections. Each step hands the
/// next one a new state; nothing is read from ambient storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub profile: Option<UserProfile>,
    pub activity: Option<ActivityProfile>,
    pub goal: Option<Goal>,
    pub routine: Option<Routine>,
    pub restrictions: Option<Restrictions>,
}

/// A fully-assembled generation request. Existence of this value is the
/// proof of input completeness; everything computed from it is total.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub profile: UserProfile,
    pub activity: ActivityProfile,
    pub goal: Goal,
    pub routine: Routine,
    pub restrictions: Restrictions,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_activity(mut self, activity: ActivityProfile) -> Self {
        self.activity = Some(activity);
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_routine(mut self, routine: Routine) -> Self {
        self.routine = Some(routine);
        self
    }

    pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
        self.restrictions = Some(restrictions);
        self
    }

    /// Checks that every section is present and yields the complete
    /// request, or refuses with the first missing section. No partial
    /// plan is ever produced from an incomplete state.
    pub fn into_request(self) -> Result<PlanRequest, PlanError> {
        let profile = self
            .profile
            .ok_or(PlanError::IncompleteInput(Section::Profile))?;
        let activity = self
            .activity
            .ok_or(PlanError::IncompleteInput(Section::Activity))?;
        let goal = self.goal.ok_or(PlanError::IncompleteInput(Section::Goal))?;
        let routine = self
            .routine
            .ok_or(PlanError::IncompleteInput(Section::Routine))?;
        let restrictions = self
            .restrictions
            .ok_or(PlanError::IncompleteInput(Section::FoodPreferences))?;
        Ok(PlanRequest {
            profile,
            activity,
            goal,
            routine,
            restrictions,
        })
    }
}
