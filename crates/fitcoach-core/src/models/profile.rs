// ABOUTME: User profile model with biometric data and training preferences
// ABOUTME: Profile, ProfileSubmission validation, and the preference enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// A string did not name any variant of a preference enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    /// Enumeration being parsed
    pub kind: &'static str,
    /// Offending input
    pub value: String,
    /// Comma-separated list of accepted values
    pub expected: String,
}

/// Declares a closed preference enumeration together with its wire strings.
macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical wire string
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                        expected: Self::ALL
                            .iter()
                            .map(Self::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

preference_enum! {
    /// Self-reported gender
    Gender, "gender" {
        /// Male
        Male => "male",
        /// Female
        Female => "female",
        /// Any other identity
        Other => "other",
    }
}

preference_enum! {
    /// What the user wants the plan to achieve
    FitnessGoal, "fitness goal" {
        /// Reduce body weight
        WeightLoss => "weight-loss",
        /// Build muscle mass
        MuscleGain => "muscle-gain",
        /// Keep current condition
        Maintenance => "maintenance",
        /// Improve stamina
        Endurance => "endurance",
    }
}

preference_enum! {
    /// Current training experience
    FitnessLevel, "fitness level" {
        /// New to training
        Beginner => "beginner",
        /// Trains regularly
        Intermediate => "intermediate",
        /// Experienced athlete
        Advanced => "advanced",
    }
}

preference_enum! {
    /// Where workouts take place
    WorkoutLocation, "workout location" {
        /// At home, little equipment
        Home => "home",
        /// Commercial gym
        Gym => "gym",
        /// Parks, tracks, streets
        Outdoor => "outdoor",
    }
}

preference_enum! {
    /// Diet the meal plan must respect
    DietaryPreference, "dietary preference" {
        /// No meat or fish
        Vegetarian => "vegetarian",
        /// No restriction
        NonVegetarian => "non-vegetarian",
        /// No animal products
        Vegan => "vegan",
        /// Low carbohydrate
        Keto => "keto",
    }
}

preference_enum! {
    /// Self-reported stress level
    StressLevel, "stress level" {
        /// Low stress
        Low => "low",
        /// Medium stress
        Medium => "medium",
        /// High stress
        High => "high",
    }
}

/// A complete, validated user profile.
///
/// Only [`ProfileSubmission::validate`] and deserialization of previously
/// stored profiles produce values of this type, so every required field is
/// known to be present.
///
/// # Examples
///
/// ```rust
/// use fitcoach_core::models::{
///     DietaryPreference, FitnessGoal, FitnessLevel, Gender, Profile, WorkoutLocation,
/// };
///
/// let profile = Profile {
///     name: "Ana".into(),
///     age: 30,
///     gender: Gender::Female,
///     height_cm: 165.0,
///     weight_kg: 60.0,
///     fitness_goal: FitnessGoal::WeightLoss,
///     fitness_level: FitnessLevel::Beginner,
///     workout_location: WorkoutLocation::Home,
///     dietary_preference: DietaryPreference::Vegetarian,
///     medical_history: None,
///     stress_level: None,
/// };
/// assert_eq!(profile.fitness_goal.as_str(), "weight-loss");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Self-reported gender
    pub gender: Gender,
    /// Height in centimeters
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Weight in kilograms
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Where the user trains
    pub workout_location: WorkoutLocation,
    /// Diet constraint
    pub dietary_preference: DietaryPreference,
    /// Free-text medical history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    /// Self-reported stress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressLevel>,
}

/// Profile as received from a form or request body, before validation.
///
/// Every field is optional and enumerations arrive as raw strings so that an
/// incomplete submission can be reported field by field instead of failing
/// deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fitness goal wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Fitness level wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    /// Workout location wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_location: Option<String>,
    /// Dietary preference wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
    /// Free-text medical history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    /// Stress level wire string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<String>,
}

/// Collects missing and invalid field names while validating a submission
#[derive(Default)]
struct FieldReport {
    missing: Vec<&'static str>,
    invalid: Vec<&'static str>,
}

impl FieldReport {
    fn text(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_owned()),
            _ => {
                self.missing.push(field);
                None
            }
        }
    }

    fn positive<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T>
    where
        T: PartialOrd + Default + Copy,
    {
        match value {
            Some(v) if v > T::default() => Some(v),
            _ => {
                self.missing.push(field);
                None
            }
        }
    }

    fn choice<E: FromStr>(&mut self, field: &'static str, value: Option<&str>) -> Option<E> {
        let raw = self.text(field, value)?;
        raw.parse().map_or_else(
            |_| {
                self.invalid.push(field);
                None
            },
            Some,
        )
    }

    fn optional_choice<E: FromStr>(&mut self, field: &'static str, value: Option<&str>) -> Option<E> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.parse().map_or_else(
                |_| {
                    self.invalid.push(field);
                    None
                },
                Some,
            ),
            _ => None,
        }
    }
}

impl ProfileSubmission {
    /// Check that every required field is present and every enumeration
    /// value is known, producing a [`Profile`].
    ///
    /// Empty strings and non-positive numbers count as missing. Numeric
    /// ranges are not checked beyond that.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Validation`] naming every missing and invalid
    /// field, in declaration order.
    pub fn validate(&self) -> Result<Profile, PlanError> {
        let mut report = FieldReport::default();

        let name = report.text("name", self.name.as_deref());
        let age = report.positive("age", self.age);
        let gender = report.choice::<Gender>("gender", self.gender.as_deref());
        let height_cm = report.positive("height", self.height);
        let weight_kg = report.positive("weight", self.weight);
        let fitness_goal = report.choice::<FitnessGoal>("fitnessGoal", self.fitness_goal.as_deref());
        let fitness_level =
            report.choice::<FitnessLevel>("fitnessLevel", self.fitness_level.as_deref());
        let workout_location =
            report.choice::<WorkoutLocation>("workoutLocation", self.workout_location.as_deref());
        let dietary_preference = report
            .choice::<DietaryPreference>("dietaryPreference", self.dietary_preference.as_deref());
        let stress_level =
            report.optional_choice::<StressLevel>("stressLevel", self.stress_level.as_deref());
        let medical_history = self
            .medical_history
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_owned);

        match (
            name,
            age,
            gender,
            height_cm,
            weight_kg,
            fitness_goal,
            fitness_level,
            workout_location,
            dietary_preference,
        ) {
            (
                Some(name),
                Some(age),
                Some(gender),
                Some(height_cm),
                Some(weight_kg),
                Some(fitness_goal),
                Some(fitness_level),
                Some(workout_location),
                Some(dietary_preference),
            ) if report.invalid.is_empty() => Ok(Profile {
                name,
                age,
                gender,
                height_cm,
                weight_kg,
                fitness_goal,
                fitness_level,
                workout_location,
                dietary_preference,
                medical_history,
                stress_level,
            }),
            _ => Err(PlanError::Validation {
                missing: report.missing,
                invalid: report.invalid,
            }),
        }
    }
}

impl From<&Profile> for ProfileSubmission {
    fn from(profile: &Profile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            age: Some(profile.age),
            gender: Some(profile.gender.as_str().to_owned()),
            height: Some(profile.height_cm),
            weight: Some(profile.weight_kg),
            fitness_goal: Some(profile.fitness_goal.as_str().to_owned()),
            fitness_level: Some(profile.fitness_level.as_str().to_owned()),
            workout_location: Some(profile.workout_location.as_str().to_owned()),
            dietary_preference: Some(profile.dietary_preference.as_str().to_owned()),
            medical_history: profile.medical_history.clone(),
            stress_level: profile.stress_level.map(|s| s.as_str().to_owned()),
        }
    }
}
