// ABOUTME: Data model for the plan pipeline
// ABOUTME: Re-exports the Profile input, the Plan output and their enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Data Models
//!
//! Two immutable value snapshots travel through the pipeline:
//!
//! - `Profile`: the biometric and preference data a user submits
//! - `Plan`: the seven-day workout, diet, tips and motivation returned by the model
//!
//! Both serialize with camel-case keys so stored and transmitted JSON keeps
//! the shape browser clients already understand.

mod plan;
mod profile;

pub use plan::{DietPlan, Exercise, Meal, MealKind, Plan, WorkoutDay};
pub use profile::{
    DietaryPreference, FitnessGoal, FitnessLevel, Gender, Profile, ProfileSubmission,
    StressLevel, UnknownVariant, WorkoutLocation,
};
