// ABOUTME: Generated plan model: seven workout days, four meals, tips and motivation
// ABOUTME: Includes structural checks applied after a model reply has been parsed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::plan::WORKOUT_DAYS;

/// Complete plan returned for a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Ordered workout days, Monday first
    pub workout_plan: Vec<WorkoutDay>,
    /// The four daily meals
    pub diet_plan: DietPlan,
    /// Lifestyle, posture and general tips
    pub tips: Vec<String>,
    /// Closing motivational message
    pub motivation: String,
}

/// One day of the workout schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Day label such as "Monday"
    pub day: String,
    /// Exercises in the order they are performed; empty on rest days
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A single exercise prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions, possibly a range like "10-12" or a duration
    pub reps: String,
    /// Human-readable rest between sets
    pub rest_time: String,
    /// Optional coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The diet section of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietPlan {
    /// Morning meal
    pub breakfast: Meal,
    /// Midday meal
    pub lunch: Meal,
    /// Evening meal
    pub dinner: Meal,
    /// Snacks across the day
    pub snacks: Meal,
}

/// A named meal with its food items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal name
    pub name: String,
    /// Food items
    #[serde(default)]
    pub items: Vec<String>,
    /// Calorie annotation such as "400 kcal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    /// Protein annotation such as "25g"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
}

/// Which of the four meals a [`Meal`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealKind {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snacks
    Snacks,
}

impl MealKind {
    /// Lowercase key used in the plan JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DietPlan {
    /// Meals in serving order
    #[must_use]
    pub const fn meals(&self) -> [(MealKind, &Meal); 4] {
        [
            (MealKind::Breakfast, &self.breakfast),
            (MealKind::Lunch, &self.lunch),
            (MealKind::Dinner, &self.dinner),
            (MealKind::Snacks, &self.snacks),
        ]
    }
}

impl Plan {
    /// Check the structure of a parsed plan.
    ///
    /// A plan is accepted when it has exactly seven labelled days, every
    /// exercise has a name and at least one set, and every meal is named.
    /// Rest days without exercises are allowed.
    ///
    /// # Errors
    ///
    /// Returns every problem found, one description per entry.
    pub fn check_shape(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.workout_plan.len() != WORKOUT_DAYS {
            problems.push(format!(
                "expected {WORKOUT_DAYS} workout days, found {}",
                self.workout_plan.len()
            ));
        }

        for (index, day) in self.workout_plan.iter().enumerate() {
            let position = index + 1;
            if day.day.trim().is_empty() {
                problems.push(format!("workout day {position} has no label"));
            }
            for (slot, exercise) in day.exercises.iter().enumerate() {
                let slot = slot + 1;
                if exercise.name.trim().is_empty() {
                    problems.push(format!("day {position} exercise {slot} has no name"));
                }
                if exercise.sets == 0 {
                    problems.push(format!("day {position} exercise {slot} has zero sets"));
                }
            }
        }

        for (kind, meal) in self.diet_plan.meals() {
            if meal.name.trim().is_empty() {
                problems.push(format!("{kind} has no name"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    /// Total number of exercises across the week
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.workout_plan.iter().map(|d| d.exercises.len()).sum()
    }
}
