// ABOUTME: Renders a validated profile into the plan-generation prompt
// ABOUTME: Embeds a literal JSON example so the model answers in the Plan shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::fmt::Write;

use crate::constants::plan::WORKOUT_DAYS;
use crate::models::Profile;

/// Example reply embedded in every plan prompt.
///
/// It must keep deserializing as a `Plan` (apart from the day count) so the
/// model is steered toward exactly the shape the normalizer accepts.
pub const PLAN_SCHEMA_EXAMPLE: &str = r#"{
  "workoutPlan": [
    {
      "day": "Monday",
      "exercises": [
        {
          "name": "Exercise name",
          "sets": 3,
          "reps": "10-12",
          "restTime": "60 seconds",
          "notes": "Any specific tips"
        }
      ]
    }
  ],
  "dietPlan": {
    "breakfast": {
      "name": "Breakfast name",
      "items": ["Item 1", "Item 2"],
      "calories": "400 kcal",
      "protein": "25g"
    },
    "lunch": {
      "name": "Lunch name",
      "items": ["Item 1", "Item 2"],
      "calories": "600 kcal",
      "protein": "40g"
    },
    "dinner": {
      "name": "Dinner name",
      "items": ["Item 1", "Item 2"],
      "calories": "500 kcal",
      "protein": "35g"
    },
    "snacks": {
      "name": "Snacks",
      "items": ["Snack 1", "Snack 2"],
      "calories": "200 kcal",
      "protein": "10g"
    }
  },
  "tips": [
    "Lifestyle tip 1",
    "Posture tip 2",
    "General tip 3"
  ],
  "motivation": "A powerful motivational message"
}"#;

/// Prompt for the standalone motivational quote
pub const QUOTE_PROMPT: &str = "Generate a short, powerful motivational fitness quote (maximum 20 words). Just return the quote, nothing else.";

/// Build the plan prompt for a complete profile.
///
/// Every profile value appears once, on its own labelled line. Medical
/// history and stress level lines are omitted when absent.
#[must_use]
pub fn build_plan_prompt(profile: &Profile) -> String {
    let mut prompt = String::with_capacity(PLAN_SCHEMA_EXAMPLE.len() + 1024);

    prompt.push_str(
        "You are an expert AI fitness coach. Generate a comprehensive, personalized fitness plan based on the following user details:\n\n",
    );

    // Writing to a String cannot fail
    let _ = writeln!(prompt, "Name: {}", profile.name);
    let _ = writeln!(prompt, "Age: {}", profile.age);
    let _ = writeln!(prompt, "Gender: {}", profile.gender);
    let _ = writeln!(prompt, "Height: {} cm", profile.height_cm);
    let _ = writeln!(prompt, "Weight: {} kg", profile.weight_kg);
    let _ = writeln!(prompt, "Fitness Goal: {}", profile.fitness_goal);
    let _ = writeln!(prompt, "Fitness Level: {}", profile.fitness_level);
    let _ = writeln!(prompt, "Workout Location: {}", profile.workout_location);
    let _ = writeln!(prompt, "Dietary Preference: {}", profile.dietary_preference);
    if let Some(history) = &profile.medical_history {
        let _ = writeln!(prompt, "Medical History: {history}");
    }
    if let Some(stress) = profile.stress_level {
        let _ = writeln!(prompt, "Stress Level: {stress}");
    }

    prompt.push_str("\nPlease provide a detailed response in the following JSON format:\n");
    prompt.push_str(PLAN_SCHEMA_EXAMPLE);
    let _ = write!(
        prompt,
        "\n\nGenerate a {WORKOUT_DAYS}-day workout plan with one entry per day. \
         Make sure the diet aligns with the dietary preference above. \
         Be specific and practical.\n"
    );

    prompt
}

/// Build the caption prompt for an illustrative image
#[must_use]
pub fn build_image_prompt(subject: &str) -> String {
    format!(
        "Generate a detailed description for creating an image of: {}.\n\
         Make it realistic, high-quality, and fitness/food photography style.\n\
         Maximum 100 words, focus on visual details.",
        subject.trim()
    )
}
