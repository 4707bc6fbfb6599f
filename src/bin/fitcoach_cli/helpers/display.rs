// ABOUTME: Output formatting helpers for fitcoach-cli
// ABOUTME: Prints profiles, plans and validation problems consistently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use fitcoach::{
    errors::PlanError,
    models::{Meal, MealKind, Plan, Profile},
};

/// Print the profile a plan was generated for
pub fn display_profile(profile: &Profile) {
    println!("\nProfile: {}", profile.name);
    println!("{}", "=".repeat(60));
    println!(
        "   Age: {} | Gender: {} | Height: {}cm | Weight: {}kg",
        profile.age, profile.gender, profile.height_cm, profile.weight_kg
    );
    println!(
        "   Goal: {} | Level: {} | Location: {} | Diet: {}",
        profile.fitness_goal,
        profile.fitness_level,
        profile.workout_location,
        profile.dietary_preference
    );
}

/// Print a full plan
pub fn display_plan(plan: &Plan) {
    println!("\nWORKOUT PLAN");
    println!("{}", "=".repeat(60));
    for day in &plan.workout_plan {
        println!("{}", day.day);
        if day.exercises.is_empty() {
            println!("   Rest day");
        }
        for exercise in &day.exercises {
            println!(
                "   • {}: {} sets x {} reps, rest {}",
                exercise.name, exercise.sets, exercise.reps, exercise.rest_time
            );
            if let Some(notes) = &exercise.notes {
                println!("     {notes}");
            }
        }
    }

    println!("\nDIET PLAN");
    println!("{}", "=".repeat(60));
    for (kind, meal) in plan.diet_plan.meals() {
        display_meal(kind, meal);
    }

    println!("\nTIPS");
    println!("{}", "=".repeat(60));
    for tip in &plan.tips {
        println!("   • {tip}");
    }

    println!("\n\"{}\"", plan.motivation);
}

fn display_meal(kind: MealKind, meal: &Meal) {
    println!("{}: {}", kind.as_str().to_uppercase(), meal.name);
    for item in &meal.items {
        println!("   • {item}");
    }
    if meal.calories.is_some() || meal.protein.is_some() {
        println!(
            "   Nutrition: {} | Protein: {}",
            meal.calories.as_deref().unwrap_or("N/A"),
            meal.protein.as_deref().unwrap_or("N/A")
        );
    }
}

/// Explain which profile fields need attention
pub fn display_validation(error: &PlanError) {
    let PlanError::Validation { missing, invalid } = error else {
        return;
    };
    eprintln!("\nThe profile is incomplete:");
    for field in missing {
        eprintln!("   • {field} is required");
    }
    for field in invalid {
        eprintln!("   • {field} has an unknown value");
    }
}
