// ABOUTME: Curated workout and meal plans bundled with the server
// ABOUTME: Served when the catalog query is empty or fails, and written by the seed binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use chrono::{DateTime, Utc};

use crate::models::{
    CatalogEntry, Exercise, Meal, MealCatalogEntry, MealPlanBody, PlanStatus, WorkoutCatalogEntry,
    WorkoutPlanBody,
};

// 2025-01-01T00:00:00Z
const CURATED_CREATED_AT: i64 = 1_735_689_600;

fn curated_created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(CURATED_CREATED_AT, 0).unwrap_or_default()
}

fn exercise(name: &str, sets: u32, reps: &str) -> Exercise {
    Exercise {
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
    }
}

fn meal(
    meal_type: &str,
    name: &str,
    ingredients: &[&str],
    calories: f64,
    macros: (f64, f64, f64),
) -> Meal {
    let (protein, carbs, fat) = macros;
    Meal {
        meal_type: meal_type.to_owned(),
        name: name.to_owned(),
        ingredients: ingredients.iter().map(|&i| i.to_owned()).collect(),
        calories,
        protein,
        carbs,
        fat,
    }
}

fn curated<B>(id: &str, title: &str, description: &str, rating: f64, body: B) -> CatalogEntry<B> {
    CatalogEntry {
        id: id.to_owned(),
        owner_id: None,
        status: PlanStatus::Approved,
        avg_rating: rating,
        total_ratings: 12,
        title: title.to_owned(),
        description: description.to_owned(),
        created_at: curated_created_at(),
        body,
    }
}

/// Curated workout plans
#[must_use]
pub fn curated_workouts() -> Vec<WorkoutCatalogEntry> {
    vec![
        curated(
            "curated-workout-full-body",
            "Beginner Full Body",
            "A gentle introduction to strength training using only body weight.",
            4.6,
            WorkoutPlanBody {
                difficulty: "beginner".to_owned(),
                duration: "30 min".to_owned(),
                exercises: vec![
                    exercise("Push-ups", 3, "12"),
                    exercise("Squats", 3, "15"),
                    exercise("Plank", 3, "30 seconds"),
                ],
            },
        ),
        curated(
            "curated-workout-upper-body",
            "Upper Body Strength",
            "Build pushing and pulling strength for chest, back and shoulders.",
            4.4,
            WorkoutPlanBody {
                difficulty: "intermediate".to_owned(),
                duration: "45 min".to_owned(),
                exercises: vec![
                    exercise("Push-ups", 4, "12"),
                    exercise("Pull-ups", 3, "8"),
                    exercise("Shoulder Press", 3, "10"),
                ],
            },
        ),
        curated(
            "curated-workout-leg-day",
            "Leg Day Builder",
            "Compound lower body lifts for strength and stability.",
            4.5,
            WorkoutPlanBody {
                difficulty: "intermediate".to_owned(),
                duration: "45 min".to_owned(),
                exercises: vec![
                    exercise("Squats", 4, "12"),
                    exercise("Lunges", 3, "10 each leg"),
                    exercise("Deadlifts", 3, "8"),
                ],
            },
        ),
        curated(
            "curated-workout-hiit",
            "HIIT Cardio Blast",
            "Short, intense intervals to raise your heart rate fast.",
            4.7,
            WorkoutPlanBody {
                difficulty: "advanced".to_owned(),
                duration: "20 min".to_owned(),
                exercises: vec![
                    exercise("Burpees", 4, "15"),
                    exercise("Mountain Climbers", 3, "20"),
                    exercise("Plank", 3, "45 seconds"),
                ],
            },
        ),
        curated(
            "curated-workout-core",
            "Core Foundations",
            "A quick daily routine for a stronger core.",
            4.2,
            WorkoutPlanBody {
                difficulty: "beginner".to_owned(),
                duration: "15 min".to_owned(),
                exercises: vec![
                    exercise("Plank", 3, "30 seconds"),
                    exercise("Mountain Climbers", 3, "15"),
                ],
            },
        ),
    ]
}

/// Curated meal plans
#[must_use]
pub fn curated_meals() -> Vec<MealCatalogEntry> {
    vec![
        curated(
            "curated-meal-balanced",
            "Balanced Day",
            "Three balanced meals with steady energy through the day.",
            4.5,
            MealPlanBody {
                dietary_category: "balanced".to_owned(),
                meals: vec![
                    meal(
                        "breakfast",
                        "Protein Oatmeal",
                        &["Rolled oats", "Protein powder", "Berries", "Almond milk"],
                        350.0,
                        (25.0, 40.0, 10.0),
                    ),
                    meal(
                        "lunch",
                        "Chicken Salad",
                        &["Grilled chicken", "Mixed greens", "Olive oil", "Cherry tomatoes"],
                        400.0,
                        (35.0, 15.0, 20.0),
                    ),
                    meal(
                        "dinner",
                        "Salmon with Quinoa",
                        &["Salmon fillet", "Quinoa", "Broccoli", "Lemon"],
                        450.0,
                        (30.0, 30.0, 20.0),
                    ),
                ],
            },
        ),
        curated(
            "curated-meal-high-protein",
            "High Protein Builder",
            "Protein-forward meals to support muscle gain.",
            4.4,
            MealPlanBody {
                dietary_category: "high-protein".to_owned(),
                meals: vec![
                    meal(
                        "breakfast",
                        "Egg White Scramble",
                        &["Egg whites", "Spinach", "Feta", "Whole grain toast"],
                        320.0,
                        (30.0, 20.0, 10.0),
                    ),
                    meal(
                        "lunch",
                        "Turkey Rice Bowl",
                        &["Ground turkey", "Brown rice", "Black beans", "Salsa"],
                        520.0,
                        (42.0, 50.0, 14.0),
                    ),
                    meal(
                        "snack",
                        "Greek Yogurt Parfait",
                        &["Greek yogurt", "Granola", "Honey"],
                        250.0,
                        (20.0, 28.0, 6.0),
                    ),
                ],
            },
        ),
        curated(
            "curated-meal-vegetarian",
            "Vegetarian Essentials",
            "Plant-based meals with complete protein sources.",
            4.3,
            MealPlanBody {
                dietary_category: "vegetarian".to_owned(),
                meals: vec![
                    meal(
                        "lunch",
                        "Lentil Soup",
                        &["Red lentils", "Carrots", "Cumin", "Vegetable stock"],
                        380.0,
                        (22.0, 55.0, 6.0),
                    ),
                    meal(
                        "dinner",
                        "Tofu Stir Fry",
                        &["Firm tofu", "Bell peppers", "Soy sauce", "Jasmine rice"],
                        480.0,
                        (26.0, 58.0, 14.0),
                    ),
                ],
            },
        ),
        curated(
            "curated-meal-low-carb",
            "Low Carb Lean",
            "Lower carbohydrate meals built around lean protein and vegetables.",
            4.1,
            MealPlanBody {
                dietary_category: "low-carb".to_owned(),
                meals: vec![
                    meal(
                        "lunch",
                        "Chicken Salad",
                        &["Grilled chicken", "Mixed greens", "Avocado", "Olive oil"],
                        420.0,
                        (36.0, 10.0, 26.0),
                    ),
                    meal(
                        "dinner",
                        "Steak with Greens",
                        &["Sirloin steak", "Asparagus", "Butter"],
                        540.0,
                        (45.0, 8.0, 34.0),
                    ),
                ],
            },
        ),
    ]
}
