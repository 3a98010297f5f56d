// ABOUTME: Parsing of user-submitted catalog plans into structured entries
// ABOUTME: Handles the free-text exercise list and the JSON-encoded meal list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Meal, MealPlanBody, WorkoutPlanBody};

/// A list field given either as submitted text or already structured
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField<T> {
    Text(String),
    Structured(Vec<T>),
}

/// Workout plan as submitted by a user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSubmission {
    /// Plan title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// beginner, intermediate, advanced
    pub difficulty: String,
    /// e.g. "30 min"
    pub duration: String,
    exercises: ListField<Exercise>,
}

/// Meal plan as submitted by a user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSubmission {
    /// Plan title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// balanced, vegetarian, ...
    pub dietary_category: String,
    meals: ListField<Meal>,
}

impl WorkoutSubmission {
    /// Decode a raw request body
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the body does not have the submission shape
    /// or a required text field is blank.
    pub fn from_value(raw: Value) -> AppResult<Self> {
        let submission: Self = serde_json::from_value(raw)
            .map_err(|e| AppError::invalid_input(format!("Invalid workout plan submission: {e}")))?;
        require("title", &submission.title)?;
        require("difficulty", &submission.difficulty)?;
        require("duration", &submission.duration)?;
        Ok(submission)
    }

    /// Structured body with the exercise list parsed
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if an exercise line is malformed or the list is empty.
    pub fn into_body(self) -> AppResult<(String, String, WorkoutPlanBody)> {
        let exercises = match self.exercises {
            ListField::Text(text) => parse_exercise_lines(&text)?,
            ListField::Structured(list) => list,
        };
        if exercises.is_empty() {
            return Err(AppError::invalid_format(
                "A workout plan needs at least one exercise",
            ));
        }
        Ok((
            self.title.trim().to_owned(),
            self.description.trim().to_owned(),
            WorkoutPlanBody {
                difficulty: self.difficulty.trim().to_owned(),
                duration: self.duration.trim().to_owned(),
                exercises,
            },
        ))
    }
}

impl MealSubmission {
    /// Decode a raw request body
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the body does not have the submission shape
    /// or a required text field is blank.
    pub fn from_value(raw: Value) -> AppResult<Self> {
        let submission: Self = serde_json::from_value(raw)
            .map_err(|e| AppError::invalid_input(format!("Invalid meal plan submission: {e}")))?;
        require("title", &submission.title)?;
        require("dietaryCategory", &submission.dietary_category)?;
        Ok(submission)
    }

    /// Structured body with the meal list parsed
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the meal list is not a valid JSON array of meals or is empty.
    pub fn into_body(self) -> AppResult<(String, String, MealPlanBody)> {
        let meals = match self.meals {
            ListField::Text(text) => parse_meal_list(&text)?,
            ListField::Structured(list) => list,
        };
        if meals.is_empty() {
            return Err(AppError::invalid_format("A meal plan needs at least one meal"));
        }
        Ok((
            self.title.trim().to_owned(),
            self.description.trim().to_owned(),
            MealPlanBody {
                dietary_category: self.dietary_category.trim().to_owned(),
                meals,
            },
        ))
    }
}

/// Parse one exercise per line as `name, sets, reps`
///
/// Blank lines are skipped. `reps` keeps everything after the second comma,
/// so `Plank, 3, 30 seconds` is accepted.
///
/// # Errors
///
/// Returns `InvalidFormat` naming the offending line.
pub fn parse_exercise_lines(text: &str) -> AppResult<Vec<Exercise>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_exercise_line(index + 1, line))
        .collect()
}

fn parse_exercise_line(line_number: usize, line: &str) -> AppResult<Exercise> {
    let mut parts = line.splitn(3, ',').map(str::trim);
    let (Some(name), Some(sets), Some(reps)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::invalid_format(format!(
            "Exercise line {line_number} must be 'name, sets, reps'"
        )));
    };
    if name.is_empty() || reps.is_empty() {
        return Err(AppError::invalid_format(format!(
            "Exercise line {line_number} must be 'name, sets, reps'"
        )));
    }
    let sets = sets.parse::<u32>().map_err(|_| {
        AppError::invalid_format(format!(
            "Exercise line {line_number}: sets must be a whole number, got '{sets}'"
        ))
    })?;
    Ok(Exercise {
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
    })
}

/// Parse a JSON-encoded array of meals
///
/// # Errors
///
/// Returns `InvalidFormat` if the text is not a JSON array of meal objects.
pub fn parse_meal_list(text: &str) -> AppResult<Vec<Meal>> {
    serde_json::from_str(text)
        .map_err(|e| AppError::invalid_format(format!("Meals must be a JSON array of meals: {e}")))
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}
