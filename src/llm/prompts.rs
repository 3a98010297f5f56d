// ABOUTME: Prompt templates for workout plans, meal plans, and fitness advice
// ABOUTME: Renders a user profile into the chat request sent to the generation provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Generation Prompts
//!
//! Each builder returns a complete [`ChatRequest`] carrying the system prompt,
//! the rendered user prompt, and the sampling settings for that task.

use std::fmt::Write;

use super::{ChatMessage, ChatRequest};
use crate::models::{UserProfile, UserSettings};

/// Sampling temperature shared by every generation task
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Token cap for 7-day workout and meal plans
pub const PLAN_MAX_TOKENS: u32 = 2000;

/// Token cap for a single advice answer
pub const ADVICE_MAX_TOKENS: u32 = 1000;

/// System prompt for workout plan generation
pub const WORKOUT_SYSTEM_PROMPT: &str =
    "You are an expert fitness trainer who creates personalized workout plans based on user profiles.";

/// System prompt for meal plan generation
pub const MEAL_SYSTEM_PROMPT: &str = "You are an expert nutritionist who creates personalized meal plans based on user profiles and dietary preferences.";

/// System prompt for free-form advice
pub const ADVICE_SYSTEM_PROMPT: &str =
    "You are a knowledgeable fitness expert who provides personalized advice based on user profiles.";

const NOT_SPECIFIED: &str = "Not specified";

/// Request for a personalized 7-day workout plan
#[must_use]
pub fn workout_plan_request(profile: &UserProfile) -> ChatRequest {
    let mut prompt =
        String::from("Create a personalized 7-day workout plan for a user with the following profile:\n");
    write_body_metrics(&mut prompt, profile);
    push_line(&mut prompt, "Fitness Goals", text_or(profile.fitness_goals.as_deref(), "General fitness"));
    push_line(&mut prompt, "Activity Level", text_or(profile.activity_level.as_deref(), "Moderate"));
    prompt.push_str(
        "\nPlease structure the plan with:\n\
         1. A brief introduction explaining the benefits of this plan for their specific goals\n\
         2. Daily workouts with exercise names, sets, reps, and rest periods\n\
         3. Warm-up and cool-down recommendations\n\
         4. Weekly progression suggestions\n",
    );

    build(WORKOUT_SYSTEM_PROMPT, prompt, PLAN_MAX_TOKENS)
}

/// Request for a personalized 7-day meal plan
#[must_use]
pub fn meal_plan_request(profile: &UserProfile, settings: &UserSettings) -> ChatRequest {
    let mut prompt =
        String::from("Create a personalized 7-day meal plan for a user with the following profile:\n");
    write_body_metrics(&mut prompt, profile);
    push_line(&mut prompt, "Fitness Goals", text_or(profile.fitness_goals.as_deref(), "General fitness"));
    push_line(
        &mut prompt,
        "Dietary Restrictions",
        text_or(profile.dietary_restrictions.as_deref(), "None"),
    );
    let calories = settings
        .meal_preferences
        .calories
        .filter(|c| *c > 0)
        .map_or_else(|| NOT_SPECIFIED.to_owned(), |c| c.to_string());
    push_line(&mut prompt, "Daily Calorie Target", &calories);
    push_line(
        &mut prompt,
        "Macro Preference",
        text_or(Some(settings.meal_preferences.macro_preferences.as_str()), "Balanced"),
    );
    prompt.push_str(
        "\nPlease structure the plan with:\n\
         1. A brief introduction explaining how this meal plan supports their goals\n\
         2. Daily meal suggestions including breakfast, lunch, dinner, and snacks\n\
         3. Approximate calorie and macronutrient breakdown for each meal\n\
         4. A shopping list for the week\n\
         5. Simple preparation instructions for complex meals\n",
    );

    build(MEAL_SYSTEM_PROMPT, prompt, PLAN_MAX_TOKENS)
}

/// Request for advice answering `question` in the context of the profile
#[must_use]
pub fn advice_request(profile: &UserProfile, question: &str) -> ChatRequest {
    let mut prompt = String::from("User Profile:\n");
    write_body_metrics(&mut prompt, profile);
    push_line(&mut prompt, "Fitness Goals", text_or(profile.fitness_goals.as_deref(), "General fitness"));
    push_line(&mut prompt, "Activity Level", text_or(profile.activity_level.as_deref(), "Moderate"));
    let _ = write!(
        prompt,
        "\nUser Question: {}\n\n\
         Please provide a helpful, informative response that is tailored to this specific user's profile.\n",
        question.trim()
    );

    build(ADVICE_SYSTEM_PROMPT, prompt, ADVICE_MAX_TOKENS)
}

fn build(system: &str, user: String, max_tokens: u32) -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
        .with_temperature(GENERATION_TEMPERATURE)
        .with_max_tokens(max_tokens)
}

fn write_body_metrics(prompt: &mut String, profile: &UserProfile) {
    let age = profile
        .age
        .filter(|a| *a > 0)
        .map_or_else(|| NOT_SPECIFIED.to_owned(), |a| a.to_string());
    push_line(prompt, "Age", &age);
    let _ = writeln!(prompt, "- Weight: {} kg", number_or_unspecified(profile.weight));
    let _ = writeln!(prompt, "- Height: {} cm", number_or_unspecified(profile.height));
}

fn push_line(prompt: &mut String, label: &str, value: &str) {
    let _ = writeln!(prompt, "- {label}: {value}");
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn number_or_unspecified(value: Option<f64>) -> String {
    value
        .filter(|v| *v > 0.0)
        .map_or_else(|| NOT_SPECIFIED.to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;
    use chrono::Utc;

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new("u1", None, Utc::now());
        profile.age = Some(34);
        profile.weight = Some(72.5);
        profile.fitness_goals = Some("Build strength".to_owned());
        profile
    }

    #[test]
    fn test_workout_prompt_uses_defaults_for_missing_fields() {
        let request = workout_plan_request(&profile());
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[0].content, WORKOUT_SYSTEM_PROMPT);
        let user = &request.messages[1].content;
        assert!(user.contains("- Age: 34"));
        assert!(user.contains("- Weight: 72.5 kg"));
        assert!(user.contains("- Height: Not specified cm"));
        assert!(user.contains("- Fitness Goals: Build strength"));
        assert!(user.contains("- Activity Level: Moderate"));
        assert_eq!(request.max_tokens, Some(PLAN_MAX_TOKENS));
    }

    #[test]
    fn test_meal_prompt_includes_preferences() {
        let mut settings = UserSettings::default();
        settings.meal_preferences.calories = Some(2200);
        let request = meal_plan_request(&profile(), &settings);
        let user = &request.messages[1].content;
        assert!(user.contains("- Dietary Restrictions: None"));
        assert!(user.contains("- Daily Calorie Target: 2200"));
        assert!(user.contains("- Macro Preference: balanced"));
        assert!(user.contains("4. A shopping list for the week"));
    }

    #[test]
    fn test_advice_prompt_carries_question() {
        let request = advice_request(&profile(), "  How often should I rest?  ");
        let user = &request.messages[1].content;
        assert!(user.starts_with("User Profile:\n"));
        assert!(user.contains("User Question: How often should I rest?\n"));
        assert_eq!(request.max_tokens, Some(ADVICE_MAX_TOKENS));
        assert_eq!(request.temperature, Some(GENERATION_TEMPERATURE));
    }
}
