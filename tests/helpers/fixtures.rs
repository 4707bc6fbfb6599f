// ABOUTME: Profile, plan and gateway fixtures shared by integration tests
// ABOUTME: Provides a counting stub gateway and a scripted language model provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use fitcoach::errors::{AppError, ErrorCode, PlanError};
use fitcoach::llm::{ChatRequest, ChatResponse, LlmProvider};
use fitcoach::models::{DietPlan, Exercise, Meal, Plan, Profile, ProfileSubmission, WorkoutDay};
use fitcoach::plans::{ImageCaption, PlanGateway};

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The reference user from the product description
pub fn ana_submission() -> ProfileSubmission {
    ProfileSubmission {
        name: Some("Ana".into()),
        age: Some(30),
        gender: Some("female".into()),
        height: Some(165.0),
        weight: Some(60.0),
        fitness_goal: Some("weight-loss".into()),
        fitness_level: Some("beginner".into()),
        workout_location: Some("home".into()),
        dietary_preference: Some("vegetarian".into()),
        medical_history: None,
        stress_level: None,
    }
}

pub fn ana_profile() -> Profile {
    ana_submission().validate().expect("Ana is a complete profile")
}

pub fn meal(name: &str, items: &[&str], calories: Option<&str>) -> Meal {
    Meal {
        name: name.into(),
        items: items.iter().map(|&i| i.to_owned()).collect(),
        calories: calories.map(str::to_owned),
        protein: None,
    }
}

pub fn squats() -> Exercise {
    Exercise {
        name: "Squats".into(),
        sets: 3,
        reps: "10-12".into(),
        rest_time: "60 seconds".into(),
        notes: None,
    }
}

/// Seven days of squats with a simple vegetarian diet
pub fn sample_plan() -> Plan {
    Plan {
        workout_plan: DAYS
            .iter()
            .map(|&day| WorkoutDay {
                day: day.into(),
                exercises: vec![squats()],
            })
            .collect(),
        diet_plan: DietPlan {
            breakfast: meal("Oats", &["oats", "banana"], Some("400 kcal")),
            lunch: meal("Lentil salad", &["lentils", "spinach"], Some("550 kcal")),
            dinner: meal("Tofu stir fry", &["tofu", "broccoli"], None),
            snacks: meal("Yogurt", &["greek yogurt"], None),
        },
        tips: vec!["Drink water".into()],
        motivation: "Keep going".into(),
    }
}

pub fn sample_plan_json() -> String {
    serde_json::to_string(&sample_plan()).expect("plan serializes")
}

// ============================================================================
// Stub gateway
// ============================================================================

/// Gateway with canned results that counts every call
pub struct StubGateway {
    plan: Mutex<Result<Plan, PlanError>>,
    quote: Result<String, PlanError>,
    caption: Result<String, PlanError>,
    plan_calls: AtomicUsize,
    quote_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

pub fn upstream_failure() -> PlanError {
    PlanError::upstream(ErrorCode::ExternalServiceError, "stub upstream failure")
}

impl StubGateway {
    /// Every call succeeds
    pub fn succeeding() -> Self {
        Self {
            plan: Mutex::new(Ok(sample_plan())),
            quote: Ok("Small steps every day".into()),
            caption: Ok("A bowl of oats topped with banana slices".into()),
            plan_calls: AtomicUsize::new(0),
            quote_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails upstream
    pub fn failing() -> Self {
        Self {
            plan: Mutex::new(Err(upstream_failure())),
            quote: Err(upstream_failure()),
            caption: Err(upstream_failure()),
            ..Self::succeeding()
        }
    }

    /// Change what the next plan requests return
    pub fn set_plan(&self, result: Result<Plan, PlanError>) {
        *self.plan.lock().unwrap() = result;
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanGateway for StubGateway {
    async fn generate_plan(&self, _profile: &Profile) -> Result<Plan, PlanError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.plan.lock().unwrap().clone()
    }

    async fn motivation_quote(&self) -> Result<String, PlanError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.quote.clone()
    }

    async fn describe_image(&self, subject: &str) -> Result<ImageCaption, PlanError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.caption.clone().map(|description| ImageCaption {
            description,
            search_term: subject.to_owned(),
        })
    }
}

// ============================================================================
// Scripted provider
// ============================================================================

/// Provider that answers every completion with the same reply and records requests
pub struct ScriptedProvider {
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: request
                    .model
                    .clone()
                    .unwrap_or_else(|| self.default_model().to_owned()),
                usage: None,
                finish_reason: Some("STOP".into()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }
}
