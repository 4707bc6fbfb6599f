// ABOUTME: Read-aloud scripts for the workout and diet sections of a plan
// ABOUTME: Narrator drives a SpeechSink sentence by sentence and can be stopped from another task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Plan Narration
//!
//! [`workout_script`] and [`diet_script`] turn a plan into spoken text.
//! [`Narrator::narrate`] feeds that text to a [`SpeechSink`] one sentence at
//! a time. Starting a narration cancels nothing by itself; a caller that
//! wants to interrupt holds a [`NarrationHandle`] and calls
//! [`NarrationHandle::stop`].

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::{debug, instrument, Span};

use crate::errors::AppResult;
use crate::models::Plan;

/// Speaking rate used for plan narration
pub const SPEECH_RATE: f32 = 0.9;
/// Voice pitch used for plan narration
pub const SPEECH_PITCH: f32 = 1.0;
/// Output volume used for plan narration
pub const SPEECH_VOLUME: f32 = 1.0;

/// Voice settings passed to the sink with every sentence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    /// Relative speaking rate
    pub rate: f32,
    /// Relative pitch
    pub pitch: f32,
    /// Volume between 0 and 1
    pub volume: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            volume: SPEECH_VOLUME,
        }
    }
}

/// Which part of the plan to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSection {
    /// Seven-day workout schedule
    Workout,
    /// Meals
    Diet,
}

impl PlanSection {
    /// Script for this section of `plan`
    #[must_use]
    pub fn script(self, plan: &Plan) -> String {
        match self {
            Self::Workout => workout_script(plan),
            Self::Diet => diet_script(plan),
        }
    }
}

/// Spoken form of the workout schedule
#[must_use]
pub fn workout_script(plan: &Plan) -> String {
    let mut text = String::from("Your workout plan for the week. ");
    for day in &plan.workout_plan {
        let _ = write!(text, "{}. ", day.day);
        for exercise in &day.exercises {
            let _ = write!(
                text,
                "{}, {} sets of {} reps, rest for {}. ",
                exercise.name, exercise.sets, exercise.reps, exercise.rest_time
            );
        }
    }
    text
}

/// Spoken form of the diet plan
#[must_use]
pub fn diet_script(plan: &Plan) -> String {
    let mut text = String::from("Your diet plan. ");
    for (kind, meal) in plan.diet_plan.meals() {
        let _ = write!(
            text,
            "{kind}. {}. It includes {}. ",
            meal.name,
            meal.items.join(", ")
        );
        if let Some(calories) = meal.calories.as_deref().filter(|c| !c.is_empty()) {
            let _ = write!(text, "Approximately {calories}. ");
        }
    }
    text
}

/// Split a script into the sentences handed to the sink
#[must_use]
pub fn sentences(script: &str) -> Vec<&str> {
    script
        .split_inclusive(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Something that can say a sentence out loud
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Speak one sentence, returning once it has been spoken
    ///
    /// # Errors
    ///
    /// Returns an error when the output device fails
    async fn speak(&self, sentence: &str, voice: &Voice) -> AppResult<()>;
}

/// How a narration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// Every sentence was spoken
    Completed,
    /// A stop request interrupted the narration
    Stopped,
}

#[derive(Debug, Default)]
struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

/// Cancels the narration of the [`Narrator`] it was taken from
#[derive(Debug, Clone)]
pub struct NarrationHandle {
    signal: Arc<StopSignal>,
}

impl NarrationHandle {
    /// Interrupt the current narration; the sentence in progress is abandoned
    pub fn stop(&self) {
        self.signal.stopped.store(true, Ordering::SeqCst);
        self.signal.notify.notify_waiters();
    }
}

/// Reads scripts aloud through a [`SpeechSink`]
pub struct Narrator<S> {
    sink: S,
    voice: Voice,
    signal: Arc<StopSignal>,
}

impl<S: SpeechSink> Narrator<S> {
    /// Narrator with the default voice
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            voice: Voice::default(),
            signal: Arc::new(StopSignal::default()),
        }
    }

    /// Override the voice settings
    #[must_use]
    pub const fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    /// Voice passed to the sink
    #[must_use]
    pub const fn voice(&self) -> &Voice {
        &self.voice
    }

    /// Handle for stopping narrations from another task
    #[must_use]
    pub fn handle(&self) -> NarrationHandle {
        NarrationHandle {
            signal: Arc::clone(&self.signal),
        }
    }

    /// Speak `script` sentence by sentence until done or stopped.
    ///
    /// Any earlier stop request is cleared when a new narration starts.
    ///
    /// # Errors
    ///
    /// Propagates the first sink failure
    #[instrument(skip_all, fields(sentences))]
    pub async fn narrate(&self, script: &str) -> AppResult<NarrationOutcome> {
        self.signal.stopped.store(false, Ordering::SeqCst);
        let parts = sentences(script);
        Span::current().record("sentences", parts.len());

        for sentence in parts {
            let stop = self.signal.notify.notified();
            if self.signal.stopped.load(Ordering::SeqCst) {
                debug!("Narration stopped");
                return Ok(NarrationOutcome::Stopped);
            }
            tokio::select! {
                biased;
                () = stop => {
                    debug!("Narration stopped mid-sentence");
                    return Ok(NarrationOutcome::Stopped);
                }
                spoken = self.sink.speak(sentence, &self.voice) => spoken?,
            }
        }
        Ok(NarrationOutcome::Completed)
    }

    /// Read one section of a plan
    ///
    /// # Errors
    ///
    /// Propagates the first sink failure
    pub async fn narrate_section(&self, plan: &Plan, section: PlanSection) -> AppResult<NarrationOutcome> {
        self.narrate(&section.script(plan)).await
    }
}
