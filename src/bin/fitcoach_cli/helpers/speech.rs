// ABOUTME: Terminal speech sink for fitcoach-cli narration
// ABOUTME: Prints each sentence and pauses for roughly the time it would take to say it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::time::Duration;

use async_trait::async_trait;
use fitcoach::{
    errors::AppResult,
    export::{SpeechSink, Voice},
};
use tokio::io::{self, AsyncWriteExt};
use tokio::time;

/// Speaking speed at rate 1.0
const WORDS_PER_MINUTE: f32 = 160.0;

/// Prints sentences with speech-like pacing
pub struct TerminalSpeech {
    pace: f32,
}

impl TerminalSpeech {
    /// `pace` scales the pause after each sentence; 0 disables pausing
    pub const fn new(pace: f32) -> Self {
        Self { pace }
    }

    fn pause_for(&self, sentence: &str, voice: &Voice) -> Duration {
        if self.pace <= 0.0 || voice.rate <= 0.0 {
            return Duration::ZERO;
        }
        let words = sentence.split_whitespace().count() as f32;
        Duration::try_from_secs_f32(words * 60.0 / (WORDS_PER_MINUTE * voice.rate) * self.pace)
            .unwrap_or(Duration::ZERO)
    }
}

#[async_trait]
impl SpeechSink for TerminalSpeech {
    async fn speak(&self, sentence: &str, voice: &Voice) -> AppResult<()> {
        let mut stdout = io::stdout();
        stdout.write_all(sentence.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        time::sleep(self.pause_for(sentence, voice)).await;
        Ok(())
    }
}
