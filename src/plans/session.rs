// ABOUTME: Plan session orchestrating validate, generate, normalize and persist
// ABOUTME: Owns the current profile/plan pair and publishes its state on a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Plan Session
//!
//! A session starts `Empty`, becomes `Ready` after a successful generation
//! or a successful restore, and returns to `Empty` on reset. A failed
//! generation never touches the current pair. Mutating operations take
//! `&mut self`, so one session cannot have two plan requests in flight.

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use super::gateway::{quote_or_fallback, ImageCaption, PlanGateway};
use super::storage::{PlanStore, SavedSession};
use crate::errors::PlanError;
use crate::models::{Plan, Profile, ProfileSubmission};

/// Where the session sits in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No current plan
    Empty,
    /// A plan is available
    Ready,
}

/// Progress notifications for presentation code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    /// No current plan
    Empty,
    /// A plan request is in flight
    Loading,
    /// A plan is available
    Ready,
    /// The last plan request failed; any previous plan is still current
    Failed(String),
}

/// Orchestrates plan requests for one user
pub struct PlanSession<G, S> {
    gateway: G,
    store: S,
    current: Option<SavedSession>,
    /// A reset could not clear the store; saved state is stale until cleared or overwritten
    clear_pending: bool,
    signal: watch::Sender<SessionSignal>,
}

impl<G: PlanGateway, S: PlanStore> PlanSession<G, S> {
    /// Create an empty session
    #[must_use]
    pub fn new(gateway: G, store: S) -> Self {
        let (signal, _) = watch::channel(SessionSignal::Empty);
        Self {
            gateway,
            store,
            current: None,
            clear_pending: false,
            signal,
        }
    }

    /// Receive state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSignal> {
        self.signal.subscribe()
    }

    /// Current state machine position
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.current.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Empty
        }
    }

    /// Current profile, if any
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.current.as_ref().map(|c| &c.profile)
    }

    /// Current plan, if any
    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        self.current.as_ref().map(|c| &c.plan)
    }

    /// The gateway this session calls
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The store this session mirrors into
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn publish_phase(&self) {
        let signal = match self.phase() {
            SessionPhase::Empty => SessionSignal::Empty,
            SessionPhase::Ready => SessionSignal::Ready,
        };
        self.signal.send_replace(signal);
    }

    /// Restore a previously saved pair.
    ///
    /// Missing, unreadable or malformed saved state leaves the session empty.
    /// After a reset whose clear failed, the clear is retried and nothing is
    /// restored.
    #[instrument(skip(self))]
    pub async fn load_persisted(&mut self) -> SessionPhase {
        if self.clear_pending {
            self.clear_store().await;
            self.current = None;
            self.publish_phase();
            return self.phase();
        }

        self.current = match self.store.load().await {
            Ok(Some(saved)) => match saved.plan.check_shape() {
                Ok(()) => {
                    info!("Restored saved plan");
                    Some(saved)
                }
                Err(problems) => {
                    warn!(problems = ?problems, "Ignoring saved plan with invalid shape");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable saved plan");
                None
            }
        };
        self.publish_phase();
        self.phase()
    }

    /// Validate a submission, generate a plan and make it current.
    ///
    /// A failure leaves the previous pair, if any, untouched. Persisting the
    /// new pair is best effort: a store failure is logged only.
    ///
    /// # Errors
    ///
    /// `Validation` before any network call when required fields are
    /// missing; `Upstream` or `MalformedResponse` from the gateway.
    #[instrument(skip_all)]
    pub async fn request_plan(&mut self, submission: &ProfileSubmission) -> Result<&Plan, PlanError> {
        let profile = match submission.validate() {
            Ok(profile) => profile,
            Err(e) => {
                self.signal.send_replace(SessionSignal::Failed(e.to_string()));
                return Err(e);
            }
        };

        self.signal.send_replace(SessionSignal::Loading);

        let plan = match self.gateway.generate_plan(&profile).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Plan request failed");
                self.signal.send_replace(SessionSignal::Failed(e.to_string()));
                return Err(e);
            }
        };

        let saved = SavedSession { profile, plan };
        match self.store.save(&saved).await {
            Ok(()) => self.clear_pending = false,
            Err(e) => warn!(error = %e, "Generated plan could not be persisted"),
        }

        self.signal.send_replace(SessionSignal::Ready);
        Ok(&self.current.insert(saved).plan)
    }

    /// Forget the current pair and clear saved state. Always succeeds.
    ///
    /// When the store cannot be cleared, this session stops restoring from
    /// it until a later clear or save succeeds.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) {
        self.current = None;
        self.clear_store().await;
        self.publish_phase();
    }

    async fn clear_store(&mut self) {
        match self.store.clear().await {
            Ok(()) => self.clear_pending = false,
            Err(e) => {
                warn!(error = %e, "Saved plan could not be cleared");
                self.clear_pending = true;
            }
        }
    }

    /// A motivational quote, falling back to a fixed line on failure
    pub async fn request_motivation_quote(&self) -> String {
        quote_or_fallback(&self.gateway).await
    }

    /// Caption for an illustrative image
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn describe_image(&self, subject: &str) -> Result<ImageCaption, PlanError> {
        self.gateway.describe_image(subject).await
    }
}
