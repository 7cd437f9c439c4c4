//! Launch state entity.
//!
//! ## 状態遷移
//!
//! ```text
//! Idle (is_launched = false) --20th distinct click--> Launched (is_launched = true)
//!        ^                                                   |
//!        +-------------------- reset ------------------------+
//! ```
//!
//! `reveal` は上記と直交しており、どちらの状態でも `reveal_complete` を立てる。

use super::value_object::{ParticipantToken, Timestamp};

/// Number of distinct participants required to launch.
pub const LAUNCH_THRESHOLD: usize = 20;

/// Events accepted by the launch state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEvent {
    /// A participant pressed the launch button
    Click(ParticipantToken),
    /// The reveal animation finished
    Reveal,
    /// Start over from the initial state
    Reset,
}

/// Shared launch state
///
/// `click_count` is derived from `participants`, and `launch_time` is only
/// written inside the launch transition, so both invariants hold for every
/// value reachable through the public operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchState {
    participants: Vec<ParticipantToken>,
    is_launched: bool,
    launch_time: Option<Timestamp>,
    reveal_complete: bool,
}

impl LaunchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_launched(&self) -> bool {
        self.is_launched
    }

    /// Accepted participants in click order
    pub fn participants(&self) -> &[ParticipantToken] {
        &self.participants
    }

    pub fn launch_time(&self) -> Option<Timestamp> {
        self.launch_time
    }

    pub fn reveal_complete(&self) -> bool {
        self.reveal_complete
    }

    pub fn has_participant(&self, token: &ParticipantToken) -> bool {
        self.participants.contains(token)
    }

    /// Dispatch an event. Returns `true` when the state changed.
    pub fn apply(&mut self, event: LaunchEvent, now: Timestamp) -> bool {
        match event {
            LaunchEvent::Click(token) => self.apply_click(token, now),
            LaunchEvent::Reveal => self.apply_reveal(),
            LaunchEvent::Reset => self.apply_reset(),
        }
    }

    /// Record a click.
    ///
    /// No-op once launched, and for tokens that already clicked. The
    /// threshold is checked after the append, so the click that reaches
    /// [`LAUNCH_THRESHOLD`] is itself part of `participants` at launch.
    pub fn apply_click(&mut self, token: ParticipantToken, now: Timestamp) -> bool {
        if self.is_launched || self.has_participant(&token) {
            return false;
        }

        self.participants.push(token);

        if self.click_count() >= LAUNCH_THRESHOLD {
            self.is_launched = true;
            self.launch_time = Some(now);
        }

        true
    }

    /// Mark the reveal as complete. Always reported as a change.
    pub fn apply_reveal(&mut self) -> bool {
        self.reveal_complete = true;
        true
    }

    /// Restore the initial state. Always reported as a change.
    pub fn apply_reset(&mut self) -> bool {
        *self = Self::default();
        true
    }
}
