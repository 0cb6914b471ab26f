//! # Splash Machine
//!
//! Two states, one transition, no way back:
//!
//! ```text
//! Shown ──dismiss──► Completed ──dismiss──► Completed (no-op)
//! ```
//!
//! `dismiss` is fed by the timer collaborator once the splash duration has
//! elapsed. Observers hear about the single real transition only.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::observer::{ObserverId, Observers};

/// How long the landing splash stays up before the timer fires.
pub const DEFAULT_SPLASH_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplashState {
    #[default]
    #[serde(rename = "shown")]
    Shown,
    #[serde(rename = "completed")]
    Completed,
}

#[derive(Debug, Default)]
pub struct SplashMachine {
    state: SplashState,
    observers: Observers<SplashState>,
}

impl SplashMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session whose splash already ran (or not).
    pub fn resume(state: SplashState) -> Self {
        Self {
            state,
            observers: Observers::default(),
        }
    }

    pub fn state(&self) -> SplashState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SplashState::Completed
    }

    /// Moves `Shown → Completed`. Returns whether a transition happened.
    pub fn dismiss(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        self.state = SplashState::Completed;
        debug!("Splash completed");
        self.observers.notify(&self.state);
        true
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SplashState) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}
