//! Navgraph library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod graphs;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which sample navigation graph to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleApp {
    #[default]
    Crane,
    Jetsnack,
}

impl SampleApp {
    /// Lowercase name, as used in config files and session file names.
    pub fn key(self) -> &'static str {
        match self {
            SampleApp::Crane => "crane",
            SampleApp::Jetsnack => "jetsnack",
        }
    }
}
