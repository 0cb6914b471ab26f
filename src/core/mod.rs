//! # Core Navigation Logic
//!
//! Routes, the back stack, tab and splash machines, shared-element
//! correlation and the reducer that drives them. Nothing here knows about
//! any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │            CORE             │
//!                    │                             │
//!                    │  • RouteRegistry (routes)   │
//!                    │  • NavController (stack)    │
//!                    │  • TabMachine / Splash      │
//!                    │  • Action → update()        │
//!                    │                             │
//!                    │  No terminal. No drawing.   │
//!                    └──────────────┬──────────────┘
//!                                   │ observers
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │    TUI     │         │   Timer    │         │    Map     │
//!     │  Adapter   │         │  (tokio)   │         │collaborator│
//!     │ (ratatui)  │         │            │         │            │
//!     └────────────┘         └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: route declarations, parameter validation, deep-link paths
//! - [`controller`]: the back stack and everything hanging off its entries
//! - [`tabs`] / [`splash`]: the two transient UI state machines
//! - [`transition`]: shared-element tokens and the correlation decision
//! - [`state`] / [`action`]: the `App` struct and its reducer
//! - [`session`]: saving and restoring the back stack
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod location;
pub mod observer;
pub mod route;
pub mod scope;
pub mod session;
pub mod splash;
pub mod stack;
pub mod state;
pub mod tabs;
pub mod transition;

pub use controller::{NavController, NavEvent};
pub use entry::{EntryId, NavigationEntry};
pub use error::NavError;
pub use route::{ParamKind, ParamValue, Params, Route, RouteRegistry, params};
