//! # Navigation Errors
//!
//! Every variant here is a programmer error: a screen asked to go somewhere
//! the graph does not declare, or passed arguments the route does not accept.
//! None of them are retryable. Callers propagate them with `?` and the
//! adapter aborts, so a broken graph fails loudly instead of rendering garbage.

use std::fmt;

use crate::core::route::ParamKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// No route with this identifier was registered.
    UnknownRoute(String),
    /// A required parameter was not supplied.
    MissingParameter { route: String, param: String },
    /// A parameter the route does not declare was supplied.
    UnknownParameter { route: String, param: String },
    /// A declared parameter was supplied with a value of the wrong kind.
    InvalidParameter {
        route: String,
        param: String,
        expected: ParamKind,
    },
    /// `get_back_stack_entry` (or a tab selection) found no matching entry.
    RouteNotOnStack(String),
    /// A route identifier was registered twice.
    DuplicateRoute(String),
    /// A route declares the same parameter name twice.
    DuplicateParameter { route: String, param: String },
    /// A route identifier is empty or contains path syntax.
    InvalidRouteId(String),
    /// A deep-link path could not be parsed.
    MalformedPath(String),
    /// A saved stack had no root entry to restore.
    EmptyStack,
    /// A tab was selected on a controller with no tabbed screen declared.
    NoTabHost,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownRoute(id) => write!(f, "unknown route: {id}"),
            NavError::MissingParameter { route, param } => {
                write!(f, "route '{route}' requires parameter '{param}'")
            }
            NavError::UnknownParameter { route, param } => {
                write!(f, "route '{route}' does not declare parameter '{param}'")
            }
            NavError::InvalidParameter {
                route,
                param,
                expected,
            } => write!(
                f,
                "parameter '{param}' of route '{route}' must be {}",
                expected.label()
            ),
            NavError::RouteNotOnStack(id) => write!(f, "route not on back stack: {id}"),
            NavError::DuplicateRoute(id) => write!(f, "route registered twice: {id}"),
            NavError::DuplicateParameter { route, param } => {
                write!(f, "route '{route}' declares parameter '{param}' twice")
            }
            NavError::InvalidRouteId(id) => write!(f, "invalid route identifier: '{id}'"),
            NavError::MalformedPath(path) => write!(f, "malformed route path: '{path}'"),
            NavError::EmptyStack => write!(f, "cannot restore an empty back stack"),
            NavError::NoTabHost => write!(f, "no tabbed screen is declared"),
        }
    }
}

impl std::error::Error for NavError {}
