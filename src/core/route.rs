//! # Routes
//!
//! A `Route` is a named destination plus the parameters it accepts.
//! Routes are declared once at start-up in a `RouteRegistry`; after that the
//! registry is handed to the controller behind an `Arc` and never changes.
//!
//! ```text
//! Route "snack"
//! ├── snackId: Int  (required)  → path segment   snack/42
//! └── origin:  Str  (optional)  → query string   ?origin=feed
//!
//! pattern:  snack/{snackId}?origin={origin}
//! ```
//!
//! Parameter values are identifiers only (ids, names, short keys). Domain
//! objects stay with the view-model layer and are looked up by id.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::NavError;

/// Characters that would make a route identifier ambiguous inside a path.
const RESERVED_ID_CHARS: &[char] = &['/', '?', '&', '=', '{', '}'];

/// Characters a string value may not contain, or its path would not parse back.
const RESERVED_VALUE_CHARS: &[char] = &['/', '?', '&', '='];

// ============================================================================
// Parameter values
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    #[serde(rename = "string")]
    Str,
    #[serde(rename = "int")]
    Int,
}

impl ParamKind {
    pub fn label(self) -> &'static str {
        match self {
            ParamKind::Str => "a non-empty string without '/', '?', '&' or '='",
            ParamKind::Int => "an integer",
        }
    }

    /// Parses a raw path or query value into a value of this kind.
    pub fn parse(self, raw: &str) -> Option<ParamValue> {
        match self {
            ParamKind::Str => Some(ParamValue::Str(raw.to_string())),
            ParamKind::Int => raw.parse().ok().map(ParamValue::Int),
        }
    }
}

/// A resolved parameter value. Untagged so saved stacks read naturally:
/// `{"snackId": 3, "origin": "feed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Str(_) => ParamKind::Str,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    /// Whether the value renders into a path that parses back to itself.
    fn is_path_safe(&self) -> bool {
        match self {
            ParamValue::Int(_) => true,
            ParamValue::Str(s) => !s.is_empty() && !s.contains(RESERVED_VALUE_CHARS),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

/// Parameter name → value for one instantiation of a route.
pub type Params = BTreeMap<String, ParamValue>;

/// Builds a `Params` map from `(name, value)` pairs.
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// ============================================================================
// Route
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: String,
    params: Vec<ParamSpec>,
}

impl Route {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: Vec::new(),
        }
    }

    /// Declares a required parameter. Required parameters become path segments.
    pub fn required(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Declares an optional parameter. Optional parameters go in the query string.
    pub fn optional(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared parameters, in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }

    fn optional_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| !p.required)
    }

    /// Checks a parameter set against the declaration.
    ///
    /// Undeclared names are reported first, then kind mismatches and string
    /// values that cannot be written into a path, then missing required
    /// parameters.
    pub fn validate(&self, params: &Params) -> Result<(), NavError> {
        for (name, value) in params {
            let spec = self.param(name).ok_or_else(|| NavError::UnknownParameter {
                route: self.id.clone(),
                param: name.clone(),
            })?;
            if value.kind() != spec.kind || !value.is_path_safe() {
                return Err(NavError::InvalidParameter {
                    route: self.id.clone(),
                    param: name.clone(),
                    expected: spec.kind,
                });
            }
        }
        if let Some(missing) = self.required_params().find(|p| !params.contains_key(&p.name)) {
            return Err(NavError::MissingParameter {
                route: self.id.clone(),
                param: missing.name.clone(),
            });
        }
        Ok(())
    }

    /// The route's path template, e.g. `snack/{snackId}?origin={origin}`.
    pub fn pattern(&self) -> String {
        let mut out = self.id.clone();
        for spec in self.required_params() {
            out.push_str(&format!("/{{{}}}", spec.name));
        }
        let query: Vec<String> = self
            .optional_params()
            .map(|spec| format!("{0}={{{0}}}", spec.name))
            .collect();
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query.join("&"));
        }
        out
    }

    /// Renders a concrete path for already-validated parameters.
    /// Absent optional parameters are left out of the query string.
    pub fn format_path(&self, params: &Params) -> String {
        let mut out = self.id.clone();
        for spec in self.required_params() {
            if let Some(value) = params.get(&spec.name) {
                out.push_str(&format!("/{value}"));
            }
        }
        let query: Vec<String> = self
            .optional_params()
            .filter_map(|spec| params.get(&spec.name).map(|v| format!("{}={v}", spec.name)))
            .collect();
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query.join("&"));
        }
        out
    }
}

fn is_valid_route_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(RESERVED_ID_CHARS)
        && !id.chars().any(char::is_whitespace)
}

// ============================================================================
// Registry
// ============================================================================

/// All destinations an app can navigate to, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route. Start-up only: once the registry is shared with a
    /// controller there is no way to reach this again.
    pub fn register(&mut self, route: Route) -> Result<(), NavError> {
        if !is_valid_route_id(route.id()) {
            return Err(NavError::InvalidRouteId(route.id().to_string()));
        }
        if self.routes.iter().any(|r| r.id() == route.id()) {
            return Err(NavError::DuplicateRoute(route.id().to_string()));
        }
        for (i, spec) in route.params().iter().enumerate() {
            if route.params()[..i].iter().any(|p| p.name == spec.name) {
                return Err(NavError::DuplicateParameter {
                    route: route.id().to_string(),
                    param: spec.name.clone(),
                });
            }
        }
        log::debug!("Registered route {}", route.pattern());
        self.routes.push(route);
        Ok(())
    }

    pub fn resolve(&self, id: &str) -> Result<&Route, NavError> {
        self.routes
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| NavError::UnknownRoute(id.to_string()))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Parses a deep-link path such as `snack/3?origin=feed` into its route
    /// and validated parameters.
    pub fn match_path(&self, path: &str) -> Result<(&Route, Params), NavError> {
        let (head, query) = match path.split_once('?') {
            Some((head, query)) => (head, Some(query)),
            None => (path, None),
        };

        let mut segments = head.split('/');
        let id = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed(path))?;
        let route = self.resolve(id)?;

        let mut parsed = Params::new();
        let mut required = route.required_params();
        for segment in segments {
            let spec = required.next().ok_or_else(|| malformed(path))?;
            if segment.is_empty() {
                return Err(malformed(path));
            }
            parsed.insert(spec.name.clone(), parse_value(route, spec, segment)?);
        }

        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let (name, raw) = pair.split_once('=').ok_or_else(|| malformed(path))?;
            let spec = route.param(name).ok_or_else(|| NavError::UnknownParameter {
                route: route.id().to_string(),
                param: name.to_string(),
            })?;
            parsed.insert(spec.name.clone(), parse_value(route, spec, raw)?);
        }

        route.validate(&parsed)?;
        Ok((route, parsed))
    }
}

fn malformed(path: &str) -> NavError {
    NavError::MalformedPath(path.to_string())
}

fn parse_value(route: &Route, spec: &ParamSpec, raw: &str) -> Result<ParamValue, NavError> {
    spec.kind.parse(raw).ok_or_else(|| NavError::InvalidParameter {
        route: route.id().to_string(),
        param: spec.name.clone(),
        expected: spec.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snack_route() -> Route {
        Route::new("snack")
            .required("snackId", ParamKind::Int)
            .optional("origin", ParamKind::Str)
    }

    fn registry() -> RouteRegistry {
        let mut registry = RouteRegistry::new();
        registry.register(Route::new("home")).unwrap();
        registry.register(snack_route()).unwrap();
        registry
    }

    #[test]
    fn test_resolve_unknown_route() {
        let registry = registry();
        assert_eq!(
            registry.resolve("cart"),
            Err(NavError::UnknownRoute("cart".into()))
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry();
        assert_eq!(
            registry.register(Route::new("home")),
            Err(NavError::DuplicateRoute("home".into()))
        );
        assert_eq!(registry.routes().len(), 2);
    }

    #[test]
    fn test_register_rejects_path_syntax_in_id() {
        let mut registry = RouteRegistry::new();
        assert!(matches!(
            registry.register(Route::new("home/feed")),
            Err(NavError::InvalidRouteId(_))
        ));
        assert!(matches!(
            registry.register(Route::new("")),
            Err(NavError::InvalidRouteId(_))
        ));
    }

    #[test]
    fn test_register_rejects_repeated_param() {
        let mut registry = RouteRegistry::new();
        let route = Route::new("details")
            .required("itemId", ParamKind::Str)
            .optional("itemId", ParamKind::Str);
        assert_eq!(
            registry.register(route),
            Err(NavError::DuplicateParameter {
                route: "details".into(),
                param: "itemId".into(),
            })
        );
        assert!(registry.routes().is_empty());
    }

    #[test]
    fn test_validate_rejects_values_that_break_the_path() {
        let route = Route::new("details").required("itemId", ParamKind::Str);
        for bad in ["", "a/b", "a?b", "a&b", "a=b"] {
            assert_eq!(
                route.validate(&params([("itemId", bad)])),
                Err(NavError::InvalidParameter {
                    route: "details".into(),
                    param: "itemId".into(),
                    expected: ParamKind::Str,
                }),
                "{bad:?} accepted"
            );
        }
        assert!(route.validate(&params([("itemId", "naples")])).is_ok());
    }

    #[test]
    fn test_empty_query_value_is_rejected() {
        let registry = registry();
        assert!(matches!(
            registry.match_path("snack/1?origin="),
            Err(NavError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_missing_required() {
        let err = snack_route().validate(&Params::new()).unwrap_err();
        assert_eq!(
            err,
            NavError::MissingParameter {
                route: "snack".into(),
                param: "snackId".into()
            }
        );
    }

    #[test]
    fn test_validate_unknown_param() {
        let p = params([("snackId", ParamValue::Int(1)), ("colour", "red".into())]);
        assert!(matches!(
            snack_route().validate(&p),
            Err(NavError::UnknownParameter { param, .. }) if param == "colour"
        ));
    }

    #[test]
    fn test_validate_wrong_kind() {
        let p = params([("snackId", "three")]);
        assert!(matches!(
            snack_route().validate(&p),
            Err(NavError::InvalidParameter { expected: ParamKind::Int, .. })
        ));
    }

    #[test]
    fn test_optional_may_be_omitted() {
        let p = params([("snackId", 4_i64)]);
        assert!(snack_route().validate(&p).is_ok());
    }

    #[test]
    fn test_pattern_and_path() {
        let route = snack_route();
        assert_eq!(route.pattern(), "snack/{snackId}?origin={origin}");

        let p = params([
            ("snackId", ParamValue::Int(3)),
            ("origin", ParamValue::from("feed")),
        ]);
        assert_eq!(route.format_path(&p), "snack/3?origin=feed");
        assert_eq!(
            route.format_path(&params([("snackId", 3_i64)])),
            "snack/3"
        );
    }

    #[test]
    fn test_match_path_parses_segments_and_query() {
        let registry = registry();
        let (route, parsed) = registry.match_path("snack/3?origin=feed").unwrap();
        assert_eq!(route.id(), "snack");
        assert_eq!(parsed.get("snackId"), Some(&ParamValue::Int(3)));
        assert_eq!(parsed.get("origin").and_then(|v| v.as_str()), Some("feed"));
    }

    #[test]
    fn test_match_path_errors() {
        let registry = registry();
        assert!(matches!(
            registry.match_path("snack"),
            Err(NavError::MissingParameter { .. })
        ));
        assert!(matches!(
            registry.match_path("snack/abc"),
            Err(NavError::InvalidParameter { .. })
        ));
        assert!(matches!(
            registry.match_path("snack/1/2"),
            Err(NavError::MalformedPath(_))
        ));
        assert!(matches!(
            registry.match_path("snack/1?origin"),
            Err(NavError::MalformedPath(_))
        ));
        assert!(matches!(
            registry.match_path("/snack"),
            Err(NavError::MalformedPath(_))
        ));
        assert!(matches!(
            registry.match_path("basket"),
            Err(NavError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_param_value_serializes_untagged() {
        let p = params([
            ("snackId", ParamValue::Int(3)),
            ("origin", ParamValue::from("feed")),
        ]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"origin":"feed","snackId":3}"#);
        let back: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
