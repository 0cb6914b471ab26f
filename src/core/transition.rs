//! # Shared-Element Correlation
//!
//! When a list item is tapped the controller mints a `SharedElementToken`
//! naming the item and the screen it was tapped on. The detail entry carries
//! the token; the renderer asks [`correlate`] whether the item-to-detail
//! animation should run. Only the decision lives here, never the animation.
//!
//! ```text
//! tap snack 3 on "feed"
//!   └─ mint token{key, snackId=3, origin=feed}
//!        └─ push snack/3?origin=feed  (entry.shared_element = token)
//!             └─ renderer: correlate(active, entry) → Correlated
//!                  └─ animation ends → complete_transition() → token dropped
//! ```
//!
//! A token is valid for one transition. Any navigation that supersedes it
//! (push, pop, another tap) discards it, after which the same entry renders
//! as a plain entry.

use uuid::Uuid;

use crate::core::entry::NavigationEntry;
use crate::core::route::ParamValue;

/// Parameter name every item-detail route uses for the initiating screen.
pub const ORIGIN_PARAM: &str = "origin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedElementToken {
    key: Uuid,
    item_param: String,
    item_id: ParamValue,
    origin: String,
}

impl SharedElementToken {
    pub(crate) fn mint(item_param: &str, item_id: ParamValue, origin: &str) -> Self {
        Self {
            key: Uuid::new_v4(),
            item_param: item_param.to_string(),
            item_id,
            origin: origin.to_string(),
        }
    }

    pub fn item_id(&self) -> &ParamValue {
        &self.item_id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Shared-element key for the renderer, stable per item and origin,
    /// e.g. `snack-3-feed`.
    pub fn element_key(&self, prefix: &str) -> String {
        format!("{prefix}-{}-{}", self.item_id, self.origin)
    }

    fn matches(&self, entry: &NavigationEntry) -> bool {
        entry.param(&self.item_param) == Some(&self.item_id)
            && entry.str(ORIGIN_PARAM) == Some(self.origin.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionDecision {
    /// Run the item-to-detail animation for this token.
    Correlated(SharedElementToken),
    /// Render the entry with the default enter transition.
    Plain,
}

impl TransitionDecision {
    pub fn is_correlated(&self) -> bool {
        matches!(self, TransitionDecision::Correlated(_))
    }
}

/// Decides whether `entry` should animate from its list item.
///
/// `active` is the token the controller still considers live.
pub fn correlate(active: Option<&SharedElementToken>, entry: &NavigationEntry) -> TransitionDecision {
    match (active, entry.shared_element()) {
        (Some(active), Some(carried)) if active.key == carried.key && carried.matches(entry) => {
            TransitionDecision::Correlated(carried.clone())
        }
        _ => TransitionDecision::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryId;
    use crate::core::route::params;

    fn detail(token: Option<SharedElementToken>, origin: &str) -> NavigationEntry {
        NavigationEntry::new(
            EntryId(1),
            "snack".into(),
            params([("snackId", ParamValue::Int(3)), ("origin", origin.into())]),
            format!("snack/3?origin={origin}"),
            token,
        )
    }

    #[test]
    fn test_correlated_when_token_active_and_matching() {
        let token = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let entry = detail(Some(token.clone()), "feed");
        assert_eq!(
            correlate(Some(&token), &entry),
            TransitionDecision::Correlated(token)
        );
    }

    #[test]
    fn test_plain_without_token() {
        let token = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let entry = detail(None, "feed");
        assert_eq!(correlate(Some(&token), &entry), TransitionDecision::Plain);
    }

    #[test]
    fn test_plain_when_origin_mismatched() {
        let token = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let entry = detail(Some(token.clone()), "search");
        assert_eq!(correlate(Some(&token), &entry), TransitionDecision::Plain);
    }

    #[test]
    fn test_plain_when_token_discarded() {
        let token = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let entry = detail(Some(token), "feed");
        assert_eq!(correlate(None, &entry), TransitionDecision::Plain);
    }

    #[test]
    fn test_stale_token_does_not_match_fresh_one() {
        let stale = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let fresh = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        let entry = detail(Some(stale), "feed");
        assert!(!correlate(Some(&fresh), &entry).is_correlated());
    }

    #[test]
    fn test_element_key() {
        let token = SharedElementToken::mint("snackId", ParamValue::Int(3), "feed");
        assert_eq!(token.element_key("snack"), "snack-3-feed");
    }
}
