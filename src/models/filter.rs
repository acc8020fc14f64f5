//! Filter criteria for notification queries.

use super::NotificationRecord;
use serde::{Deserialize, Serialize};

/// Filter criteria passed through to the provider with each page request.
///
/// Providers are expected to apply the filter server-side; [`matches`] gives
/// callers (and in-memory providers) the same semantics client-side.
///
/// [`matches`]: NotificationFilter::matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilter {
    /// Free-text query; case-insensitive containment over app name, title,
    /// and body text.
    #[serde(default)]
    pub query: Option<String>,
    /// Restrict to notifications from any of these app names.
    #[serde(default)]
    pub app_names: Vec<String>,
    /// Restrict to an exact category.
    #[serde(default)]
    pub category: Option<String>,
    /// Restrict to an exact presentation style.
    #[serde(default)]
    pub style: Option<String>,
    /// Restrict to an exact channel identifier.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Restrict by the ongoing flag.
    #[serde(default)]
    pub ongoing: Option<bool>,
    /// Restrict by the group-summary flag.
    #[serde(default)]
    pub group_summary: Option<bool>,
    /// Restrict by the local-only flag.
    #[serde(default)]
    pub local_only: Option<bool>,
    /// Minimum posting timestamp (inclusive, epoch milliseconds).
    #[serde(default)]
    pub since: Option<i64>,
    /// Maximum posting timestamp (inclusive, epoch milliseconds).
    #[serde(default)]
    pub until: Option<i64>,
}

impl NotificationFilter {
    /// Creates an empty filter (matches all).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: None,
            app_names: Vec::new(),
            category: None,
            style: None,
            channel_id: None,
            ongoing: None,
            group_summary: None,
            local_only: None,
            since: None,
            until: None,
        }
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Adds an app name to the membership set.
    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_names.push(app_name.into());
        self
    }

    /// Sets the category constraint.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the channel constraint.
    #[must_use]
    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    /// Sets the ongoing-flag constraint.
    #[must_use]
    pub const fn with_ongoing(mut self, ongoing: bool) -> Self {
        self.ongoing = Some(ongoing);
        self
    }

    /// Sets the timestamp lower bound (inclusive).
    #[must_use]
    pub const fn with_since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    /// Sets the timestamp upper bound (inclusive).
    #[must_use]
    pub const fn with_until(mut self, until: i64) -> Self {
        self.until = Some(until);
        self
    }

    /// Returns true if the filter is empty (matches all).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.app_names.is_empty()
            && self.category.is_none()
            && self.style.is_none()
            && self.channel_id.is_none()
            && self.ongoing.is_none()
            && self.group_summary.is_none()
            && self.local_only.is_none()
            && self.since.is_none()
            && self.until.is_none()
    }

    /// Returns whether the record satisfies every constraint in this filter.
    #[must_use]
    pub fn matches(&self, record: &NotificationRecord) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let haystacks = [
                Some(record.app_name.as_str()),
                record.title.as_deref(),
                record.text.as_deref(),
            ];
            let hit = haystacks
                .into_iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if !self.app_names.is_empty() && !self.app_names.contains(&record.app_name) {
            return false;
        }

        if self.category.is_some() && self.category != record.category {
            return false;
        }
        if self.style.is_some() && self.style != record.style {
            return false;
        }
        if self.channel_id.is_some() && self.channel_id != record.channel_id {
            return false;
        }

        if let Some(ongoing) = self.ongoing {
            if record.is_ongoing != ongoing {
                return false;
            }
        }
        if let Some(group_summary) = self.group_summary {
            if record.is_group_summary != group_summary {
                return false;
            }
        }
        if let Some(local_only) = self.local_only {
            if record.is_local_only != local_only {
                return false;
            }
        }

        if let Some(since) = self.since {
            if record.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if record.timestamp > until {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(app: &str, ts: i64) -> NotificationRecord {
        NotificationRecord::new("id", app, "com.example", ts)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = NotificationFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("Mail", 1)));
    }

    #[test]
    fn test_query_is_case_insensitive_containment() {
        let filter = NotificationFilter::new().with_query("inbox");
        let hit = record("Mail", 1).with_title("INBOX full");
        let miss = record("Mail", 1).with_title("Spam digest");
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
    }

    #[test]
    fn test_query_searches_body_text() {
        let filter = NotificationFilter::new().with_query("meeting");
        let hit = record("Calendar", 1).with_text("Meeting in 10 minutes");
        assert!(filter.matches(&hit));
    }

    #[test]
    fn test_app_name_set_membership() {
        let filter = NotificationFilter::new()
            .with_app_name("Mail")
            .with_app_name("Chat");
        assert!(filter.matches(&record("Mail", 1)));
        assert!(filter.matches(&record("Chat", 1)));
        assert!(!filter.matches(&record("Maps", 1)));
    }

    #[test]
    fn test_equality_constraints() {
        let filter = NotificationFilter::new()
            .with_category("email")
            .with_channel_id("inbox");
        let hit = record("Mail", 1)
            .with_category("email")
            .with_channel_id("inbox");
        let wrong_channel = record("Mail", 1)
            .with_category("email")
            .with_channel_id("outbox");
        let no_category = record("Mail", 1).with_channel_id("inbox");
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_channel));
        assert!(!filter.matches(&no_category));
    }

    #[test]
    fn test_boolean_flag_constraints() {
        let filter = NotificationFilter::new().with_ongoing(true);
        let mut ongoing = record("Player", 1);
        ongoing.is_ongoing = true;
        assert!(filter.matches(&ongoing));
        assert!(!filter.matches(&record("Player", 1)));
    }

    #[test]
    fn test_timestamp_bounds_are_inclusive() {
        let filter = NotificationFilter::new().with_since(10).with_until(20);
        assert!(filter.matches(&record("Mail", 10)));
        assert!(filter.matches(&record("Mail", 20)));
        assert!(!filter.matches(&record("Mail", 9)));
        assert!(!filter.matches(&record("Mail", 21)));
    }
}
