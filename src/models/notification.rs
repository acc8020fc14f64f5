//! The notification record type.

use serde::{Deserialize, Serialize};

/// A single device notification as reported by the provider.
///
/// Records are read verbatim from the provider on export and handed back
/// verbatim on import; this crate never constructs or mutates them beyond
/// the transient list held during one transfer.
///
/// Field names serialize in camelCase to match the provider's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Opaque identifier assigned by the provider. Not validated for
    /// uniqueness here.
    pub id: String,
    /// Human-readable name of the posting application.
    pub app_name: String,
    /// Package identifier of the posting application.
    pub package_name: String,
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body text.
    #[serde(default)]
    pub text: Option<String>,
    /// Posting time in epoch milliseconds (device clock). Required; doubles
    /// as the pagination cursor.
    pub timestamp: i64,
    /// Platform category (e.g. `msg`, `email`).
    #[serde(default)]
    pub category: Option<String>,
    /// Presentation style, as the platform reports it (enum-as-string).
    #[serde(default)]
    pub style: Option<String>,
    /// Sub text shown in the notification header.
    #[serde(default)]
    pub sub_text: Option<String>,
    /// Info text shown in the notification header.
    #[serde(default)]
    pub info_text: Option<String>,
    /// Summary text for expanded styles.
    #[serde(default)]
    pub summary_text: Option<String>,
    /// Group key for bundled notifications.
    #[serde(default)]
    pub group: Option<String>,
    /// Whether this record is the summary entry of its group.
    #[serde(default)]
    pub is_group_summary: bool,
    /// Notification channel identifier.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Whether the notification is ongoing (non-dismissable).
    #[serde(default)]
    pub is_ongoing: bool,
    /// Whether the notification auto-cancels on tap.
    #[serde(default)]
    pub auto_cancel: bool,
    /// Whether the notification is local to this device.
    #[serde(default)]
    pub is_local_only: bool,
    /// Platform priority level.
    #[serde(default)]
    pub priority: i32,
    /// Badge number attached to the notification.
    #[serde(default)]
    pub number: i32,
    /// Posting application icon reference (base64 or resource string).
    #[serde(default)]
    pub app_icon: Option<String>,
    /// Small icon reference.
    #[serde(default)]
    pub small_icon: Option<String>,
    /// Large icon reference.
    #[serde(default)]
    pub large_icon: Option<String>,
    /// Big picture attachment reference.
    #[serde(default)]
    pub big_picture: Option<String>,
}

impl NotificationRecord {
    /// Creates a record with the required fields set and everything else
    /// empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        app_name: impl Into<String>,
        package_name: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
            package_name: package_name.into(),
            title: None,
            text: None,
            timestamp,
            category: None,
            style: None,
            sub_text: None,
            info_text: None,
            summary_text: None,
            group: None,
            is_group_summary: false,
            channel_id: None,
            is_ongoing: false,
            auto_cancel: false,
            is_local_only: false,
            priority: 0,
            number: 0,
            app_icon: None,
            small_icon: None,
            large_icon: None,
            big_picture: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the channel identifier.
    #[must_use]
    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = NotificationRecord::new("n1", "Mail", "com.example.mail", 1_700_000_000_000);
        assert_eq!(record.id, "n1");
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert!(record.title.is_none());
        assert!(!record.is_ongoing);
        assert_eq!(record.priority, 0);
    }

    #[test]
    fn test_builder_sets_optionals() {
        let record = NotificationRecord::new("n1", "Mail", "com.example.mail", 1)
            .with_title("Inbox")
            .with_text("3 new messages")
            .with_category("email")
            .with_channel_id("inbox");
        assert_eq!(record.title.as_deref(), Some("Inbox"));
        assert_eq!(record.text.as_deref(), Some("3 new messages"));
        assert_eq!(record.category.as_deref(), Some("email"));
        assert_eq!(record.channel_id.as_deref(), Some("inbox"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let record = NotificationRecord::new("n1", "Mail", "com.example.mail", 42)
            .with_channel_id("inbox");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"appName\""));
        assert!(json.contains("\"channelId\":\"inbox\""));
        assert!(json.contains("\"isGroupSummary\":false"));

        let back: NotificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
