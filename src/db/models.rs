use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published article stored in the `articles` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Service-generated UUID, opaque to clients.
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Absolute URL of the article content.
    pub url: String,
    /// Catalog values the article is filed under.
    pub author: String,
    pub channel: String,
    pub category: String,
    pub newsletter: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

/// A partial field set applied to an existing article.
///
/// Serializes only the fields that are present, so it can be turned into a
/// `$set` document directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ArticleChanges {
    /// True when no field is set; an empty `$set` is rejected by MongoDB.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.url.is_none()
            && self.author.is_none()
            && self.channel.is_none()
            && self.category.is_none()
            && self.newsletter.is_none()
            && self.topic.is_none()
            && self.created_at.is_none()
    }
}

/// Subscription lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Inactive,
    Pending,
}

/// A newsletter subscriber stored in the `subscribers` collection.
///
/// `status` is optional in storage; records written by older tooling may
/// lack it, and the external view defaults it to `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<SubscriberStatus>,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

/// The fixed set of option-catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionCategory {
    Authors,
    Channels,
    Categories,
    Newsletters,
    Topics,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 5] = [
        OptionCategory::Authors,
        OptionCategory::Channels,
        OptionCategory::Categories,
        OptionCategory::Newsletters,
        OptionCategory::Topics,
    ];

    /// Parse a category from its URL path segment.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "authors" => Some(OptionCategory::Authors),
            "channels" => Some(OptionCategory::Channels),
            "categories" => Some(OptionCategory::Categories),
            "newsletters" => Some(OptionCategory::Newsletters),
            "topics" => Some(OptionCategory::Topics),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionCategory::Authors => "authors",
            OptionCategory::Channels => "channels",
            OptionCategory::Categories => "categories",
            OptionCategory::Newsletters => "newsletters",
            OptionCategory::Topics => "topics",
        }
    }
}

/// A form-picker reference value, partitioned by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub category: OptionCategory,
    /// Identifier/slug, unique within its category.
    pub value: String,
    /// Display text.
    pub label: String,
}
