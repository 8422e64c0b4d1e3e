use uuid::Uuid;

use crate::db::models::{OptionCategory, OptionItem};
use crate::db::option_repository::OptionRepository;

/// Default picker values installed into empty categories at startup.
const DEFAULT_OPTIONS: &[(OptionCategory, &str, &str)] = &[
    (OptionCategory::Authors, "john-doe", "John Doe"),
    (OptionCategory::Authors, "jane-smith", "Jane Smith"),
    (OptionCategory::Channels, "web", "Web"),
    (OptionCategory::Channels, "mobile", "Mobile"),
    (OptionCategory::Categories, "technology", "Technology"),
    (OptionCategory::Categories, "business", "Business"),
    (OptionCategory::Newsletters, "weekly-digest", "Weekly Digest"),
    (OptionCategory::Newsletters, "monthly-update", "Monthly Update"),
    (OptionCategory::Topics, "javascript", "JavaScript"),
    (OptionCategory::Topics, "react", "React"),
];

/// Seed the option catalog so fresh deployments have usable form pickers.
///
/// Categories that already hold entries are left alone, so operator-created
/// values are never mixed back with defaults or duplicated on restart.
pub async fn seed_option_catalog(repo: &dyn OptionRepository) {
    for category in OptionCategory::ALL {
        let existing = match repo.list_by_category(category).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    "Failed to check category '{}' before seeding: {}",
                    category.as_str(),
                    e
                );
                continue;
            }
        };

        if !existing.is_empty() {
            tracing::debug!(
                "Category '{}' already populated, skipping seed",
                category.as_str()
            );
            continue;
        }

        for (_, value, label) in DEFAULT_OPTIONS.iter().filter(|(c, _, _)| *c == category) {
            let item = OptionItem {
                id: Uuid::new_v4().to_string(),
                category,
                value: value.to_string(),
                label: label.to_string(),
            };

            if let Err(e) = repo.insert(item).await {
                tracing::error!("Failed to seed option '{}': {}", value, e);
            }
        }

        tracing::info!("Seeded default '{}' options", category.as_str());
    }
}
