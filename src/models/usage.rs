use std::collections::BTreeMap;

use serde::Deserialize;

use super::FileCategory;

/// Per-category slice of the usage aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUsage {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub latest_date: Option<String>,
}

/// Aggregate usage as returned by the platform. `by_category` defaults to
/// empty when the account has never uploaded anything.
#[derive(Debug, Default, Deserialize)]
pub struct TotalSpace {
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub all: u64,
    #[serde(default)]
    pub by_category: BTreeMap<FileCategory, CategoryUsage>,
}

impl TotalSpace {
    /// Percentage of quota consumed, clamped to 100.
    pub fn percent_used(&self) -> u64 {
        if self.all == 0 {
            return 0;
        }
        (self.used * 100 / self.all).min(100)
    }
}

/// Derived per-category display record. Computed fresh on every render,
/// never persisted.
#[derive(Debug, Clone)]
pub struct UsageSummary {
    pub title: &'static str,
    pub icon: &'static str,
    pub size: u64,
    pub latest_date: Option<String>,
    pub url: String,
}

/// One summary entry per category present in the aggregate, linked to that
/// category's filtered listing.
pub fn usage_summary(total: &TotalSpace) -> Vec<UsageSummary> {
    total
        .by_category
        .iter()
        .map(|(category, usage)| UsageSummary {
            title: category.title(),
            icon: category.icon(),
            size: usage.size,
            latest_date: usage.latest_date.clone(),
            url: format!("/files?type={}", category),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(json: &str) -> TotalSpace {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn summary_has_one_entry_per_reported_category() {
        let total = aggregate(
            r#"{
                "used": 3072,
                "all": 1073741824,
                "by_category": {
                    "document": {"size": 2048, "latest_date": "2026-07-01T09:30:00.000Z"},
                    "image": {"size": 1024, "latest_date": "2026-06-12T14:00:00.000Z"}
                }
            }"#,
        );

        let summary = usage_summary(&total);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn summary_links_to_category_filtered_listing() {
        let total = aggregate(
            r#"{"used": 10, "all": 100, "by_category": {"video": {"size": 10}}}"#,
        );

        let summary = usage_summary(&total);
        assert_eq!(summary[0].url, "/files?type=video");
        assert_eq!(summary[0].title, "Videos");
        assert!(summary[0].latest_date.is_none());
    }

    #[test]
    fn empty_aggregate_yields_no_summaries() {
        let total = aggregate("{}");
        assert!(usage_summary(&total).is_empty());
        assert_eq!(total.percent_used(), 0);
    }

    #[test]
    fn percent_used_is_clamped() {
        let total = TotalSpace {
            used: 150,
            all: 100,
            by_category: BTreeMap::new(),
        };
        assert_eq!(total.percent_used(), 100);

        let total = TotalSpace {
            used: 512,
            all: 2048,
            by_category: BTreeMap::new(),
        };
        assert_eq!(total.percent_used(), 25);
    }
}
