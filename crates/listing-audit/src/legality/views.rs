use super::domain::{Category, CategoryCounts};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub category: Category,
    pub id: &'static str,
    pub description: &'static str,
    pub level: u8,
    pub count: usize,
    /// Percentage of all listings, one decimal place.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonEntry {
    pub category: Category,
    pub code: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Serializable overview of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub total: usize,
    pub illegal_share_pct: f64,
    pub counts: CategoryCounts,
    pub categories: Vec<CategoryEntry>,
    pub reasons: Vec<ReasonEntry>,
}

fn round_pct(share: f64) -> f64 {
    (share * 1000.0).round() / 10.0
}

impl CategoryCounts {
    pub fn summary(&self) -> ClassificationSummary {
        let categories = Category::ordered()
            .into_iter()
            .map(|category| {
                let count = self.get(category);
                let share = if self.all == 0 {
                    0.0
                } else {
                    count as f64 / self.all as f64
                };
                CategoryEntry {
                    category,
                    id: category.id(),
                    description: category.description(),
                    level: category.level(),
                    count,
                    share_pct: round_pct(share),
                }
            })
            .collect();

        let reasons = Category::illegal_reasons()
            .into_iter()
            .filter_map(|category| {
                Some(ReasonEntry {
                    category,
                    code: category.legend_code()?,
                    label: category.legend_label()?,
                    count: self.get(category),
                })
            })
            .collect();

        ClassificationSummary {
            total: self.all,
            illegal_share_pct: round_pct(self.illegal_share()),
            counts: *self,
            categories,
            reasons,
        }
    }
}
