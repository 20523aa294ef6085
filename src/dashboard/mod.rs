pub mod condensed;
pub mod html;

use std::collections::HashSet;

use serde::Serialize;

use crate::insights::{self, view::NO_PEOPLE};
use crate::types::{InsightView, StoredEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub important: usize,
    pub unique_people: usize,
}

/// Views for every recognizable entry, keeping the store's newest-first order.
pub fn build_views(entries: &[StoredEntry]) -> Vec<InsightView> {
    entries.iter().filter_map(insights::to_view).collect()
}

pub fn compute_stats(views: &[InsightView]) -> DashboardStats {
    let mut people = HashSet::new();
    for view in views {
        for person in view.people.split(", ") {
            if !person.is_empty() && person != NO_PEOPLE {
                people.insert(person);
            }
        }
    }

    DashboardStats {
        total: views.len(),
        important: views.iter().filter(|v| v.is_important).count(),
        unique_people: people.len(),
    }
}
