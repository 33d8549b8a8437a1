//! Name → worker id fallback used only while ingesting raw records that
//! arrive without an id. Analytics always join on `worker_id`.

use crate::models::WorkerProfile;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Exactly one profile matched.
    Found(String),
    /// Several profiles matched the substring; the name is not usable.
    Ambiguous(Vec<String>),
    NotFound,
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Exact (case- and whitespace-insensitive) display-name match first,
/// then substring containment in either direction. Substring hits must be
/// unique.
pub fn match_worker_id(profiles: &HashMap<String, WorkerProfile>, name: &str) -> NameMatch {
    let needle = normalize(name);
    if needle.is_empty() {
        return NameMatch::NotFound;
    }

    let mut exact: Vec<&str> = profiles
        .values()
        .filter(|p| normalize(&p.display_name) == needle)
        .map(|p| p.worker_id.as_str())
        .collect();

    if exact.len() == 1 {
        return NameMatch::Found(exact[0].to_string());
    }
    if exact.len() > 1 {
        exact.sort_unstable();
        return NameMatch::Ambiguous(exact.into_iter().map(str::to_string).collect());
    }

    let mut partial: Vec<&str> = profiles
        .values()
        .filter(|p| {
            let hay = normalize(&p.display_name);
            !hay.is_empty() && (hay.contains(&needle) || needle.contains(&hay))
        })
        .map(|p| p.worker_id.as_str())
        .collect();
    partial.sort_unstable();

    match partial.len() {
        0 => NameMatch::NotFound,
        1 => NameMatch::Found(partial[0].to_string()),
        _ => NameMatch::Ambiguous(partial.into_iter().map(str::to_string).collect()),
    }
}
