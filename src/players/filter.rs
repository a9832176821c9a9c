use super::types::PlayerStatRecord;

/// Sentinel that disables the position or team predicate.
pub const ALL: &str = "All";

/// Active predicates of the player table. Empty strings and `"All"` are
/// treated as "no constraint".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFilter {
    pub position: String,
    pub team: String,
    pub search_text: String,
}

impl Default for PlayerFilter {
    fn default() -> Self {
        Self {
            position: ALL.to_string(),
            team: ALL.to_string(),
            search_text: String::new(),
        }
    }
}

impl PlayerFilter {
    pub fn is_active(&self) -> bool {
        !is_wildcard(&self.position) || !is_wildcard(&self.team) || !self.search_text.is_empty()
    }

    /// True when the record passes every active predicate.
    pub fn matches(&self, record: &PlayerStatRecord) -> bool {
        if !is_wildcard(&self.position) && !record.position.eq_ignore_ascii_case(self.position.trim()) {
            return false;
        }
        if !is_wildcard(&self.team) && !record.team.eq_ignore_ascii_case(self.team.trim()) {
            return false;
        }

        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        record.display_name.to_lowercase().contains(&needle) || record.team.to_lowercase().contains(&needle)
    }
}

fn is_wildcard(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

/// Keep the items that pass `filter`, in their input order.
pub fn filter_records<T>(items: &[T], filter: &PlayerFilter) -> Vec<T>
where
    T: AsRef<PlayerStatRecord> + Clone,
{
    items
        .iter()
        .filter(|item| filter.matches(item.as_ref()))
        .cloned()
        .collect()
}
