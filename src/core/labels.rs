use crate::models::{FollowUser, UserContext};

/// Separators accepted between interest labels in a profile's free-text label field
const LABEL_SEPARATORS: &[char] = &[',', '、', '/', '｜', '|', ' ', '　'];

/// Split a profile label string into lowercase interest labels
///
/// Empty fragments are dropped and duplicates collapse, keeping first-seen order.
pub fn parse_interest_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();

    for label in raw
        .split(LABEL_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
    {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    labels
}

impl UserContext {
    /// Build the recommendation context from a profile label string and follow list
    pub fn from_profile(user_label: &str, following: &[FollowUser]) -> Self {
        UserContext::new(
            following.iter().map(|user| user.email.as_str()),
            parse_interest_labels(user_label),
        )
    }
}
