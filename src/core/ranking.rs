use crate::models::{Candidate, RankingWeights, ScoredCandidate, UserContext};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calculate the recommendation score of a single candidate
///
/// Scoring formula:
/// score = follow_bonus                        # owner is followed
///       + category_hits * 200 + title_hits * 120  # interest labels found in mapType / mapName
///       + clamp(likes, 0, 100)                # popularity
///       + clamp(120 - age_days * 4, 0, 120)   # recency
pub fn score_candidate(
    candidate: &Candidate,
    context: &UserContext,
    now_millis: i64,
    weights: &RankingWeights,
) -> i64 {
    let mut score = 0;

    if context.follows(&candidate.owner) {
        score += weights.follow_bonus;
    }

    let (category_hits, title_hits) = count_label_hits(candidate, context);
    score += category_hits * weights.category_label_hit + title_hits * weights.title_label_hit;

    score += popularity_score(candidate.likes, weights);
    score += recency_score(candidate.created_at_millis, now_millis, weights);

    score
}

/// Number of interest labels contained in the category and in the title
///
/// Each label counts at most once per field; a label may hit both.
#[inline]
fn count_label_hits(candidate: &Candidate, context: &UserContext) -> (i64, i64) {
    if context.labels.is_empty() {
        return (0, 0);
    }

    let category = candidate.category.to_lowercase();
    let title = candidate.title.to_lowercase();

    context
        .labels
        .iter()
        .filter(|label| !label.is_empty())
        .fold((0, 0), |(category_hits, title_hits), label| {
            (
                category_hits + i64::from(category.contains(label.as_str())),
                title_hits + i64::from(title.contains(label.as_str())),
            )
        })
}

#[inline]
fn popularity_score(likes: i64, weights: &RankingWeights) -> i64 {
    likes.clamp(0, weights.popularity_cap.max(0))
}

#[inline]
fn recency_score(created_at_millis: i64, now_millis: i64, weights: &RankingWeights) -> i64 {
    let age_days = if created_at_millis > 0 {
        now_millis.saturating_sub(created_at_millis).div_euclid(MILLIS_PER_DAY)
    } else {
        weights.unknown_age_days
    };

    let max = weights.recency_max.max(0);
    max.saturating_sub(age_days.saturating_mul(weights.recency_decay_per_day))
        .clamp(0, max)
}

/// Orders recommendation candidates for a user
#[derive(Debug, Clone)]
pub struct RankingEngine {
    weights: RankingWeights,
}

impl RankingEngine {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: RankingWeights::default(),
        }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    pub fn score(&self, candidate: &Candidate, context: &UserContext, now_millis: i64) -> i64 {
        score_candidate(candidate, context, now_millis, &self.weights)
    }

    /// Score and order candidates, best first
    ///
    /// Ties on score go to the newer post; the sort is stable, so posts equal
    /// on both keys keep their fetch order.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
        now_millis: i64,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let score = self.score(&candidate, context, now_millis);
                ScoredCandidate { candidate, score }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.candidate.created_at_millis.cmp(&a.candidate.created_at_millis))
        });

        scored
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
