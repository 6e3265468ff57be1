use crate::error::BoxError;
use crate::fuzzy;
use crate::models::{GuildId, Poll, PollId, UserId};
use crate::store::PollStore;
use serde::Serialize;
use std::sync::Arc;

// Discord caps autocomplete responses at 25 choices.
pub const MAX_CHOICES: usize = 25;

// Matches at or below this similarity are dropped.
pub const SCORE_FLOOR: u8 = 50;

/// A poll matched against the caller's partial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub id: PollId,
    pub title: String,
    pub score: u8,
}

/// One autocomplete choice as the dispatch layer sends it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollChoice {
    pub label: String,
    pub value: String,
}

/// Rank a guild's polls against the caller's partial input.
///
/// An empty query skips ranking entirely and passes the first
/// [`MAX_CHOICES`] polls through in their stored (creation) order. A
/// non-empty query only considers polls the caller can see: their own, or
/// all of them when the caller holds the manage permission.
pub fn rank_polls(
    query: &str,
    polls: &[Arc<Poll>],
    caller: UserId,
    can_manage: bool,
) -> Vec<RankedCandidate> {
    if query.is_empty() {
        return polls
            .iter()
            .take(MAX_CHOICES)
            .map(|poll| RankedCandidate {
                id: poll.id,
                title: poll.title.clone(),
                score: 100,
            })
            .collect();
    }

    let mut ranked: Vec<RankedCandidate> = polls
        .iter()
        .filter(|poll| poll.author_id == caller || can_manage)
        .map(|poll| RankedCandidate {
            id: poll.id,
            title: poll.title.clone(),
            score: fuzzy::similarity(query, &poll.title),
        })
        .filter(|candidate| candidate.score > SCORE_FLOOR)
        .collect();

    // Stable sort: equal scores keep their creation order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(MAX_CHOICES);
    ranked
}

/// Fetch a guild's polls and rank them for an autocomplete reply. No polls
/// yet is a normal state and yields an empty list.
pub async fn poll_autocomplete(
    store: &dyn PollStore,
    guild_id: GuildId,
    caller: UserId,
    can_manage: bool,
    input: &str,
) -> Result<Vec<PollChoice>, BoxError> {
    let polls = store.get_polls_by_guild(guild_id).await?;
    let choices = rank_polls(input, &polls, caller, can_manage)
        .into_iter()
        .map(|candidate| PollChoice {
            label: format!(
                "{} ({})",
                candidate.title,
                candidate.id.created_at().format("%c")
            ),
            value: candidate.id.to_string(),
        })
        .collect();
    Ok(choices)
}
