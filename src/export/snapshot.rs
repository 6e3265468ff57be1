use crate::identity::{self, IdentityResolver};
use crate::models::{Poll, UserId};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Self-contained copy of a poll's exportable state. Built once per export,
/// handed to exactly one encoder, and safe to read from any thread without
/// touching the live poll again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub title: String,
    pub options: Vec<SnapshotOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOption {
    pub text: String,
    /// Resolved display names, in display order.
    pub voters: Vec<String>,
}

impl Snapshot {
    pub fn vote_counts(&self) -> Vec<u32> {
        self.options.iter().map(|o| o.voters.len() as u32).collect()
    }

    pub fn option_labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.text.clone()).collect()
    }
}

/// Copy the poll's state out under its lock, then resolve voter names.
///
/// The lock covers only the copy itself: it is released before the first
/// identity lookup, so a slow resolver or encoder never stalls voting on
/// the same poll.
pub async fn build(poll: &Poll, resolver: &dyn IdentityResolver) -> Snapshot {
    let raw: Vec<(String, Vec<UserId>)> = {
        let options = poll.options().await;
        options
            .iter()
            .map(|option| {
                let mut voters: Vec<UserId> = option.voters.iter().copied().collect();
                // Snowflakes are time-ordered, so this is join order.
                voters.sort_unstable();
                (option.text.clone(), voters)
            })
            .collect()
    };

    let mut options = Vec::with_capacity(raw.len());
    for (text, voter_ids) in raw {
        let mut voters = Vec::with_capacity(voter_ids.len());
        for id in voter_ids {
            voters.push(identity::display_name_or_id(resolver, id).await);
        }
        options.push(SnapshotOption { text, voters });
    }

    Snapshot {
        title: poll.title.clone(),
        options,
    }
}

/// Serializes a snapshot as a mapping from option text to voter names,
/// preserving option order. Both structured encoders go through this so the
/// key order never depends on serializer defaults.
pub(crate) struct VotersByOption<'a>(pub &'a Snapshot);

impl Serialize for VotersByOption<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.options.len()))?;
        for option in &self.0.options {
            map.serialize_entry(&option.text, &option.voters)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::models::{GuildId, PollId, PollOption};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct NameTable(HashMap<u64, &'static str>);

    #[async_trait]
    impl IdentityResolver for NameTable {
        async fn display_name(&self, user: UserId) -> Result<String, BoxError> {
            self.0
                .get(&user.0)
                .map(|name| name.to_string())
                .ok_or_else(|| "unknown user".into())
        }
    }

    fn lunch_poll() -> Poll {
        Poll::new(
            PollId(1),
            GuildId(1),
            UserId(1),
            "Lunch?",
            vec![
                PollOption::with_voters("Pizza", [10, 11]),
                PollOption::with_voters("Salad", [12]),
            ],
        )
    }

    fn names() -> NameTable {
        NameTable(HashMap::from([(10, "Alice"), (11, "Bob"), (12, "Charlie")]))
    }

    #[tokio::test]
    async fn test_snapshot_copies_resolved_state() {
        let poll = lunch_poll();
        let snapshot = build(&poll, &names()).await;

        assert_eq!(snapshot.title, "Lunch?");
        assert_eq!(snapshot.options.len(), 2);
        assert_eq!(snapshot.options[0].text, "Pizza");
        assert_eq!(snapshot.options[0].voters, vec!["Alice", "Bob"]);
        assert_eq!(snapshot.options[1].voters, vec!["Charlie"]);
    }

    #[tokio::test]
    async fn test_unresolvable_voters_fall_back_to_raw_ids() {
        let poll = lunch_poll();
        let snapshot = build(&poll, &NameTable(HashMap::new())).await;

        assert_eq!(snapshot.options[0].voters, vec!["10", "11"]);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_alias_the_live_poll() {
        let poll = lunch_poll();
        let snapshot = build(&poll, &names()).await;

        // Mutating the poll after the snapshot must not show up in it.
        poll.options().await[0].voters.insert(UserId(99));
        assert_eq!(snapshot.options[0].voters.len(), 2);
    }

    #[tokio::test]
    async fn test_lock_is_released_before_return() {
        let poll = lunch_poll();
        let _snapshot = build(&poll, &names()).await;

        // If build leaked its guard this would deadlock.
        let guard = poll.options().await;
        assert_eq!(guard.len(), 2);
    }

    #[tokio::test]
    async fn test_vote_counts_and_labels_stay_parallel() {
        let poll = lunch_poll();
        let snapshot = build(&poll, &names()).await;

        assert_eq!(snapshot.vote_counts(), vec![2, 1]);
        assert_eq!(snapshot.option_labels(), vec!["Pizza", "Salad"]);
    }
}
