use chrono::{DateTime, Duration, Utc};

use crate::constants::quota::{COOLDOWN_HOURS, MAX_JOKES_PER_CYCLE};
use crate::db::models::UserRecord;

/// Where a user stands relative to the joke quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserState {
    /// No record yet; first joke request creates one
    New,
    /// In cooldown with time remaining; nothing is delivered
    Blocked,
    /// Quota just ran over; cooldown starts now
    CooldownJustSet,
    /// Under quota, no joke heard since the last reset
    Ready,
    /// Under quota and has heard a joke, so "more" is accepted
    CanAskMore,
}

/// Record change the evaluation requires before any reply decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationIntent {
    ApplyCooldown,
    ClearCooldown,
}

/// Derive the user's state from the stored record.
///
/// Precedence matters: an unexpired cooldown blocks everything, an expired
/// one is cleared before the count check, and the count check dominates the
/// heard-a-joke check.
pub fn evaluate(
    record: Option<&UserRecord>,
    now: DateTime<Utc>,
) -> (UserState, Option<MutationIntent>) {
    let Some(record) = record else {
        return (UserState::New, None);
    };

    if record.in_cooldown() {
        if now - record.starttime < Duration::hours(COOLDOWN_HOURS) {
            return (UserState::Blocked, None);
        }
        return (UserState::Ready, Some(MutationIntent::ClearCooldown));
    }

    if record.count > MAX_JOKES_PER_CYCLE {
        return (UserState::CooldownJustSet, Some(MutationIntent::ApplyCooldown));
    }

    if record.heard_a_joke {
        (UserState::CanAskMore, None)
    } else {
        (UserState::Ready, None)
    }
}
