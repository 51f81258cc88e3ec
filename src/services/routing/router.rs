use crate::services::quota::state_machine::UserState;
use crate::services::routing::classifier::Intent;

/// What goes back to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPolicy {
    /// Fetch a joke and send it
    Joke,
    Help,
    Hint,
    /// Nothing is sent; blocked users get silence, resets are mutation-only
    Silent,
}

/// Store change applied after the reply decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMutation {
    InsertNew,
    IncrementCount,
    Reset,
}

/// The decision table: intent and quota state in, reply and mutation out.
pub fn route(intent: Intent, state: UserState) -> (ReplyPolicy, Option<StoreMutation>) {
    match intent {
        Intent::Joke => match state {
            UserState::New => (ReplyPolicy::Joke, Some(StoreMutation::InsertNew)),
            UserState::Ready | UserState::CanAskMore => {
                (ReplyPolicy::Joke, Some(StoreMutation::IncrementCount))
            }
            UserState::Blocked | UserState::CooldownJustSet => (ReplyPolicy::Silent, None),
        },
        Intent::More => match state {
            UserState::CanAskMore => (ReplyPolicy::Joke, Some(StoreMutation::IncrementCount)),
            _ => (ReplyPolicy::Silent, None),
        },
        Intent::Help => (ReplyPolicy::Help, None),
        Intent::Reset => (ReplyPolicy::Silent, Some(StoreMutation::Reset)),
        Intent::Other => (ReplyPolicy::Hint, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_joke_inserts() {
        assert_eq!(
            route(Intent::Joke, UserState::New),
            (ReplyPolicy::Joke, Some(StoreMutation::InsertNew))
        );
    }

    #[test]
    fn existing_user_joke_increments() {
        assert_eq!(
            route(Intent::Joke, UserState::Ready),
            (ReplyPolicy::Joke, Some(StoreMutation::IncrementCount))
        );
        assert_eq!(
            route(Intent::Joke, UserState::CanAskMore),
            (ReplyPolicy::Joke, Some(StoreMutation::IncrementCount))
        );
    }

    #[test]
    fn blocked_user_gets_silence() {
        assert_eq!(route(Intent::Joke, UserState::Blocked), (ReplyPolicy::Silent, None));
        assert_eq!(
            route(Intent::Joke, UserState::CooldownJustSet),
            (ReplyPolicy::Silent, None)
        );
    }

    #[test]
    fn more_only_works_after_a_joke() {
        assert_eq!(
            route(Intent::More, UserState::CanAskMore),
            (ReplyPolicy::Joke, Some(StoreMutation::IncrementCount))
        );
        for state in [
            UserState::New,
            UserState::Ready,
            UserState::Blocked,
            UserState::CooldownJustSet,
        ] {
            assert_eq!(route(Intent::More, state), (ReplyPolicy::Silent, None));
        }
    }

    #[test]
    fn help_replies_in_any_state() {
        for state in [
            UserState::New,
            UserState::Ready,
            UserState::CanAskMore,
            UserState::Blocked,
            UserState::CooldownJustSet,
        ] {
            assert_eq!(route(Intent::Help, state), (ReplyPolicy::Help, None));
        }
    }

    #[test]
    fn reset_mutates_in_any_state() {
        for state in [
            UserState::New,
            UserState::Ready,
            UserState::CanAskMore,
            UserState::Blocked,
            UserState::CooldownJustSet,
        ] {
            assert_eq!(
                route(Intent::Reset, state),
                (ReplyPolicy::Silent, Some(StoreMutation::Reset))
            );
        }
    }

    #[test]
    fn unknown_text_gets_hint() {
        assert_eq!(route(Intent::Other, UserState::Ready), (ReplyPolicy::Hint, None));
    }
}
