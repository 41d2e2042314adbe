use crate::domain::Phase;
use crate::error::{ReleaseCheckError, Result};
use std::fmt;

/// Progress of a validation run
///
/// Phases only move forward (`Idle → MetaCheck → ChangeListing → BuildTest →
/// Done`), skipping any that were not selected. `Failed` is reachable from
/// every state except `Done` and is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Idle,
    MetaCheck,
    ChangeListing,
    BuildTest,
    Done,
    Failed,
}

impl ValidationState {
    fn rank(&self) -> Option<u8> {
        match self {
            ValidationState::Idle => Some(0),
            ValidationState::MetaCheck => Some(1),
            ValidationState::ChangeListing => Some(2),
            ValidationState::BuildTest => Some(3),
            ValidationState::Done => Some(4),
            ValidationState::Failed => None,
        }
    }

    /// Move to `next`, rejecting backward moves and moves out of a final state
    pub fn transition(self, next: ValidationState) -> Result<ValidationState> {
        let allowed = match (self.rank(), next.rank()) {
            (Some(4), _) | (None, _) => false,
            (Some(_), None) => true,
            (Some(from), Some(to)) => to > from,
        };

        if allowed {
            Ok(next)
        } else {
            Err(ReleaseCheckError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl From<Phase> for ValidationState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Meta => ValidationState::MetaCheck,
            Phase::Changes => ValidationState::ChangeListing,
            Phase::Test => ValidationState::BuildTest,
        }
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationState::Idle => "idle",
            ValidationState::MetaCheck => "meta check",
            ValidationState::ChangeListing => "change listing",
            ValidationState::BuildTest => "build/test",
            ValidationState::Done => "done",
            ValidationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValidationState::*;

    #[test]
    fn test_full_forward_path() {
        let mut state = Idle;
        for next in [MetaCheck, ChangeListing, BuildTest, Done] {
            state = state.transition(next).unwrap();
        }
        assert_eq!(state, Done);
    }

    #[test]
    fn test_skipping_phases_is_allowed() {
        assert_eq!(Idle.transition(BuildTest).unwrap(), BuildTest);
        assert_eq!(Idle.transition(Done).unwrap(), Done);
    }

    #[test]
    fn test_backward_moves_are_rejected() {
        assert!(BuildTest.transition(MetaCheck).is_err());
        assert!(ChangeListing.transition(ChangeListing).is_err());
    }

    #[test]
    fn test_failed_is_absorbing() {
        for state in [Idle, MetaCheck, ChangeListing, BuildTest] {
            assert_eq!(state.transition(Failed).unwrap(), Failed);
        }
        for next in [Idle, MetaCheck, Done, Failed] {
            assert!(Failed.transition(next).is_err());
        }
        assert!(Done.transition(Failed).is_err());
    }

    #[test]
    fn test_phase_mapping() {
        assert_eq!(ValidationState::from(Phase::Meta), MetaCheck);
        assert_eq!(ValidationState::from(Phase::Changes), ChangeListing);
        assert_eq!(ValidationState::from(Phase::Test), BuildTest);
    }
}
