//! Case status lifecycle.
//!
//! Transitions only move forward: nothing returns to `open`, and
//! `forwarded_prosecution` and `closed` are terminal.

use crate::types::CaseStatus;

/// Statuses reachable in one step from `from`.
pub fn allowed_transitions(from: CaseStatus) -> &'static [CaseStatus] {
    use CaseStatus::*;

    match from {
        Open => &[Investigation, Pending, Court, ForwardedProsecution, Closed],
        Investigation => &[Pending, Court, ForwardedProsecution, Closed],
        Pending => &[Investigation, Court, ForwardedProsecution, Closed],
        Court => &[Pending, ForwardedProsecution, Closed],
        ForwardedProsecution | Closed => &[],
    }
}

pub fn can_transition(from: CaseStatus, to: CaseStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

pub fn is_terminal(status: CaseStatus) -> bool {
    allowed_transitions(status).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CaseStatus::*;

    const ALL: [CaseStatus; 6] = [Open, Investigation, Pending, Court, ForwardedProsecution, Closed];

    #[test]
    fn test_terminal_states() {
        assert!(is_terminal(ForwardedProsecution));
        assert!(is_terminal(Closed));
        assert!(!is_terminal(Open));
        for to in ALL {
            assert!(!can_transition(ForwardedProsecution, to));
        }
    }

    #[test]
    fn test_never_back_to_open() {
        for from in ALL {
            assert!(!can_transition(from, Open), "{from} -> open");
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in ALL {
            assert!(!can_transition(status, status));
        }
    }

    #[test]
    fn test_investigation_flow() {
        assert!(can_transition(Open, Investigation));
        assert!(can_transition(Investigation, Court));
        assert!(can_transition(Court, ForwardedProsecution));
        assert!(!can_transition(Court, Investigation));
    }
}
