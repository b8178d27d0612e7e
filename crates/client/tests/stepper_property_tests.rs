//! Property tests for stage progression.
//!
//! # Invariants
//! - k advances from the start land on index min(k, N-1)
//! - The index never decreases and saturates at the last stage
//! - Gated advances only move from the named stage

use mintwizard_client::{Stage, Stepper};
use proptest::prelude::*;

proptest! {
    #[test]
    fn advances_saturate_at_last_stage(len in 1usize..12, advances in 0usize..30) {
        let mut stepper = Stepper::new((0..len).collect::<Vec<_>>()).unwrap();
        for _ in 0..advances {
            stepper.advance();
        }
        prop_assert_eq!(stepper.current_index(), advances.min(len - 1));
        prop_assert_eq!(stepper.is_terminal(), advances >= len - 1);
    }

    #[test]
    fn index_never_decreases(ops in prop::collection::vec(0usize..5, 0..40)) {
        let mut stepper = Stepper::default();
        let mut previous = stepper.current_index();
        for op in ops {
            match op {
                0 => { stepper.advance(); }
                n => { stepper.advance_from(&Stage::ALL[n - 1]); }
            }
            prop_assert!(stepper.current_index() >= previous);
            prop_assert!(stepper.current_index() < Stage::ALL.len());
            previous = stepper.current_index();
        }
    }

    #[test]
    fn gated_advance_moves_only_from_expected(start in 0usize..4, gate in 0usize..4) {
        let mut stepper = Stepper::default();
        for _ in 0..start {
            stepper.advance();
        }
        let moved = stepper.advance_from(&Stage::ALL[gate]);
        prop_assert_eq!(moved, gate == start && start < 3);
        let expected = if moved { start + 1 } else { start };
        prop_assert_eq!(stepper.current_index(), expected);
    }

    #[test]
    fn progress_is_monotonic(len in 2usize..10) {
        let mut stepper = Stepper::new(vec![(); len]).unwrap();
        let mut last = stepper.progress_percent();
        prop_assert_eq!(last, 0);
        while stepper.advance() {
            prop_assert!(stepper.progress_percent() > last);
            last = stepper.progress_percent();
        }
        prop_assert_eq!(last, 100);
    }
}
