//! Walk phases.
//!
//! A walk is a sequence of bounded sub-walks. Each phase fills a contiguous
//! range of result slots by hopping outward from the subject through one
//! sector. `FrontOf` is a left phase followed by a right phase that starts
//! again from the subject.

use std::ops::Range;

use crate::sector::Sector;

use super::Orientation;

/// What a phase does when a hop finds no qualifying link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissPolicy {
    /// Stop the whole walk.
    Terminate,
    /// Leave the slot empty and retry from the same point.
    Stay,
}

/// One bounded sub-walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Phase {
    pub sector: Sector,
    pub slots: Range<usize>,
    pub on_miss: MissPolicy,
}

impl Phase {
    /// Splits a walk for `neighbor_count` slots into phases.
    ///
    /// Under `FrontOf` the left phase gets `neighbor_count / 2` slots; an odd
    /// remainder goes to the right phase.
    pub fn plan(orientation: Orientation, neighbor_count: usize) -> Vec<Phase> {
        match orientation {
            Orientation::LeftOf | Orientation::RightOf => vec![Phase {
                sector: orientation.target_sector(),
                slots: 0..neighbor_count,
                on_miss: MissPolicy::Terminate,
            }],
            Orientation::FrontOf => {
                let half = neighbor_count / 2;
                vec![
                    Phase {
                        sector: Sector::Left,
                        slots: 0..half,
                        on_miss: MissPolicy::Stay,
                    },
                    Phase {
                        sector: Sector::Right,
                        slots: half..neighbor_count,
                        on_miss: MissPolicy::Terminate,
                    },
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_orientations_are_single_phase() {
        let phases = Phase::plan(Orientation::LeftOf, 3);
        assert_eq!(
            phases,
            vec![Phase {
                sector: Sector::Right,
                slots: 0..3,
                on_miss: MissPolicy::Terminate
            }]
        );
        assert_eq!(Phase::plan(Orientation::RightOf, 1)[0].sector, Sector::Left);
    }

    #[test]
    fn test_front_of_splits_slots() {
        let phases = Phase::plan(Orientation::FrontOf, 4);
        assert_eq!(phases.len(), 2);
        assert_eq!((phases[0].sector, phases[0].slots.clone()), (Sector::Left, 0..2));
        assert_eq!(phases[0].on_miss, MissPolicy::Stay);
        assert_eq!((phases[1].sector, phases[1].slots.clone()), (Sector::Right, 2..4));
        assert_eq!(phases[1].on_miss, MissPolicy::Terminate);
    }

    #[test]
    fn test_front_of_odd_count_favours_right() {
        let phases = Phase::plan(Orientation::FrontOf, 3);
        assert_eq!(phases[0].slots, 0..1);
        assert_eq!(phases[1].slots, 1..3);
    }

    #[test]
    fn test_front_of_single_slot_has_empty_left_phase() {
        let phases = Phase::plan(Orientation::FrontOf, 1);
        assert!(phases[0].slots.is_empty());
        assert_eq!(phases[1].slots, 0..1);
    }
}
