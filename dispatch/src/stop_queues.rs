//! ----- STOP QUEUES -----
//! Pending destination floors split in three tiers by how many reversals
//! the car makes before serving them. A floor sits in at most one tier.

use std::collections::BTreeSet;

use crate::direction::Direction;
use crate::floor::Floor;

/// Ordered by how soon the tier is served.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Now,
    Later,
    AfterLater,
}

impl Tier {
    pub fn iter() -> impl Iterator<Item = Tier> {
        [Tier::Now, Tier::Later, Tier::AfterLater].iter().copied()
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StopQueues {
    stops: BTreeSet<Floor>,
    stops_for_later: BTreeSet<Floor>,
    stops_for_after_later: BTreeSet<Floor>,
}

impl StopQueues {
    pub fn new() -> Self {
        StopQueues::default()
    }

    pub fn stops(&self) -> &BTreeSet<Floor> {
        &self.stops
    }

    pub fn stops_for_later(&self) -> &BTreeSet<Floor> {
        &self.stops_for_later
    }

    pub fn stops_for_after_later(&self) -> &BTreeSet<Floor> {
        &self.stops_for_after_later
    }

    pub fn tier(&self, tier: Tier) -> &BTreeSet<Floor> {
        match tier {
            Tier::Now => &self.stops,
            Tier::Later => &self.stops_for_later,
            Tier::AfterLater => &self.stops_for_after_later,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut BTreeSet<Floor> {
        match tier {
            Tier::Now => &mut self.stops,
            Tier::Later => &mut self.stops_for_later,
            Tier::AfterLater => &mut self.stops_for_after_later,
        }
    }

    pub fn tier_of(&self, floor: Floor) -> Option<Tier> {
        Tier::iter().find(|tier| self.tier(*tier).contains(&floor))
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.tier_of(floor).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Tier::iter().all(|tier| self.tier(tier).is_empty())
    }

    /// Every queued floor, whatever its tier.
    pub fn pending(&self) -> BTreeSet<Floor> {
        Tier::iter().flat_map(|tier| self.tier(tier).iter().copied()).collect()
    }

    /// Queue `floor` in `tier`. A floor already served no later than `tier`
    /// stays where it is; one waiting in a later tier moves up to `tier`.
    /// Returns the tier the floor ends up in.
    pub fn add_to(&mut self, tier: Tier, floor: Floor) -> Tier {
        match self.tier_of(floor) {
            Some(queued) if queued <= tier => return queued,
            Some(queued) => {
                self.tier_mut(queued).remove(&floor);
            }
            None => {}
        }
        self.tier_mut(tier).insert(floor);
        tier
    }

    /// Drop `floor` from the current tier. Absent floors are ignored.
    pub fn remove(&mut self, floor: Floor) -> bool {
        self.stops.remove(&floor)
    }

    /// Turnaround: each tier moves one step closer to being served.
    pub fn rotate(&mut self) {
        self.stops = std::mem::take(&mut self.stops_for_later);
        self.stops_for_later = std::mem::take(&mut self.stops_for_after_later);
    }

    /// Farthest floor of `tier` when travelling in `direction`.
    pub fn extreme(&self, tier: Tier, direction: Direction) -> Option<Floor> {
        let floors = self.tier(tier);
        match direction {
            Direction::Up => floors.last().copied(),
            Direction::Down => floors.first().copied(),
        }
    }

    /// Extremum test: `floor` is ahead of the car and at or beyond the last
    /// stop of the current run, so serving it only extends that run.
    pub fn extends_run(&self, direction: Direction, current: Floor, floor: Floor) -> bool {
        direction.is_ahead(current, floor)
            && self
                .extreme(Tier::Now, direction)
                .map_or(true, |last| direction.reaches(floor, last))
    }

    /// `floor` can close the later run: that run travels the other way and is
    /// either empty or ends no farther out than `floor`, so the car turns back
    /// to `direction` right there.
    pub fn ends_later_run(&self, direction: Direction, floor: Floor) -> bool {
        let back = direction.opposite();
        self.extreme(Tier::Later, back)
            .map_or(true, |end| back.reaches(floor, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queues(stops: &[Floor], later: &[Floor], after_later: &[Floor]) -> StopQueues {
        let mut queues = StopQueues::new();
        for floor in after_later {
            queues.add_to(Tier::AfterLater, *floor);
        }
        for floor in later {
            queues.add_to(Tier::Later, *floor);
        }
        for floor in stops {
            queues.add_to(Tier::Now, *floor);
        }
        queues
    }

    #[test]
    fn rotate_promotes_every_tier() {
        let mut q = queues(&[5], &[1, 4], &[3]);
        q.rotate();
        assert_eq!(q.stops(), &BTreeSet::from([1, 4]));
        assert_eq!(q.stops_for_later(), &BTreeSet::from([3]));
        assert!(q.stops_for_after_later().is_empty());
        q.rotate();
        q.rotate();
        assert!(q.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut q = queues(&[2, 5], &[], &[]);
        assert!(q.remove(2));
        assert!(!q.remove(2));
        assert!(!q.remove(3));
        assert_eq!(q.stops(), &BTreeSet::from([5]));
    }

    #[test]
    fn remove_only_touches_the_current_tier() {
        let mut q = queues(&[5], &[3], &[]);
        q.remove(3);
        assert_eq!(q.tier_of(3), Some(Tier::Later));
    }

    #[test]
    fn add_keeps_a_floor_in_its_sooner_tier() {
        let mut q = queues(&[4], &[], &[]);
        assert_eq!(q.add_to(Tier::Later, 4), Tier::Now);
        assert_eq!(q.add_to(Tier::AfterLater, 4), Tier::Now);
        assert!(q.stops_for_later().is_empty());
    }

    #[test]
    fn add_moves_a_floor_forward() {
        let mut q = queues(&[], &[2], &[3]);
        assert_eq!(q.add_to(Tier::Now, 3), Tier::Now);
        assert_eq!(q.add_to(Tier::Later, 2), Tier::Later);
        assert_eq!(q.pending(), BTreeSet::from([2, 3]));
        assert!(q.stops_for_after_later().is_empty());
    }

    #[test]
    fn extremes_follow_the_direction() {
        let q = queues(&[2, 5], &[1, 4], &[]);
        assert_eq!(q.extreme(Tier::Now, Direction::Up), Some(5));
        assert_eq!(q.extreme(Tier::Now, Direction::Down), Some(2));
        assert_eq!(q.extreme(Tier::AfterLater, Direction::Up), None);
    }

    #[test]
    fn extends_run_mirrors_up_and_down() {
        let up = queues(&[3], &[], &[]);
        assert!(up.extends_run(Direction::Up, 1, 3));
        assert!(up.extends_run(Direction::Up, 1, 4));
        assert!(!up.extends_run(Direction::Up, 1, 2));

        let down = queues(&[3], &[], &[]);
        assert!(down.extends_run(Direction::Down, 5, 3));
        assert!(down.extends_run(Direction::Down, 5, 2));
        assert!(!down.extends_run(Direction::Down, 5, 4));
    }

    #[test]
    fn empty_run_is_extended_by_any_floor_ahead() {
        let q = StopQueues::new();
        assert!(q.extends_run(Direction::Up, 2, 3));
        assert!(!q.extends_run(Direction::Up, 2, 1));
        assert!(!q.extends_run(Direction::Down, 2, 2));
    }

    #[test]
    fn later_run_start() {
        let q = queues(&[5], &[2, 4], &[]);
        // going up, the later run comes down and ends at 2
        assert!(q.ends_later_run(Direction::Up, 1));
        assert!(q.ends_later_run(Direction::Up, 2));
        assert!(!q.ends_later_run(Direction::Up, 3));
        // going down, the later run goes up and ends at 4
        assert!(q.ends_later_run(Direction::Down, 5));
        assert!(!q.ends_later_run(Direction::Down, 3));
        assert!(StopQueues::new().ends_later_run(Direction::Up, 3));
    }
}
