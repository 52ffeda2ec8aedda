//! Pups and wolves crossing a river.
//!
//! The boat carries one pup, two pups, or one wolf at a time and can't travel
//! empty. All animals start on the left bank.

use derive_more::Display;

use crate::space::State;

pub type Count = u32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Side {
    #[display("L")]
    Left,
    #[display("R")]
    Right,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The animals on one side of the river.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
#[display("[{pups}, {wolves}]")]
pub struct Bank {
    pub pups: Count,
    pub wolves: Count,
}

impl Bank {
    pub fn new(pups: Count, wolves: Count) -> Self {
        Self { pups, wolves }
    }

    pub fn is_empty(&self) -> bool {
        self.pups == 0 && self.wolves == 0
    }
}

/// A load the boat can carry, in the order moves are tried.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Load {
    #[display("1 pup")]
    OnePup,
    #[display("2 pups")]
    TwoPups,
    #[display("1 wolf")]
    OneWolf,
}

impl Load {
    pub const ALL: [Load; 3] = [Load::OnePup, Load::TwoPups, Load::OneWolf];

    fn animals(&self) -> Bank {
        match self {
            Load::OnePup => Bank::new(1, 0),
            Load::TwoPups => Bank::new(2, 0),
            Load::OneWolf => Bank::new(0, 1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrossingState {
    left: Bank,
    right: Bank,
    boat: Side,
}

impl CrossingState {
    pub fn new(left: Bank, right: Bank, boat: Side) -> Self {
        Self { left, right, boat }
    }

    /// Every animal on the left bank, with the boat.
    pub fn start(pups: Count, wolves: Count) -> Self {
        Self::new(Bank::new(pups, wolves), Bank::default(), Side::Left)
    }

    /// Every animal on the right bank, with the boat.
    pub fn finish(pups: Count, wolves: Count) -> Self {
        Self::new(Bank::default(), Bank::new(pups, wolves), Side::Right)
    }

    pub fn left(&self) -> Bank {
        self.left
    }
    pub fn right(&self) -> Bank {
        self.right
    }
    pub fn boat(&self) -> Side {
        self.boat
    }

    pub fn total(&self) -> Bank {
        Bank::new(
            self.left.pups + self.right.pups,
            self.left.wolves + self.right.wolves,
        )
    }

    /// Ships a load from the boat's bank, if there are enough animals there.
    pub fn cross(&self, load: Load) -> Option<CrossingState> {
        let carried = load.animals();
        let (from, to) = match self.boat {
            Side::Left => (self.left, self.right),
            Side::Right => (self.right, self.left),
        };
        let from = Bank::new(
            from.pups.checked_sub(carried.pups)?,
            from.wolves.checked_sub(carried.wolves)?,
        );
        let to = Bank::new(to.pups + carried.pups, to.wolves + carried.wolves);

        Some(match self.boat {
            Side::Left => CrossingState::new(from, to, Side::Right),
            Side::Right => CrossingState::new(to, from, Side::Left),
        })
    }
}

impl State for CrossingState {
    fn is_goal(&self) -> bool {
        self.left.is_empty() && self.right == self.total() && self.boat == Side::Right
    }

    fn neighbours(&self) -> Vec<Self> {
        Load::ALL.iter().filter_map(|l| self.cross(*l)).collect()
    }
}

impl std::fmt::Display for CrossingState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.boat {
            Side::Left => write!(f, "(BOAT) left={}, right={}       ", self.left, self.right),
            Side::Right => write!(f, "       left={}, right={} (BOAT)", self.left, self.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::algorithms::bfs::solve;

    #[test]
    fn moves_from_each_bank() {
        let s = CrossingState::start(3, 3);
        assert_eq!(
            s.neighbours(),
            vec![
                CrossingState::new(Bank::new(2, 3), Bank::new(1, 0), Side::Right),
                CrossingState::new(Bank::new(1, 3), Bank::new(2, 0), Side::Right),
                CrossingState::new(Bank::new(3, 2), Bank::new(0, 1), Side::Right),
            ]
        );

        // A single pup on the boat's bank rules out the two-pup load.
        let s = CrossingState::new(Bank::new(2, 2), Bank::new(1, 1), Side::Right);
        assert_eq!(
            s.neighbours(),
            vec![
                CrossingState::new(Bank::new(3, 2), Bank::new(0, 1), Side::Left),
                CrossingState::new(Bank::new(2, 3), Bank::new(1, 0), Side::Left),
            ]
        );

        assert!(CrossingState::finish(0, 0).cross(Load::OneWolf).is_none());

        let s = CrossingState::start(3, 3).cross(Load::TwoPups).unwrap();
        assert_eq!(s.left(), Bank::new(1, 3));
        assert_eq!(s.right(), Bank::new(2, 0));
        assert_eq!(s.boat(), Side::Right);
        assert_eq!(s.total(), Bank::new(3, 3));
    }

    #[test]
    fn goal_needs_everyone_and_the_boat() {
        assert!(CrossingState::finish(3, 3).is_goal());
        assert!(!CrossingState::start(3, 3).is_goal());
        let boat_left = CrossingState::new(Bank::default(), Bank::new(3, 3), Side::Left);
        assert!(!boat_left.is_goal());
        let pup_left = CrossingState::new(Bank::new(1, 0), Bank::new(2, 3), Side::Right);
        assert!(!pup_left.is_goal());
    }

    #[test]
    fn display() {
        assert_eq!(
            CrossingState::start(3, 3).to_string(),
            "(BOAT) left=[3, 3], right=[0, 0]       "
        );
        assert_eq!(
            CrossingState::finish(2, 1).to_string(),
            "       left=[0, 0], right=[2, 1] (BOAT)"
        );
    }

    #[test]
    fn three_pups_three_wolves() {
        let start = CrossingState::start(3, 3);
        let solution = solve(start, Some(CrossingState::finish(3, 3)));

        assert_eq!(solution.path.moves(), 15);
        assert_eq!(solution.generated, 60);
        assert_eq!(solution.unique, 28);
        assert_eq!(solution.path.start(), Some(&start));
        assert!(solution.path.is_connected());
        for (i, s) in solution.path.steps() {
            assert_eq!(s.is_goal(), i == solution.path.moves());
        }
    }

    #[test]
    fn single_animals() {
        let solution = solve(CrossingState::start(1, 0), None);
        assert_eq!(solution.path.moves(), 1);
        let solution = solve(CrossingState::start(0, 1), None);
        assert_eq!(solution.path.moves(), 1);
        let solution = solve(CrossingState::start(2, 0), None);
        assert_eq!((solution.generated, solution.unique), (4, 3));
    }

    #[test]
    fn unsolvable() {
        // Nobody can bring the boat back.
        let solution = solve(CrossingState::start(1, 1), Some(CrossingState::finish(1, 1)));
        assert!(solution.path.is_empty());
        assert_eq!((solution.generated, solution.unique), (5, 3));

        let solution = solve(CrossingState::start(0, 0), Some(CrossingState::finish(0, 0)));
        assert!(solution.path.is_empty());
        assert_eq!((solution.generated, solution.unique), (1, 1));
    }
}
