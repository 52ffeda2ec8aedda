use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// A configuration of a puzzle.
///
/// States are immutable values. Equality and hashing are derived over the same
/// attributes so the search can use them as keys to recall visited states.
pub trait State: Clone + Debug + Display + PartialEq + Eq + Hash {
    /// Whether this configuration solves the puzzle on its own.
    fn is_goal(&self) -> bool;

    /// Expands a State into every State one legal move away.
    ///
    /// Must be a pure function of the State and yield the same order on every
    /// call. An empty Vec means there's no move available.
    // TODO: Figure out how to offer a SmallVec<St> without fixing its inline size per puzzle.
    fn neighbours(&self) -> Vec<Self>;
}

/// A sequence of States from a start to a goal, both included.
///
/// The empty Path means no goal was reachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St>
where
    St: State,
{
    states: Vec<St>,
}

impl<St> Path<St>
where
    St: State,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self { states: vec![] }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of States, including start and end.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Number of moves (edges) taken.
    #[inline(always)]
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&St> {
        self.states.first()
    }

    pub fn end(&self) -> Option<&St> {
        self.states.last()
    }

    pub fn get(&self, i: usize) -> Option<&St> {
        self.states.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, St> {
        self.states.iter()
    }

    /// Numbered steps, as drivers print them.
    pub fn steps(&self) -> impl Iterator<Item = (usize, &St)> {
        self.states.iter().enumerate()
    }

    #[inline(always)]
    pub fn append(&mut self, s: St) {
        self.states.push(s);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }

    /// Checks that every step is a legal move.
    pub fn is_connected(&self) -> bool {
        self.states
            .windows(2)
            .all(|w| w[0].neighbours().contains(&w[1]))
    }

    pub fn into_states(self) -> Vec<St> {
        self.states
    }
}

impl<St> IntoIterator for Path<St>
where
    St: State,
{
    type Item = St;
    type IntoIter = std::vec::IntoIter<St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<'a, St> IntoIterator for &'a Path<St>
where
    St: State,
{
    type Item = &'a St;
    type IntoIter = std::slice::Iter<'a, St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl<St> std::fmt::Display for Path<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No Solution");
        }
        for (i, s) in self.steps() {
            writeln!(f, "Step {i}: {s}")?;
        }
        Ok(())
    }
}
