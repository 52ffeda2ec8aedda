use rustc_hash::FxHashMap;

use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchTreeNode<St>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchTreeIndex {
    index: usize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index
    }
}

#[derive(Debug)]
pub struct SearchTreeNode<St>
where
    St: State,
{
    /// The node that first discovered this one. `None` for the start.
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
}

impl<St> SearchTreeNode<St>
where
    St: State,
{
    pub fn new(s: St, parent: Option<SearchTreeIndex>) -> Self {
        Self { parent, state: s }
    }

    pub fn state(&self) -> &St {
        &self.state
    }
}

/// The predecessor map.
///
/// Every State ever recorded gets a node pointing to the State that first
/// reached it. Nodes are never removed or re-parented, so the first discovery
/// wins.
pub struct SearchTree<St>
where
    St: State,
{
    /// Append-only. `SearchTreeIndex` values stay valid for the whole search.
    nodes: Vec<SearchTreeNode<St>>,
    /// Finds existing Search Nodes from their `State`.
    ///
    /// It's the same size as `nodes`.
    node_map: FxHashMap<St, SearchTreeIndex>,
}

impl<St> SearchTree<St>
where
    St: State,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_map: FxHashMap::default(),
        }
    }

    /// Records a State unless it was already known.
    ///
    /// Returns the index of the new node, or `None` if the State had been
    /// recorded before.
    #[inline(always)]
    pub fn record(&mut self, s: &St, parent: Option<SearchTreeIndex>) -> Option<SearchTreeIndex> {
        if self.node_map.contains_key(s) {
            return None;
        }
        let node_index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(SearchTreeNode::new(s.clone(), parent));
        self.node_map.insert(s.clone(), node_index);
        debug_assert_eq!(self.nodes.len(), self.node_map.len());

        Some(node_index)
    }

    #[inline(always)]
    #[must_use]
    pub fn find(&self, s: &St) -> Option<SearchTreeIndex> {
        self.node_map.get(s).copied()
    }

    /// The State that first reached `s`.
    ///
    /// `Some(None)` for the start, `None` for States never recorded.
    #[must_use]
    pub fn predecessor(&self, s: &St) -> Option<Option<&St>> {
        let node = &self[self.find(s)?];
        Some(node.parent.map(|p| self[p].state()))
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> (usize, usize) {
        (self.nodes.capacity(), self.node_map.capacity())
    }

    /// Walks back from a node to the root and returns the Path in order.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Path<St> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut path = Path::<St>::new_from_start(self[node_index].state().clone());

        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(parent_index.get() < node_index.get());
            path.append(self[parent_index].state().clone());
            node_index = parent_index;
        }

        path.reverse();
        path
    }

    /// Path from the root to a State, or the empty Path when it was never
    /// recorded.
    #[must_use]
    pub fn path_to(&self, s: &St) -> Path<St> {
        match self.find(s) {
            Some(node_index) => self.path(node_index),
            None => Path::empty(),
        }
    }
}

impl<St> Default for SearchTree<St>
where
    St: State,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St> std::ops::Index<SearchTreeIndex> for SearchTree<St>
where
    St: State,
{
    type Output = SearchTreeNode<St>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl<St> std::fmt::Debug for SearchTree<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, derive_more::Display, PartialEq, Eq, Hash)]
    struct Node(u8);

    impl State for Node {
        fn is_goal(&self) -> bool {
            false
        }
        fn neighbours(&self) -> Vec<Self> {
            vec![Node(self.0 + 1), Node(self.0 + 2)]
        }
    }

    #[test]
    fn first_discovery_wins() {
        let mut tree = SearchTree::<Node>::new();
        let root = tree.record(&Node(0), None).unwrap();
        let one = tree.record(&Node(1), Some(root)).unwrap();
        let two = tree.record(&Node(2), Some(root)).unwrap();
        assert!(tree.record(&Node(2), Some(one)).is_none());
        tree.record(&Node(3), Some(two)).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.predecessor(&Node(0)), Some(None));
        assert_eq!(tree.predecessor(&Node(2)), Some(Some(&Node(0))));
        assert_eq!(tree.predecessor(&Node(3)), Some(Some(&Node(2))));
        assert_eq!(tree.predecessor(&Node(9)), None);
    }

    #[test]
    fn reconstructs_paths() {
        let mut tree = SearchTree::<Node>::new();
        let root = tree.record(&Node(0), None).unwrap();
        let two = tree.record(&Node(2), Some(root)).unwrap();
        let four = tree.record(&Node(4), Some(two)).unwrap();

        let path = tree.path(four);
        assert_eq!(path.into_states(), vec![Node(0), Node(2), Node(4)]);
        assert_eq!(tree.path(root).len(), 1);
        assert!(tree.path_to(&Node(7)).is_empty());
        assert!(tree.path_to(&Node(4)).is_connected());
    }
}
