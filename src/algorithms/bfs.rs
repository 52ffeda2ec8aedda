//! Implementation of Breadth-First Search.
//!
//! States are expanded in strict FIFO order and recorded only once, so the
//! first Path found to a goal uses the fewest moves.

use std::collections::VecDeque;
use std::marker::PhantomData;

use derive_more::Display;

use crate::problem::Instance;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::space::Path;
use crate::space::State;

/// Lifecycle of a search run.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum SearchStatus {
    #[display("idle")]
    Idle,
    #[display("running")]
    Running,
    /// A goal was dequeued.
    #[display("solved")]
    Solved,
    /// The frontier emptied without reaching a goal.
    #[display("exhausted")]
    Exhausted,
}

impl SearchStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, SearchStatus::Solved | SearchStatus::Exhausted)
    }
}

/// BFS over the States reachable from a Problem's start.
#[derive(Debug)]
pub struct BfsSearch<P, St>
where
    P: Problem<St>,
    St: State,
{
    /// The predecessor map. Seeded with the start.
    search_tree: SearchTree<St>,

    /// Recorded nodes waiting for expansion, oldest first.
    open: VecDeque<SearchTreeIndex>,

    /// The goal node, once dequeued.
    goal: Option<SearchTreeIndex>,

    status: SearchStatus,
    /// States generated, the start included. Duplicates count.
    generated: usize,
    /// Nodes taken from `open` and checked.
    expanded: usize,

    problem: P,

    _phantom_state: PhantomData<St>,
}

impl<P, St> BfsSearch<P, St>
where
    P: Problem<St>,
    St: State,
{
    /// Initialises the Search
    #[must_use]
    pub fn new(problem: P) -> Self {
        let mut search = Self {
            search_tree: SearchTree::<St>::new(),
            open: VecDeque::with_capacity(1024),
            goal: None,
            status: SearchStatus::Idle,
            generated: 0,
            expanded: 0,

            problem,

            _phantom_state: PhantomData,
        };

        let start = search.problem.start().clone();
        if let Some(node_index) = search.search_tree.record(&start, None) {
            search.generated += 1;
            search.open.push_back(node_index);
        }

        search
    }

    /// Runs the search until the first goal is dequeued or every reachable
    /// State was expanded.
    ///
    /// Once finished, further calls return the same Path without exploring.
    pub fn run(&mut self) -> Path<St> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Run");

        if !self.status.is_finished() {
            self.status = SearchStatus::Running;
            log::debug!("BFS from {}", self.problem.start());

            self.status = match self.find_goal() {
                Some(goal) => {
                    self.goal = Some(goal);
                    SearchStatus::Solved
                }
                None => SearchStatus::Exhausted,
            };
            log::debug!(
                "BFS {}: generated={}, unique={}, expanded={}",
                self.status,
                self.generated,
                self.unique(),
                self.expanded,
            );
        }

        self.path()
    }

    fn find_goal(&mut self) -> Option<SearchTreeIndex> {
        while let Some(node_index) = self.open.pop_front() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            self.expanded += 1;
            let state = self.search_tree[node_index].state().clone();

            if self.problem.is_goal(&state) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                return Some(node_index);
            }

            // Expand state
            for s in state.neighbours() {
                #[cfg(feature = "coz_profile")]
                coz::scope!("ReachNode");

                self.generated += 1;
                // Only new States join the frontier. The first parent wins.
                if let Some(neigh_index) = self.search_tree.record(&s, Some(node_index)) {
                    self.open.push_back(neigh_index);
                }
            }
        }

        None
    }

    /// The Path to the goal found so far, or the empty Path.
    #[must_use]
    pub fn path(&self) -> Path<St> {
        let path = match self.goal {
            Some(goal) => self.search_tree.path(goal),
            None => Path::empty(),
        };
        self.verify_path(&path);
        path
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_path(&self, _path: &Path<St>) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_path(&self, path: &Path<St>) {
        assert!(path.is_connected(), "Reconstructed path skips moves");
        assert!(path.len() <= self.unique());
        if let Some(start) = path.start() {
            assert_eq!(start, self.problem.start());
        }
        if let Some(end) = path.end() {
            assert!(self.problem.is_goal(end));
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Every State generated, duplicates included.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Distinct States recorded, the start included.
    pub fn unique(&self) -> usize {
        self.search_tree.len()
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "BfsSearch Stats ({}):", self.status)?;
        writeln!(
            out,
            "  - Generated:      {}",
            self.generated.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.expanded.separate_with_commas()
        )?;

        let s = size_of::<(St, SearchTreeIndex)>() + size_of::<St>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        let (nodes_capacity, map_capacity) = self.search_tree.capacity();
        writeln!(
            out,
            "  - |Nodes|*: {} / {}",
            nodes_capacity.separate_with_commas(),
            map_capacity.separate_with_commas(),
        )?;

        let s = size_of::<SearchTreeIndex>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        Ok(())
    }
}

/// The outcome of [`solve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<St>
where
    St: State,
{
    /// Start to goal, or empty when no goal is reachable.
    pub path: Path<St>,
    pub generated: usize,
    pub unique: usize,
}

impl<St> Solution<St>
where
    St: State,
{
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Finds a shortest Path from `start` to a goal State.
///
/// Goals are States where [`State::is_goal`] holds or, if given, States equal
/// to `target`.
///
/// ```
/// use puzzles::algorithms::bfs::solve;
/// use puzzles::problems::strings::StringsState;
///
/// let start = StringsState::parse("AB", "BA").unwrap();
/// let solution = solve(start, None);
///
/// let steps: Vec<String> = solution.path.iter().map(|s| s.to_string()).collect();
/// assert_eq!(steps, ["AB", "BB", "BA"]);
/// assert_eq!(solution.generated, 9);
/// assert_eq!(solution.unique, 7);
/// ```
pub fn solve<St>(start: St, target: Option<St>) -> Solution<St>
where
    St: State,
{
    let problem = match target {
        Some(target) => Instance::with_target(start, target),
        None => Instance::new(start),
    };
    let mut search = BfsSearch::<_, St>::new(problem);
    let path = search.run();

    Solution {
        path,
        generated: search.generated(),
        unique: search.unique(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    /// A node in a small fixed graph, stored as adjacency bitmasks.
    #[derive(Copy, Clone, Debug, derive_more::Display, PartialEq, Eq, Hash)]
    #[display("n{id}")]
    struct GraphNode {
        id: u8,
        goal: u8,
        edges: &'static [u16],
    }

    impl State for GraphNode {
        fn is_goal(&self) -> bool {
            self.id == self.goal
        }
        fn neighbours(&self) -> Vec<Self> {
            let mask = self.edges[self.id as usize];
            (0..self.edges.len() as u8)
                .filter(|n| mask & (1 << n) != 0)
                .map(|id| GraphNode { id, ..*self })
                .collect()
        }
    }

    /// Shortest distances by repeated relaxation.
    fn all_pairs_distances(edges: &[u16]) -> Vec<Vec<Option<usize>>> {
        let n = edges.len();
        let mut d = vec![vec![None; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = Some(0);
            for (j, cell) in row.iter_mut().enumerate() {
                if i != j && edges[i] & (1 << j) != 0 {
                    *cell = Some(1);
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(a), Some(b)) = (d[i][k], d[k][j]) {
                        if d[i][j].is_none_or(|c| a + b < c) {
                            d[i][j] = Some(a + b);
                        }
                    }
                }
            }
        }
        d
    }

    fn random_graph(rng: &mut ChaCha8Rng, n: usize) -> &'static [u16] {
        let edges: Vec<u16> = (0..n)
            .map(|i| {
                let mut mask = 0u16;
                for j in 0..n {
                    if i != j && rng.random_bool(0.25) {
                        mask |= 1 << j;
                    }
                }
                mask
            })
            .collect();
        Vec::leak(edges)
    }

    const DIAMOND: &[u16] = &[
        0b0110, // 0 -> 1, 2
        0b1000, // 1 -> 3
        0b1000, // 2 -> 3
        0b0000, // 3
    ];

    #[test]
    fn status_transitions() {
        let start = GraphNode {
            id: 0,
            goal: 3,
            edges: DIAMOND,
        };
        let mut search = BfsSearch::<_, GraphNode>::new(Instance::new(start));
        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.unique(), 1);
        assert_eq!(search.frontier_len(), 1);

        let path = search.run();
        assert_eq!(search.status(), SearchStatus::Solved);
        assert_eq!(path.moves(), 2);
        // 1 reaches 3 first.
        assert_eq!(path.get(1).map(|s| s.id), Some(1));

        // Running again changes nothing.
        let generated = search.generated();
        assert_eq!(search.run(), path);
        assert_eq!(search.generated(), generated);
    }

    #[test]
    fn counts_duplicates() {
        let start = GraphNode {
            id: 0,
            goal: 3,
            edges: DIAMOND,
        };
        let solution = solve(start, None);
        // start, 1, 2, then 3 twice.
        assert_eq!(solution.generated, 5);
        assert_eq!(solution.unique, 4);
    }

    #[test]
    fn exhausts_without_goal() {
        let start = GraphNode {
            id: 3,
            goal: 0,
            edges: DIAMOND,
        };
        let mut search = BfsSearch::<_, GraphNode>::new(Instance::new(start));
        assert!(search.run().is_empty());
        assert_eq!(search.status(), SearchStatus::Exhausted);
        assert_eq!(search.unique(), 1);
        assert_eq!(search.generated(), 1);
    }

    #[test]
    fn start_is_goal() {
        let start = GraphNode {
            id: 2,
            goal: 2,
            edges: DIAMOND,
        };
        let solution = solve(start, None);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.unique, 1);
        assert_eq!(solution.generated, 1);
    }

    #[test]
    fn target_ends_search() {
        // No State is a goal on its own here.
        let start = GraphNode {
            id: 0,
            goal: u8::MAX,
            edges: DIAMOND,
        };
        let target = GraphNode { id: 2, ..start };
        let solution = solve(start, Some(target));
        assert_eq!(solution.path.end(), Some(&target));
        assert_eq!(solution.path.moves(), 1);

        assert!(!solve(start, None).is_solved());
    }

    #[test]
    fn shortest_on_random_graphs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _instance in 0..40 {
            let n = 10;
            let edges = random_graph(&mut rng, n);
            let distances = all_pairs_distances(edges);

            for from in 0..n as u8 {
                for to in 0..n as u8 {
                    let start = GraphNode {
                        id: from,
                        goal: to,
                        edges,
                    };
                    let solution = solve(start, None);

                    match distances[from as usize][to as usize] {
                        Some(d) => {
                            assert_eq!(solution.path.moves(), d);
                            assert_eq!(solution.path.start(), Some(&start));
                            assert!(solution.path.end().is_some_and(|s| s.is_goal()));
                            assert!(solution.path.is_connected());
                            assert!(solution.unique > d);
                        }
                        None => {
                            assert!(solution.path.is_empty());
                            assert_eq!(
                                solution.unique,
                                distances[from as usize].iter().flatten().count()
                            );
                        }
                    }
                    assert!(solution.generated >= solution.unique);
                }
            }
        }
    }

    #[test]
    fn repeatable() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let edges = random_graph(&mut rng, 12);
        let start = GraphNode {
            id: 0,
            goal: 11,
            edges,
        };
        assert_eq!(solve(start, None), solve(start, None));
    }

    #[test]
    fn writes_stats() {
        let start = GraphNode {
            id: 0,
            goal: 3,
            edges: DIAMOND,
        };
        let mut search = BfsSearch::<_, GraphNode>::new(Instance::new(start));
        search.run();

        let mut out = Vec::new();
        search.write_stats(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("BfsSearch Stats (solved):"));
        assert!(out.contains("Generated:      5"));
    }
}
