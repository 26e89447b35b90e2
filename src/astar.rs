/// Best-first search shared by the cell-level and the portal-level searches, a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// with a stable tie-break: among frontier nodes with equal estimated cost, the one discovered
/// first is expanded first. This keeps returned paths reproducible.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

/// Parent index of the start node.
const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimate first, then the earliest discovered node
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

struct Visit<C> {
    parent: usize,
    cost: C,
    estimated_cost: C,
    closed: bool,
}

fn reverse_path<N, C>(visits: &FxIndexMap<N, Visit<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        visits.get_index(i).map(|(node, visit)| {
            i = visit.parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for a selected node. Returns the path including
/// both ends and its cost, or [None] once the frontier is exhausted.
///
/// Nodes are only relaxed while they are not yet explored, and predecessors change only on a
/// strictly smaller cost. All state lives in this call, so concurrent searches never interact.
pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Add<Output = C> + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    let start_estimate = heuristic(start);
    to_see.push(SmallestCostHolder {
        estimated_cost: start_estimate,
        index: 0,
    });
    let mut visits: FxIndexMap<N, Visit<C>> = FxIndexMap::default();
    visits.insert(
        start.clone(),
        Visit {
            parent: NO_PARENT,
            cost: Zero::zero(),
            estimated_cost: start_estimate,
            closed: false,
        },
    );
    while let Some(SmallestCostHolder {
        estimated_cost,
        index,
    }) = to_see.pop()
    {
        let (cost, successors) = {
            let (node, visit) = visits.get_index_mut(index)?;
            if success(node) {
                let cost = visit.cost;
                return Some((reverse_path(&visits, index), cost));
            }
            // A node is pushed again whenever its estimate drops; only the entry matching the
            // current estimate of an unexplored node is live.
            if visit.closed || estimated_cost > visit.estimated_cost {
                continue;
            }
            visit.closed = true;
            (visit.cost, successors(node))
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let estimate;
            let n;
            match visits.entry(successor) {
                Vacant(e) => {
                    estimate = new_cost + heuristic(e.key());
                    n = e.index();
                    e.insert(Visit {
                        parent: index,
                        cost: new_cost,
                        estimated_cost: estimate,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    let visit = e.get();
                    if visit.closed || new_cost >= visit.cost {
                        continue;
                    }
                    estimate = new_cost + heuristic(e.key());
                    n = e.index();
                    let visit = e.get_mut();
                    visit.parent = index;
                    visit.cost = new_cost;
                    visit.estimated_cost = estimate;
                }
            }
            to_see.push(SmallestCostHolder {
                estimated_cost: estimate,
                index: n,
            });
        }
    }
    None
}
