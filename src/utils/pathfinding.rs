//! # Pathfinding Algorithms
//!
//! Budget-limited reachability for movement ranges and A* path search for
//! AI movement.

use crate::Coord;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Frontier entry for the uniform-cost search.
#[derive(Debug, Clone, Copy)]
struct ReachNode {
    coord: Coord,
    cost: u32,
    /// Discovery sequence number, breaks ties between equal costs
    order: u64,
}

impl PartialEq for ReachNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.order == other.order
    }
}

impl Eq for ReachNode {}

impl PartialOrd for ReachNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReachNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Uniform-cost search from `start` that stops expanding past `budget`.
///
/// `step_cost` returns the cost of entering a cell, or `None` if the cell
/// cannot be entered at all. Returns every cell other than `start` whose
/// cheapest path costs at most `budget`, in the order the cells were
/// settled, paired with that cost.
pub fn reachable_within<F>(start: Coord, budget: u32, mut step_cost: F) -> Vec<(Coord, u32)>
where
    F: FnMut(Coord) -> Option<u32>,
{
    let mut best: HashMap<Coord, u32> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut settled = Vec::new();
    let mut order = 0u64;

    best.insert(start, 0);
    frontier.push(ReachNode {
        coord: start,
        cost: 0,
        order,
    });

    while let Some(node) = frontier.pop() {
        // Stale entry, a cheaper route was already settled
        if best.get(&node.coord).is_some_and(|&cost| cost < node.cost) {
            continue;
        }
        if node.coord != start {
            settled.push((node.coord, node.cost));
        }

        for neighbor in node.coord.cardinal_neighbors() {
            let Some(cost) = step_cost(neighbor) else {
                continue;
            };
            let total = node.cost.saturating_add(cost);
            if total > budget {
                continue;
            }
            if best.get(&neighbor).is_some_and(|&known| known <= total) {
                continue;
            }
            best.insert(neighbor, total);
            order += 1;
            frontier.push(ReachNode {
                coord: neighbor,
                cost: total,
                order,
            });
        }
    }

    settled
}

/// Finds the cheapest 4-connected path from `start` to `goal` with A*.
///
/// `step_cost` has the same contract as in [`reachable_within`]; the goal
/// cell is always enterable so paths can end next to (or on) an occupied
/// target. The returned path starts with `start` and ends with `goal`.
pub fn find_path<F>(start: Coord, goal: Coord, mut step_cost: F) -> Option<(Vec<Coord>, u32)>
where
    F: FnMut(Coord) -> Option<u32>,
{
    ::pathfinding::prelude::astar(
        &start,
        |&coord| {
            coord
                .cardinal_neighbors()
                .into_iter()
                .filter_map(|neighbor| {
                    if neighbor == goal {
                        Some((neighbor, step_cost(neighbor).unwrap_or(1)))
                    } else {
                        step_cost(neighbor).map(|cost| (neighbor, cost))
                    }
                })
                .collect::<Vec<_>>()
        },
        // Manhattan distance never overestimates since every step costs >= 1
        |&coord| (coord.x.abs_diff(goal.x) + coord.y.abs_diff(goal.y)) as u32,
        |&coord| coord == goal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: usize, height: usize) -> impl FnMut(Coord) -> Option<u32> {
        move |c: Coord| (c.x < width && c.y < height).then_some(1)
    }

    #[test]
    fn test_reachable_counts_diamond() {
        let reached = reachable_within(Coord::new(5, 5), 2, open_grid(11, 11));
        // Manhattan diamond of radius 2 minus the centre
        assert_eq!(reached.len(), 12);
        assert!(reached.iter().all(|&(_, cost)| cost <= 2));
    }

    #[test]
    fn test_reachable_is_settled_in_cost_order() {
        let reached = reachable_within(Coord::new(0, 0), 4, open_grid(5, 5));
        for pair in reached.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn test_zero_budget_reaches_nothing() {
        assert!(reachable_within(Coord::new(2, 2), 0, open_grid(5, 5)).is_empty());
    }

    #[test]
    fn test_expensive_cells_limit_reach() {
        let swamp = Coord::new(1, 0);
        let step = |c: Coord| {
            if c.x >= 3 || c.y >= 1 {
                None
            } else if c == swamp {
                Some(3)
            } else {
                Some(1)
            }
        };
        let reached = reachable_within(Coord::new(0, 0), 3, step);
        assert_eq!(reached, vec![(swamp, 3)]);
    }

    #[test]
    fn test_find_path_around_wall() {
        // Wall along x == 2 except at y == 4
        let step = |c: Coord| {
            if c.x >= 5 || c.y >= 5 || (c.x == 2 && c.y != 4) {
                None
            } else {
                Some(1)
            }
        };
        let (path, cost) = find_path(Coord::new(0, 0), Coord::new(4, 0), step).unwrap();
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(4, 0)));
        assert!(path.contains(&Coord::new(2, 4)));
        assert_eq!(cost, 12);
    }

    #[test]
    fn test_find_path_enters_blocked_goal() {
        let goal = Coord::new(2, 0);
        let step = move |c: Coord| (c.x < 3 && c.y < 1 && c != goal).then_some(1);
        let (path, _) = find_path(Coord::new(0, 0), goal, step).unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_find_path_unreachable() {
        let step = |c: Coord| (c.x < 1 && c.y < 3).then_some(1);
        assert!(find_path(Coord::new(0, 0), Coord::new(5, 5), step).is_none());
    }
}
