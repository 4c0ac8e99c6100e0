// A* search over a Grid
//
// The open set is a plain vector scanned linearly for the lowest f, so ties go
// to whichever node was discovered first. Boards in this game are small
// (typically at most 25x25) which keeps the quadratic worst case cheap.

use log::debug;
use serde::Deserialize;
use std::collections::HashSet;

use crate::grid::Grid;
use crate::types::Coord;

/// Which position the heuristic measures a newly discovered neighbor against
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicTarget {
    /// Distance to the node being expanded. Always 1, so the search expands
    /// in breadth-first order.
    #[default]
    CurrentNode,
    /// Distance to the goal (textbook A*)
    Goal,
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Finds the shortest 4-connected path from `start` to `goal`.
///
/// The returned coordinates begin one step after `start` and end at `goal`.
/// An empty vector means there is nothing to walk: the goal is unreachable,
/// either endpoint lies outside the grid, or `start == goal`.
///
/// The grid's cost fields are reset before searching and left in their final
/// state afterwards.
pub fn search(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    obstacles: &[Coord],
    heuristic: HeuristicTarget,
) -> Vec<Coord> {
    debug!("Starting search to {:?} from {:?}", goal, start);
    grid.reset();

    let (start_idx, goal_idx) = match (grid.index_of(start), grid.index_of(goal)) {
        (Some(s), Some(g)) => (s, g),
        _ => return vec![],
    };

    let obstacles: HashSet<Coord> = obstacles.iter().copied().collect();
    let mut closed: HashSet<Coord> = HashSet::new();
    let mut open: Vec<usize> = vec![start_idx];
    let mut in_open = vec![false; grid.len()];
    in_open[start_idx] = true;

    while !open.is_empty() {
        let mut lowest = 0;
        for (i, &idx) in open.iter().enumerate() {
            if grid.node(idx).f < grid.node(open[lowest]).f {
                lowest = i;
            }
        }
        let current = open[lowest];

        if current == goal_idx {
            return reconstruct_path(grid, current);
        }

        open.remove(lowest);
        in_open[current] = false;

        let current_position = grid.node(current).position;
        let current_g = grid.node(current).g;
        closed.insert(current_position);

        for neighbor in grid.neighbors(current) {
            let position = grid.node(neighbor).position;
            if closed.contains(&position) || obstacles.contains(&position) {
                continue;
            }

            let tentative_g = current_g + 1;
            let improved = if !in_open[neighbor] {
                grid.node_mut(neighbor).h = match heuristic {
                    HeuristicTarget::CurrentNode => manhattan_distance(position, current_position),
                    HeuristicTarget::Goal => manhattan_distance(position, goal),
                };
                open.push(neighbor);
                in_open[neighbor] = true;
                true
            } else {
                tentative_g < grid.node(neighbor).g
            };

            if improved {
                let node = grid.node_mut(neighbor);
                node.parent = Some(current);
                node.g = tentative_g;
                node.f = node.g + node.h;
            }
        }
    }

    vec![]
}

/// Walks parent links back from `end`, stopping at the parentless start node
fn reconstruct_path(grid: &Grid, end: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut cursor = end;
    while let Some(parent) = grid.node(cursor).parent {
        path.push(grid.node(cursor).position);
        cursor = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Reference shortest-path length, None when unreachable
    fn bfs_distance(width: i32, height: i32, start: Coord, goal: Coord, obstacles: &[Coord]) -> Option<usize> {
        let mut seen: HashSet<Coord> = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back((start, 0usize));
        while let Some((coord, dist)) = queue.pop_front() {
            if coord == goal {
                return Some(dist);
            }
            for next in [
                Coord::new(coord.x - 1, coord.y),
                Coord::new(coord.x + 1, coord.y),
                Coord::new(coord.x, coord.y - 1),
                Coord::new(coord.x, coord.y + 1),
            ] {
                let in_bounds = next.x >= 0 && next.y >= 0 && next.x <= width && next.y <= height;
                if in_bounds && !obstacles.contains(&next) && seen.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }

    fn assert_valid_path(width: i32, height: i32, start: Coord, goal: Coord, obstacles: &[Coord], path: &[Coord]) {
        assert_eq!(path.last(), Some(&goal));
        let mut previous = start;
        let mut visited = HashSet::new();
        for &step in path {
            assert_eq!(manhattan_distance(previous, step), 1, "{:?} -> {:?} is not one step", previous, step);
            assert!(step.x >= 0 && step.y >= 0 && step.x <= width && step.y <= height);
            assert!(!obstacles.contains(&step), "path crosses obstacle {:?}", step);
            assert!(visited.insert(step), "path repeats {:?}", step);
            previous = step;
        }
    }

    #[test]
    fn test_single_step_path() {
        let mut grid = Grid::new(3, 3);
        let head = Coord::new(1, 1);
        let path = search(&mut grid, head, Coord::new(2, 1), &[head], HeuristicTarget::CurrentNode);
        assert_eq!(path, vec![Coord::new(2, 1)]);
    }

    #[test]
    fn test_equal_cost_tie_goes_to_first_discovered() {
        // Both (2,1) and (1,2) reach (2,2) in two steps. (2,1) is discovered
        // first and expanded first, so it becomes the goal's parent.
        let mut grid = Grid::new(3, 3);
        let head = Coord::new(1, 1);
        let path = search(&mut grid, head, Coord::new(2, 2), &[head], HeuristicTarget::CurrentNode);
        assert_eq!(path, vec![Coord::new(2, 1), Coord::new(2, 2)]);
    }

    #[test]
    fn test_neighbor_order_decides_between_equal_paths() {
        // (2,1) is discovered before (1,0) since right comes before down
        let mut grid = Grid::new(3, 3);
        let head = Coord::new(1, 1);
        let path = search(&mut grid, head, Coord::new(2, 0), &[head], HeuristicTarget::CurrentNode);
        assert_eq!(path, vec![Coord::new(2, 1), Coord::new(2, 0)]);

        // left is discovered before up
        let path = search(&mut grid, head, Coord::new(0, 2), &[head], HeuristicTarget::CurrentNode);
        assert_eq!(path, vec![Coord::new(0, 1), Coord::new(0, 2)]);
    }

    #[test]
    fn test_start_equals_goal_is_empty() {
        let mut grid = Grid::new(3, 3);
        let path = search(&mut grid, Coord::new(1, 1), Coord::new(1, 1), &[], HeuristicTarget::CurrentNode);
        assert!(path.is_empty());
    }

    #[test]
    fn test_out_of_bounds_goal_is_empty() {
        let mut grid = Grid::new(3, 3);
        let path = search(&mut grid, Coord::new(1, 1), Coord::new(9, 1), &[], HeuristicTarget::CurrentNode);
        assert!(path.is_empty());
        let path = search(&mut grid, Coord::new(1, 1), Coord::new(-1, 1), &[], HeuristicTarget::CurrentNode);
        assert!(path.is_empty());
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let mut grid = Grid::new(4, 4);
        let goal = Coord::new(2, 2);
        let walls = [
            Coord::new(1, 2),
            Coord::new(3, 2),
            Coord::new(2, 1),
            Coord::new(2, 3),
        ];
        let path = search(&mut grid, Coord::new(0, 0), goal, &walls, HeuristicTarget::CurrentNode);
        assert!(path.is_empty());
    }

    #[test]
    fn test_goal_on_obstacle_is_unreachable() {
        let mut grid = Grid::new(3, 3);
        let goal = Coord::new(3, 3);
        let path = search(&mut grid, Coord::new(0, 0), goal, &[goal], HeuristicTarget::Goal);
        assert!(path.is_empty());
    }

    #[test]
    fn test_routes_around_wall() {
        // Vertical wall at x=2 with a gap at the top (y=4)
        let walls: Vec<Coord> = (0..4).map(|y| Coord::new(2, y)).collect();
        let start = Coord::new(0, 0);
        let goal = Coord::new(4, 0);
        let mut grid = Grid::new(4, 4);

        let path = search(&mut grid, start, goal, &walls, HeuristicTarget::CurrentNode);

        assert_valid_path(4, 4, start, goal, &walls, &path);
        assert_eq!(Some(path.len()), bfs_distance(4, 4, start, goal, &walls));
        assert!(path.contains(&Coord::new(2, 4)));
    }

    #[test]
    fn test_search_is_deterministic_and_grid_reusable() {
        let walls = [Coord::new(1, 1), Coord::new(2, 1), Coord::new(3, 3)];
        let start = Coord::new(0, 0);
        let goal = Coord::new(4, 4);

        let mut grid = Grid::new(5, 5);
        let first = search(&mut grid, start, goal, &walls, HeuristicTarget::CurrentNode);
        let second = search(&mut grid, start, goal, &walls, HeuristicTarget::CurrentNode);
        let fresh = search(&mut Grid::new(5, 5), start, goal, &walls, HeuristicTarget::CurrentNode);

        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_paths_are_shortest_on_small_grids() {
        // Deterministic obstacle layouts from a small LCG
        let mut seed: u32 = 0x2545_f491;
        let mut next = || {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) % 100
        };

        for width in 2..6 {
            for height in 2..6 {
                let mut obstacles = Vec::new();
                for x in 0..=width {
                    for y in 0..=height {
                        if next() < 25 {
                            obstacles.push(Coord::new(x, y));
                        }
                    }
                }
                let start = Coord::new(0, 0);
                let goal = Coord::new(width, height);
                obstacles.retain(|c| *c != start && *c != goal);

                for heuristic in [HeuristicTarget::CurrentNode, HeuristicTarget::Goal] {
                    let mut grid = Grid::new(width, height);
                    let path = search(&mut grid, start, goal, &obstacles, heuristic);
                    match bfs_distance(width, height, start, goal, &obstacles) {
                        Some(expected) => {
                            assert_valid_path(width, height, start, goal, &obstacles, &path);
                            assert_eq!(path.len(), expected, "{}x{} {:?}", width, height, heuristic);
                        }
                        None => assert!(path.is_empty()),
                    }
                }
            }
        }
    }

    #[test]
    fn test_current_node_heuristic_is_always_one() {
        let mut grid = Grid::new(3, 3);
        let goal = Coord::new(3, 3);
        search(&mut grid, Coord::new(0, 0), goal, &[], HeuristicTarget::CurrentNode);
        let node = grid.node(grid.index_of(goal).unwrap());
        assert_eq!(node.h, 1);
        assert_eq!(node.g, 6);
        assert_eq!(node.f, 7);
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(Coord::new(1, 1), Coord::new(4, 3)), 5);
        assert_eq!(manhattan_distance(Coord::new(4, 3), Coord::new(1, 1)), 5);
        assert_eq!(manhattan_distance(Coord::new(2, 2), Coord::new(2, 2)), 0);
    }
}
