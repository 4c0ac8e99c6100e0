// Search lattice for the pathfinder
//
// A grid is rebuilt for every search and owns all of its nodes. Parent links
// are indices into the same node vector, so reconstructing a path never needs
// a reference back into the grid.

use crate::types::Coord;

/// Largest board edge accepted from a request. Real boards are at most 25x25.
pub const MAX_DIMENSION: i32 = 255;

/// One cell of the search lattice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNode {
    pub position: Coord,
    /// Accumulated cost from the start
    pub g: i32,
    /// Heuristic estimate
    pub h: i32,
    /// Priority, always g + h once the node is discovered
    pub f: i32,
    /// Index of the predecessor on the best known path
    pub parent: Option<usize>,
}

impl GridNode {
    fn new(position: Coord) -> Self {
        GridNode {
            position,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }

    fn reset(&mut self) {
        self.g = 0;
        self.h = 0;
        self.f = 0;
        self.parent = None;
    }
}

/// Rectangular lattice covering every integer coordinate in [0, width] x [0, height]
#[derive(Debug, Clone)]
pub struct Grid {
    columns: usize,
    rows: usize,
    nodes: Vec<GridNode>,
}

impl Grid {
    /// Builds a (width + 1) x (height + 1) grid with zeroed costs and no parents.
    /// Negative dimensions collapse to a single row or column.
    pub fn new(width: i32, height: i32) -> Self {
        let columns = width.max(0) as usize + 1;
        let rows = height.max(0) as usize + 1;

        let mut nodes = Vec::with_capacity(columns * rows);
        for x in 0..columns {
            for y in 0..rows {
                nodes.push(GridNode::new(Coord::new(x as i32, y as i32)));
            }
        }

        Grid {
            columns,
            rows,
            nodes,
        }
    }

    /// Builds the grid for a board from a request, refusing sizes beyond `MAX_DIMENSION`
    pub fn for_board(width: i32, height: i32) -> Result<Self, String> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(format!(
                "Board {}x{} exceeds the {}x{} limit",
                width, height, MAX_DIMENSION, MAX_DIMENSION
            ));
        }
        Ok(Self::new(width, height))
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Maps a coordinate to its node index, or None when it lies outside the grid
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x >= self.columns || y >= self.rows {
            return None;
        }
        Some(x * self.rows + y)
    }

    pub fn node(&self, index: usize) -> &GridNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut GridNode {
        &mut self.nodes[index]
    }

    /// Clears every cost field and parent link
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset();
        }
    }

    /// In-bounds 4-connected neighbors of a node, ordered left, right, down, up
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let position = self.nodes[index].position;
        [
            Coord::new(position.x - 1, position.y),
            Coord::new(position.x + 1, position.y),
            Coord::new(position.x, position.y - 1),
            Coord::new(position.x, position.y + 1),
        ]
        .into_iter()
        .filter_map(|coord| self.index_of(coord))
        .collect()
    }
}
