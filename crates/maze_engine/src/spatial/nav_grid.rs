//! Navigation grid
//!
//! Unit cells centred on integer X/Z coordinates, covering a `width` by
//! `depth` area centred on the origin. Cells under walls are blocked; paths
//! are breadth-first over the four axis neighbours.

use std::collections::VecDeque;

use crate::foundation::math::Vec3;
use crate::physics::Aabb;

/// Integer cell coordinate; the cell's centre is at world (x, z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// World X of the cell centre
    pub x: i32,
    /// World Z of the cell centre
    pub z: i32,
}

impl Cell {
    /// Create a cell
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing the X/Z of `position`
    pub fn containing(position: Vec3) -> Self {
        Self::new(position.x.round() as i32, position.z.round() as i32)
    }

    /// World position of the cell centre at height `y`
    pub fn center(self, y: f32) -> Vec3 {
        Vec3::new(self.x as f32, y, self.z as f32)
    }

    fn neighbours(self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.z),
            Cell::new(self.x - 1, self.z),
            Cell::new(self.x, self.z + 1),
            Cell::new(self.x, self.z - 1),
        ]
    }
}

/// Walkability grid
#[derive(Debug, Clone)]
pub struct NavGrid {
    width: i32,
    depth: i32,
    blocked: Vec<bool>,
}

impl NavGrid {
    /// Open grid of `width` by `depth` cells centred on the origin
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width: width as i32,
            depth: depth as i32,
            blocked: vec![false; width * depth],
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = cell.x + self.width / 2;
        let z = cell.z + self.depth / 2;
        if x < 0 || z < 0 || x >= self.width || z >= self.depth {
            return None;
        }
        Some((z * self.width + x) as usize)
    }

    /// Whether `cell` lies on the grid
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Whether `cell` is off the grid or under a wall
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.blocked[i])
    }

    /// Mark a single cell as blocked
    pub fn block(&mut self, cell: Cell) {
        if let Some(i) = self.index(cell) {
            self.blocked[i] = true;
        }
    }

    /// Block every cell whose centre lies inside the X/Z footprint of `bounds`
    pub fn block_footprint(&mut self, bounds: &Aabb) {
        let min_x = bounds.min.x.ceil() as i32;
        let max_x = bounds.max.x.floor() as i32;
        let min_z = bounds.min.z.ceil() as i32;
        let max_z = bounds.max.z.floor() as i32;
        for z in min_z..=max_z {
            for x in min_x..=max_x {
                self.block(Cell::new(x, z));
            }
        }
    }

    /// Number of blocked cells
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Shortest four-connected path from `start` to `goal`, both included
    ///
    /// The start cell may itself be blocked so that an agent nudged into a
    /// wall can still walk out. Returns `None` when the goal is blocked or
    /// unreachable.
    pub fn path(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        let start_index = self.index(start)?;
        let goal_index = self.index(goal)?;
        if self.blocked[goal_index] {
            return None;
        }
        if start_index == goal_index {
            return Some(vec![start]);
        }

        let mut came_from: Vec<Option<Cell>> = vec![None; self.blocked.len()];
        let mut visited = vec![false; self.blocked.len()];
        let mut frontier = VecDeque::from([start]);
        visited[start_index] = true;

        while let Some(cell) = frontier.pop_front() {
            if cell == goal {
                let mut path = vec![goal];
                let mut current = goal;
                while let Some(previous) = self.index(current).and_then(|i| came_from[i]) {
                    path.push(previous);
                    current = previous;
                }
                path.reverse();
                return Some(path);
            }
            for next in cell.neighbours() {
                let Some(i) = self.index(next) else { continue };
                if visited[i] || self.blocked[i] {
                    continue;
                }
                visited[i] = true;
                came_from[i] = Some(cell);
                frontier.push_back(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_centred_on_origin() {
        let grid = NavGrid::new(10, 10);
        assert!(grid.contains(Cell::new(-5, -5)));
        assert!(grid.contains(Cell::new(4, 4)));
        assert!(!grid.contains(Cell::new(5, 0)));
        assert!(grid.is_blocked(Cell::new(5, 0)));
    }

    #[test]
    fn test_footprint_blocks_covered_cells() {
        let mut grid = NavGrid::new(10, 10);
        grid.block_footprint(&Aabb::from_center(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.5, 1.0, 0.5)));
        assert_eq!(grid.blocked_count(), 3);
        assert!(grid.is_blocked(Cell::new(-1, 0)));
        assert!(grid.is_blocked(Cell::new(1, 0)));
        assert!(!grid.is_blocked(Cell::new(2, 0)));
    }

    #[test]
    fn test_path_goes_around_wall() {
        let mut grid = NavGrid::new(10, 10);
        for z in -2..=2 {
            grid.block(Cell::new(0, z));
        }
        let path = grid.path(Cell::new(-1, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(path.first(), Some(&Cell::new(-1, 0)));
        assert_eq!(path.last(), Some(&Cell::new(1, 0)));
        assert!(path.iter().all(|c| !grid.is_blocked(*c)));
        // over the top of the wall: 3 up, 2 across, 3 down
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn test_unreachable_goal_has_no_path() {
        let mut grid = NavGrid::new(10, 10);
        for cell in Cell::new(3, 3).neighbours() {
            grid.block(cell);
        }
        assert!(grid.path(Cell::new(0, 0), Cell::new(3, 3)).is_none());
        assert!(grid.path(Cell::new(0, 0), Cell::new(4, 3)).is_none());
    }
}
