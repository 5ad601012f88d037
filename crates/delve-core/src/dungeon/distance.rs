//! Walking-distance map from a single source cell

use std::collections::VecDeque;

use crate::grid::{Area, Block, Pos};

/// Breadth-first step counts over floor blocks.
///
/// Doors are treated as open. Cells that cannot be reached, walls included,
/// have no distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    dist: Vec<Option<u32>>,
}

impl DistanceField {
    pub fn compute(area: &Area, source: Pos) -> Self {
        let (width, height) = (area.width(), area.height());
        let mut field = Self {
            width,
            height,
            dist: vec![None; width * height],
        };
        if !area.block(source).is_some_and(Block::is_traversable) {
            return field;
        }

        field.set(source, 0);
        let mut open = VecDeque::from([(source, 0u32)]);
        while let Some((pos, d)) = open.pop_front() {
            for next in pos.neighbors() {
                if field.get(next).is_some() || !area.block(next).is_some_and(Block::is_traversable) {
                    continue;
                }
                field.set(next, d + 1);
                open.push_back((next, d + 1));
            }
        }
        field
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    fn set(&mut self, pos: Pos, d: u32) {
        if let Some(i) = self.index(pos) {
            self.dist[i] = Some(d);
        }
    }

    /// Steps from the source, if reachable
    pub fn get(&self, pos: Pos) -> Option<u32> {
        self.index(pos).and_then(|i| self.dist[i])
    }

    /// Largest finite distance; 0 for an unreachable source
    pub fn max(&self) -> u32 {
        self.dist.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Reachable cells with their distance, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        let width = self.width;
        self.dist.iter().enumerate().filter_map(move |(i, d)| {
            d.map(|d| (Pos::new((i % width) as i32, (i / width) as i32), d))
        })
    }

    /// Cells whose distance satisfies `pred`, row by row
    pub fn cells_where(&self, pred: impl Fn(u32) -> bool) -> Vec<Pos> {
        self.iter().filter(|&(_, d)| pred(d)).map(|(p, _)| p).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line() {
        let area = Area::from_ascii(&["#####", "#...#", "#####"]);
        let field = DistanceField::compute(&area, Pos::new(1, 1));
        assert_eq!(field.get(Pos::new(1, 1)), Some(0));
        assert_eq!(field.get(Pos::new(3, 1)), Some(2));
        assert_eq!(field.get(Pos::new(0, 0)), None);
        assert_eq!(field.max(), 2);
    }

    #[test]
    fn test_walls_force_detour() {
        let area = Area::from_ascii(&[
            ".....", //
            ".###.",
            ".#.#.",
        ]);
        let field = DistanceField::compute(&area, Pos::new(0, 2));
        assert_eq!(field.get(Pos::new(4, 2)), Some(8));
        // Enclosed on three sides and the grid edge below
        assert_eq!(field.get(Pos::new(2, 2)), None);
    }

    #[test]
    fn test_doors_count_as_open() {
        let area = Area::from_ascii(&["..+.."]);
        let field = DistanceField::compute(&area, Pos::new(0, 0));
        assert_eq!(field.get(Pos::new(4, 0)), Some(4));
    }

    #[test]
    fn test_wall_source_reaches_nothing() {
        let area = Area::from_ascii(&["#..", "..."]);
        let field = DistanceField::compute(&area, Pos::new(0, 0));
        assert_eq!(field.iter().count(), 0);
        assert_eq!(field.max(), 0);
    }

    #[test]
    fn test_cells_where_filters_by_distance() {
        let area = Area::from_ascii(&["...."]);
        let field = DistanceField::compute(&area, Pos::new(0, 0));
        assert_eq!(field.cells_where(|d| d > 1), vec![Pos::new(2, 0), Pos::new(3, 0)]);
    }
}
