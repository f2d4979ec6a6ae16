use core::fmt;

use fxhash::FxBuildHasher;
use grid_util::grid::{BoolGrid, Grid, SimpleGrid};
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::CostProvider;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Terrain cost of a cell whose symbol has no configured weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// [TerrainGrid] is an in-memory [CostProvider]: a grid of terrain symbols in
/// a [SimpleGrid], a per-symbol weight table, impassable cells in a
/// [BoolGrid] and the two route endpoints. It also maintains connected
/// components over the passable cells using a [UnionFind] structure so
/// reachability can be answered without running the solver.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub symbols: SimpleGrid<u8>,
    pub blocked: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    weights: FxIndexMap<u8, f64>,
    start: Point,
    end: Point,
}

impl TerrainGrid {
    /// Creates a `width` x `height` grid filled with `symbol`, fully
    /// passable, with start and end at the origin.
    pub fn new(width: usize, height: usize, symbol: u8) -> TerrainGrid {
        let mut grid = TerrainGrid {
            symbols: SimpleGrid::new(width, height, symbol),
            blocked: BoolGrid::new(width, height, false),
            components: UnionFind::new(width * height),
            components_dirty: false,
            weights: FxIndexMap::default(),
            start: Point::new(0, 0),
            end: Point::new(0, 0),
        };
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.symbols.width
    }

    pub fn height(&self) -> usize {
        self.symbols.height
    }

    pub fn symbol(&self, x: usize, y: usize) -> u8 {
        self.symbols.get(x, y)
    }

    pub fn set_symbol(&mut self, x: usize, y: usize, symbol: u8) {
        self.symbols.set(x, y, symbol);
    }

    /// Sets the terrain weight of `symbol`. Weights must be positive.
    pub fn set_weight(&mut self, symbol: u8, weight: f64) {
        self.weights.insert(symbol, weight);
    }

    /// Configured weight of `symbol`, or [DEFAULT_WEIGHT] if it has none.
    pub fn weight(&self, symbol: u8) -> f64 {
        self.weights.get(&symbol).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn set_start(&mut self, point: Point) {
        self.start = point;
    }

    pub fn set_end(&mut self, point: Point) {
        self.end = point;
    }

    /// Marks a cell (im)passable. Newly blocked cells may split a component,
    /// which flags the components as dirty; unblocking joins the cell to its
    /// passable neighbours immediately.
    pub fn set_blocked(&mut self, x: usize, y: usize, blocked: bool) {
        if blocked {
            if !self.blocked.get(x, y) {
                self.components_dirty = true;
            }
        } else {
            let p = Point::new(x as i32, y as i32);
            let p_ix = self.blocked.get_ix(x, y);
            for n in self.passable_neighbors(p) {
                self.components
                    .union(p_ix, self.blocked.get_ix(n.x as usize, n.y as usize));
            }
        }
        self.blocked.set(x, y, blocked);
    }

    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.blocked.get(x, y)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.blocked.width
            && (y as usize) < self.blocked.height
    }

    fn passable(&self, point: Point) -> bool {
        self.in_bounds(point.x, point.y) && !self.blocked.get(point.x as usize, point.y as usize)
    }

    fn passable_neighbors(&self, point: Point) -> Vec<Point> {
        point
            .moore_neighborhood()
            .into_iter()
            .filter(|p| self.passable(*p))
            .collect::<Vec<Point>>()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components
            .find(self.blocked.get_ix(point.x as usize, point.y as usize))
    }

    /// Checks if `start` and `goal` are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if `start` and `goal` are on different components.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.blocked.get_ix(start.x as usize, start.y as usize);
            let goal_ix = self.blocked.get_ix(goal.x as usize, goal.y as usize);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("components are dirty: regenerating");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid
    /// neighbours to the same components. Every cell is unioned with its
    /// forward 8-neighbourhood (E, SW, S, SE) so the components agree with
    /// the solver's diagonal moves.
    pub fn generate_components(&mut self) {
        let w = self.blocked.width;
        let h = self.blocked.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h {
            for x in 0..w {
                if self.blocked.get(x, y) {
                    continue;
                }
                let point = Point::new(x as i32, y as i32);
                let parent_ix = self.blocked.get_ix(x, y);
                let neighbours = [
                    Point::new(point.x + 1, point.y),
                    Point::new(point.x - 1, point.y + 1),
                    Point::new(point.x, point.y + 1),
                    Point::new(point.x + 1, point.y + 1),
                ]
                .into_iter()
                .filter(|p| self.passable(*p))
                .map(|p| self.blocked.get_ix(p.x as usize, p.y as usize))
                .collect::<Vec<usize>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl CostProvider for TerrainGrid {
    type Cost = f64;

    fn width(&self) -> usize {
        TerrainGrid::width(self)
    }

    fn height(&self) -> usize {
        TerrainGrid::height(self)
    }

    fn is_valid(&self, point: Point) -> bool {
        self.passable(point)
    }

    fn cost(&self, point: Point) -> f64 {
        self.weight(self.symbols.get_point(point))
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Terrain {}x{}:", self.symbols.width, self.symbols.height)?;
        for y in 0..self.symbols.height {
            for x in 0..self.symbols.width {
                if self.blocked.get(x, y) {
                    write!(f, "#")?;
                } else {
                    write!(f, "{}", self.symbols.get(x, y) as char)?;
                }
            }
            writeln!(f)?;
        }
        if !self.weights.is_empty() {
            writeln!(
                f,
                "Weights: {}",
                self.weights
                    .iter()
                    .map(|(symbol, weight)| format!("'{}'={}", *symbol as char, weight))
                    .format(", ")
            )?;
        }
        Ok(())
    }
}
