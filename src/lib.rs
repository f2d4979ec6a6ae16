//! # terrain_pathfinding
//!
//! Grid-based pathfinding over weighted terrain. Implements
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! on an 8-connected grid where every step pays the Euclidean distance
//! travelled (1 for cardinal moves, sqrt(2) for diagonal moves) plus the
//! terrain cost of the cell being entered. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! on [TerrainGrid] so reachability can be queried without flood-filling.
//!
//! ```
//! use grid_util::point::Point;
//! use terrain_pathfinding::{find_path, TerrainGrid};
//!
//! let mut grid = TerrainGrid::new(3, 3, b'.');
//! grid.set_weight(b'~', 8.0);
//! grid.set_symbol(1, 1, b'~');
//! grid.set_start(Point::new(0, 0));
//! grid.set_end(Point::new(2, 2));
//!
//! let path = find_path(&grid).unwrap();
//! assert_eq!(path.first(), Some(&Point::new(0, 0)));
//! assert_eq!(path.last(), Some(&Point::new(2, 2)));
//! // The expensive swamp cell in the middle is routed around.
//! assert!(path.iter().all(|p| *p != Point::new(1, 1)));
//! ```

pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod path;
pub mod terrain;

use grid_util::point::Point;
use num_traits::Float;

pub use crate::dijkstra::{find_path, path_cost};
pub use crate::error::PathError;
pub use crate::frontier::Frontier;
pub use crate::path::Path;
pub use crate::terrain::TerrainGrid;

/// Read-only view of a grid as seen by the solver: dimensions, a validity
/// predicate, per-cell terrain costs and the two endpoints of the route.
/// The solver never mutates the provider.
pub trait CostProvider {
    /// Scalar used for terrain costs and accumulated distances.
    type Cost: Float;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Whether `point` may be occupied. Must return [false] for points
    /// outside the grid bounds.
    fn is_valid(&self, point: Point) -> bool;

    /// Terrain cost of entering `point`; positive, 1 for unweighted cells.
    fn cost(&self, point: Point) -> Self::Cost;

    fn start(&self) -> Point;
    fn end(&self) -> Point;
}
