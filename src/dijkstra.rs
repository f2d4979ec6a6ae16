use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use num_traits::{Float, One, Zero};

use crate::error::PathError;
use crate::frontier::Frontier;
use crate::path::Path;
use crate::CostProvider;

/// Computes the least-cost route from `provider.start()` to `provider.end()`.
/// Returns the route including both endpoints, with every consecutive pair of
/// points 8-adjacent, or [PathError::Unreachable] if no route exists.
///
/// Each step is weighted by the Euclidean distance travelled plus the terrain
/// cost of the cell being entered. The relaxation runs until the frontier is
/// empty, computing the full shortest-path tree rooted at the start point;
/// ties between equal tentative distances resolve in lexicographic `(x, y)`
/// order, so repeated runs on the same provider yield identical routes.
pub fn find_path<G: CostProvider>(provider: &G) -> Result<Path, PathError> {
    let width = provider.width();
    let height = provider.height();
    if width == 0 || height == 0 {
        return Err(PathError::InvalidGrid);
    }
    let start = provider.start();
    let end = provider.end();
    if !in_bounds(start, width, height) || !in_bounds(end, width, height) {
        return Err(PathError::InvalidGrid);
    }
    let cells = width
        .checked_mul(height)
        .ok_or(PathError::AllocationFailure)?;
    let ix = |p: Point| p.x as usize + p.y as usize * width;

    let mut dist: Vec<G::Cost> = Vec::new();
    dist.try_reserve_exact(cells)
        .map_err(|_| PathError::AllocationFailure)?;
    dist.resize(cells, G::Cost::infinity());
    let mut pred: Vec<Option<Point>> = Vec::new();
    pred.try_reserve_exact(cells)
        .map_err(|_| PathError::AllocationFailure)?;
    pred.resize(cells, None);

    dist[ix(start)] = G::Cost::zero();
    let mut frontier: Frontier<G::Cost> = Frontier::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(x as i32, y as i32);
            frontier.insert_or_update(p, dist[ix(p)])?;
        }
    }

    info!("relaxing {}x{} grid from {} towards {}", width, height, start, end);
    while !frontier.is_empty() {
        let (p, _) = frontier.extract_min().ok_or(PathError::EmptyFrontier)?;
        for n in neighborhood(provider, p) {
            let alt = dist[ix(p)] + step_weight::<G::Cost>(p, n) + provider.cost(n);
            if alt < dist[ix(n)] {
                dist[ix(n)] = alt;
                pred[ix(n)] = Some(p);
                frontier.insert_or_update(n, alt)?;
            }
        }
    }

    if !dist[ix(end)].is_finite() {
        info!("{} was never reached from {}", end, start);
        return Err(PathError::Unreachable);
    }

    let mut route = Path::start_with(end);
    let mut current = end;
    while current != start {
        match pred[ix(current)] {
            Some(previous) => {
                route.append(previous);
                current = previous;
            }
            None => return Err(PathError::Unreachable),
        }
    }
    route.reverse();
    Ok(route)
}

/// Total cost of following `path` on `provider`: per step the Euclidean step
/// length plus the terrain cost of the entered cell. For a route returned by
/// [find_path] this equals the end point's finalized distance.
pub fn path_cost<G: CostProvider>(provider: &G, path: &Path) -> G::Cost {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| step_weight::<G::Cost>(*a, *b) + provider.cost(*b))
        .fold(G::Cost::zero(), |total, step| total + step)
}

/// Valid 8-neighborhood of `point`, clipped at the grid boundary through the
/// provider's validity predicate.
fn neighborhood<G: CostProvider>(provider: &G, point: Point) -> Vec<Point> {
    point
        .moore_neighborhood()
        .into_iter()
        .filter(|p| provider.is_valid(*p))
        .collect::<Vec<Point>>()
}

/// Euclidean length of one step between 8-adjacent points.
fn step_weight<C: Float>(from: Point, to: Point) -> C {
    debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
    if from.x != to.x && from.y != to.y {
        (C::one() + C::one()).sqrt()
    } else {
        C::one()
    }
}

fn in_bounds(point: Point, width: usize, height: usize) -> bool {
    point.x >= 0 && point.y >= 0 && (point.x as usize) < width && (point.y as usize) < height
}
