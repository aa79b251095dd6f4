//! Contour operations on rectilinear outlines
//!
//! Glyphs imported from bitmaps are unions of axis-aligned rectangles. The
//! functions here merge such rectangles into non-overlapping contours and
//! clean those contours up before they are compiled.
//!
//! All coordinates are in font space (y grows upwards). Filled regions are
//! always on the right of a contour's direction of travel, so outer contours
//! are clockwise and holes counter-clockwise, as TrueType expects.

use std::collections::HashMap;

use kurbo::{BezPath, Point, Rect};
use write_fonts::OtRound;

/// A closed polygon, without a repeated start point.
pub type Contour = Vec<Point>;

const EPSILON: f64 = 1e-9;

/// The four corners of `rect`, clockwise from the bottom left.
pub fn rect_contour(rect: Rect) -> Contour {
    let rect = rect.abs();
    vec![
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x1, rect.y0),
    ]
}

/// Compute the contours enclosing the union of `rects`.
///
/// Rectangles that only touch at a corner stay separate contours.
pub fn union_rects(rects: &[Rect]) -> Vec<Contour> {
    let contours = rects
        .iter()
        .map(|r| r.abs())
        .filter(|r| r.width() > EPSILON && r.height() > EPSILON)
        .map(rect_contour)
        .collect::<Vec<_>>();
    remove_overlaps(&contours)
}

/// Replace rectilinear contours by the boundary of the area they fill.
///
/// A point is filled if its winding number is non-zero. Every edge of the
/// input must be horizontal or vertical. The result has no collinear points.
pub fn remove_overlaps(contours: &[Contour]) -> Vec<Contour> {
    let points = || contours.iter().flatten();
    let xs = sorted_stops(points().map(|pt| pt.x));
    let ys = sorted_stops(points().map(|pt| pt.y));
    if xs.len() < 2 || ys.len() < 2 {
        return Vec::new();
    }
    let grid = CellGrid::new(&xs, &ys, contours);

    grid.trace()
        .into_iter()
        .map(|vertices| {
            let contour = vertices
                .into_iter()
                .map(|(i, j)| Point::new(xs[i], ys[j]))
                .collect::<Vec<_>>();
            simplify_contour(&contour)
        })
        .collect()
}

/// The winding number of `contours` around `pt`.
///
/// Clockwise contours count negative. `pt` must not lie on an edge.
fn winding_number(contours: &[Contour], pt: Point) -> i32 {
    let mut winding = 0;
    for contour in contours {
        let len = contour.len();
        for i in 0..len {
            let (a, b) = (contour[i], contour[(i + 1) % len]);
            if a.y <= pt.y && b.y > pt.y && (b - a).cross(pt - a) > 0.0 {
                winding += 1;
            } else if a.y > pt.y && b.y <= pt.y && (b - a).cross(pt - a) < 0.0 {
                winding -= 1;
            }
        }
    }
    winding
}

/// Remove repeated points and points lying on the line between their
/// neighbours.
pub fn simplify_contour(contour: &[Point]) -> Contour {
    let mut points = contour.to_vec();
    loop {
        let len = points.len();
        if len < 3 {
            break;
        }
        let redundant = (0..len).find(|&i| {
            let prev = points[(i + len - 1) % len];
            let cur = points[i];
            let next = points[(i + 1) % len];
            cur.distance(prev) < EPSILON || (cur - prev).cross(next - cur).abs() < EPSILON
        });
        match redundant {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }
    if points.len() < 3 {
        points.clear();
    }
    points
}

/// Round every coordinate to the nearest integer, OpenType style.
pub fn round_contour(contour: &[Point]) -> Contour {
    contour
        .iter()
        .map(|pt| {
            Point::new(
                OtRound::<f64>::ot_round(pt.x),
                OtRound::<f64>::ot_round(pt.y),
            )
        })
        .collect()
}

/// The smallest rectangle containing every point, if there are any.
pub fn bounds<'a>(contours: impl IntoIterator<Item = &'a Contour>) -> Option<Rect> {
    contours
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<Rect>, pt| match acc {
            Some(rect) => Some(rect.union_pt(*pt)),
            None => Some(Rect::from_points(*pt, *pt)),
        })
}

/// Build a path of closed, straight-sided subpaths.
pub fn to_bezpath<'a>(contours: impl IntoIterator<Item = &'a Contour>) -> BezPath {
    let mut path = BezPath::new();
    for contour in contours {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        path.move_to(*first);
        for pt in rest {
            path.line_to(*pt);
        }
        path.close_path();
    }
    path
}

fn sorted_stops(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values = values.collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    values
}

type Vertex = (usize, usize);

#[derive(Clone, Copy, Debug)]
struct Edge {
    from: Vertex,
    to: Vertex,
}

impl Edge {
    fn direction(&self) -> (isize, isize) {
        (
            self.to.0 as isize - self.from.0 as isize,
            self.to.1 as isize - self.from.1 as isize,
        )
    }
}

/// Occupancy of the cells formed by every distinct rectangle edge.
struct CellGrid {
    columns: usize,
    rows: usize,
    filled: Vec<bool>,
}

impl CellGrid {
    fn new(xs: &[f64], ys: &[f64], contours: &[Contour]) -> Self {
        let columns = xs.len().saturating_sub(1);
        let rows = ys.len().saturating_sub(1);
        let mut filled = vec![false; columns * rows];
        for row in 0..rows {
            let cy = (ys[row] + ys[row + 1]) / 2.0;
            for column in 0..columns {
                let cx = (xs[column] + xs[column + 1]) / 2.0;
                filled[row * columns + column] = winding_number(contours, Point::new(cx, cy)) != 0;
            }
        }
        CellGrid {
            columns,
            rows,
            filled,
        }
    }

    fn is_filled(&self, column: isize, row: isize) -> bool {
        if column < 0 || row < 0 || column as usize >= self.columns || row as usize >= self.rows {
            return false;
        }
        self.filled[row as usize * self.columns + column as usize]
    }

    /// Boundary edges between filled and empty cells, filled side on the right.
    fn boundary_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let (c, r) = (column as isize, row as isize);
                if !self.is_filled(c, r) {
                    continue;
                }
                let (i, j) = (column, row);
                if !self.is_filled(c - 1, r) {
                    edges.push(Edge {
                        from: (i, j),
                        to: (i, j + 1),
                    });
                }
                if !self.is_filled(c, r + 1) {
                    edges.push(Edge {
                        from: (i, j + 1),
                        to: (i + 1, j + 1),
                    });
                }
                if !self.is_filled(c + 1, r) {
                    edges.push(Edge {
                        from: (i + 1, j + 1),
                        to: (i + 1, j),
                    });
                }
                if !self.is_filled(c, r - 1) {
                    edges.push(Edge {
                        from: (i + 1, j),
                        to: (i, j),
                    });
                }
            }
        }
        edges
    }

    /// Chain the boundary edges into closed loops of grid vertices.
    fn trace(&self) -> Vec<Vec<Vertex>> {
        let edges = self.boundary_edges();
        let mut outgoing: HashMap<Vertex, Vec<usize>> = HashMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.from).or_default().push(idx);
        }
        let mut used = vec![false; edges.len()];
        let mut loops = Vec::new();

        for start in 0..edges.len() {
            if used[start] {
                continue;
            }
            let mut vertices = Vec::new();
            let mut current = start;
            loop {
                used[current] = true;
                let edge = edges[current];
                vertices.push(edge.from);
                // a loop may pass a saddle vertex twice, so only stop once
                // the start edge itself is the continuation
                let candidates = outgoing.get(&edge.to).map(Vec::as_slice).unwrap_or_default();
                match next_edge(&edges, candidates, |idx| !used[idx] || idx == start, edge) {
                    Some(next) if next != start => current = next,
                    _ => break,
                }
            }
            loops.push(vertices);
        }
        loops
    }
}

/// Pick the edge continuing `edge`, preferring the sharpest right turn.
///
/// Only saddle vertices, where two filled cells meet diagonally, have more
/// than one candidate; turning right there keeps the two cells apart.
fn next_edge(
    edges: &[Edge],
    candidates: &[usize],
    available: impl Fn(usize) -> bool,
    edge: Edge,
) -> Option<usize> {
    let (dx, dy) = edge.direction();
    let turn_rank = |idx: usize| {
        let turn = edges[idx].direction();
        if turn == (dy, -dx) {
            0
        } else if turn == (dx, dy) {
            1
        } else {
            2
        }
    };
    candidates
        .iter()
        .copied()
        .filter(|idx| available(*idx))
        .min_by_key(|idx| turn_rank(*idx))
}
