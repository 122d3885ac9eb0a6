//! Delaunay triangulation and piecewise-linear interpolation over scattered points.
//!
//! Points are inserted in x order, each one fanned to the hull edges it can
//! see, so the triangles always cover the convex hull. Lawson edge flips then
//! make the triangulation Delaunay. Points are normalized to the unit box with
//! a single scale factor for both axes, which keeps the triangulation Delaunay
//! in the original coordinates.

use std::collections::{HashMap, HashSet};

/// Relative tolerance of the orientation test.
const ORIENT_EPS: f64 = 1.0e-12;
/// Relative tolerance of the in-circle test.
const CIRCLE_EPS: f64 = 1.0e-10;
/// Barycentric tolerance for points on triangle edges.
const EDGE_EPS: f64 = 1.0e-10;

/// Delaunay triangulation of a 2-D point set.
#[derive(Clone, Debug)]
pub(crate) struct Triangulation {
    /// Normalized input points (duplicates removed)
    points: Vec<[f64; 2]>,
    /// Index into the caller's point list for each stored point
    source: Vec<usize>,
    triangles: Vec<[usize; 3]>,
    origin: [f64; 2],
    scale: f64,
}

impl Triangulation {
    /// Triangulate `points`.
    ///
    /// Exact duplicates keep their first occurrence. Returns `None` if fewer
    /// than three distinct points remain or all points are collinear.
    pub(crate) fn new(points: &[[f64; 2]]) -> Option<Self> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        let mut source = Vec::new();
        for (i, p) in points.iter().enumerate() {
            if !p[0].is_finite() || !p[1].is_finite() {
                continue;
            }
            if seen.insert((p[0].to_bits(), p[1].to_bits())) {
                unique.push(*p);
                source.push(i);
            }
        }
        if unique.len() < 3 {
            return None;
        }

        let (origin, scale) = bounding_transform(&unique);
        let normalized: Vec<[f64; 2]> = unique
            .iter()
            .map(|p| [(p[0] - origin[0]) / scale, (p[1] - origin[1]) / scale])
            .collect();

        if all_collinear(&normalized) {
            return None;
        }

        let mut triangles = sweep(&normalized)?;
        legalize(&normalized, &mut triangles);
        for v in &mut triangles {
            v.sort_unstable();
        }
        triangles.sort_unstable();

        Some(Self {
            points: normalized,
            source,
            triangles,
            origin,
            scale,
        })
    }

    /// Number of triangles.
    pub(crate) fn n_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Barycentric weights of `p` in triangle `t`, if `p` lies inside it.
    fn weights(&self, t: &[usize; 3], p: [f64; 2]) -> Option<[f64; 3]> {
        let [a, b, c] = [self.points[t[0]], self.points[t[1]], self.points[t[2]]];
        let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
        let l0 = ((b[1] - c[1]) * (p[0] - c[0]) + (c[0] - b[0]) * (p[1] - c[1])) / det;
        let l1 = ((c[1] - a[1]) * (p[0] - c[0]) + (a[0] - c[0]) * (p[1] - c[1])) / det;
        let l2 = 1.0 - l0 - l1;
        (l0 >= -EDGE_EPS && l1 >= -EDGE_EPS && l2 >= -EDGE_EPS).then_some([l0, l1, l2])
    }

    fn blend(&self, t: &[usize; 3], w: [f64; 3], values: &[f64]) -> f64 {
        w[0] * values[self.source[t[0]]]
            + w[1] * values[self.source[t[1]]]
            + w[2] * values[self.source[t[2]]]
    }

    /// Linear interpolation of `values` (one per input point) at `(x, y)`.
    ///
    /// Returns `None` outside the convex hull.
    #[cfg(test)]
    fn interpolate(&self, values: &[f64], x: f64, y: f64) -> Option<f64> {
        let p = [(x - self.origin[0]) / self.scale, (y - self.origin[1]) / self.scale];
        self.triangles
            .iter()
            .find_map(|t| self.weights(t, p).map(|w| self.blend(t, w, values)))
    }

    /// Linear interpolation on the regular grid `xs` x `ys`.
    ///
    /// Both axes must be sorted ascending. The result is indexed `[ix][iy]`.
    pub(crate) fn interpolate_grid(
        &self,
        values: &[f64],
        xs: &[f64],
        ys: &[f64],
    ) -> Vec<Vec<Option<f64>>> {
        let nx: Vec<f64> = xs.iter().map(|&x| (x - self.origin[0]) / self.scale).collect();
        let ny: Vec<f64> = ys.iter().map(|&y| (y - self.origin[1]) / self.scale).collect();
        let mut out = vec![vec![None; ys.len()]; xs.len()];

        for t in &self.triangles {
            let corners = [self.points[t[0]], self.points[t[1]], self.points[t[2]]];
            let (x0, x1) = span(corners.iter().map(|p| p[0]));
            let (y0, y1) = span(corners.iter().map(|p| p[1]));

            let i0 = nx.partition_point(|&x| x < x0 - EDGE_EPS);
            let i1 = nx.partition_point(|&x| x <= x1 + EDGE_EPS);
            let j0 = ny.partition_point(|&y| y < y0 - EDGE_EPS);
            let j1 = ny.partition_point(|&y| y <= y1 + EDGE_EPS);

            for i in i0..i1 {
                for j in j0..j1 {
                    if out[i][j].is_some() {
                        continue;
                    }
                    if let Some(w) = self.weights(t, [nx[i], ny[j]]) {
                        out[i][j] = Some(self.blend(t, w, values));
                    }
                }
            }
        }
        out
    }
}

fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn bounding_transform(points: &[[f64; 2]]) -> ([f64; 2], f64) {
    let (x0, x1) = span(points.iter().map(|p| p[0]));
    let (y0, y1) = span(points.iter().map(|p| p[1]));
    let extent = (x1 - x0).max(y1 - y0);
    let scale = if extent > 0.0 { extent } else { 1.0 };
    ([x0, y0], scale)
}

fn all_collinear(points: &[[f64; 2]]) -> bool {
    let a = points[0];
    // Farthest point from `a` gives the best-conditioned direction
    let b = points
        .iter()
        .copied()
        .max_by(|p, q| dist2(a, *p).total_cmp(&dist2(a, *q)))
        .unwrap_or(a);
    let len = dist2(a, b).sqrt();
    if len == 0.0 {
        return true;
    }
    points.iter().all(|p| cross(a, b, *p).abs() / len < EDGE_EPS)
}

fn dist2(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Twice the signed area of `abc`, or 0 when it is lost in rounding.
fn orientation(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    let left = (b[0] - a[0]) * (c[1] - a[1]);
    let right = (b[1] - a[1]) * (c[0] - a[0]);
    let det = left - right;
    if det.abs() <= ORIENT_EPS * (left.abs() + right.abs()) {
        0.0
    } else {
        det
    }
}

/// Whether `d` lies strictly inside the circumcircle of the counter-clockwise
/// triangle `abc`.
fn in_circle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> bool {
    let (adx, ady) = (a[0] - d[0], a[1] - d[1]);
    let (bdx, bdy) = (b[0] - d[0], b[1] - d[1]);
    let (cdx, cdy) = (c[0] - d[0], c[1] - d[1]);
    let al = adx * adx + ady * ady;
    let bl = bdx * bdx + bdy * bdy;
    let cl = cdx * cdx + cdy * cdy;

    let det = al * (bdx * cdy - cdx * bdy)
        + bl * (cdx * ady - adx * cdy)
        + cl * (adx * bdy - bdx * ady);
    let magnitude = al * ((bdx * cdy).abs() + (cdx * bdy).abs())
        + bl * ((cdx * ady).abs() + (adx * cdy).abs())
        + cl * ((adx * bdy).abs() + (bdx * ady).abs());
    det > CIRCLE_EPS * magnitude
}

/// Sweep in (x, y) order. Every point lies outside the hull of the points
/// before it, so it is joined to each hull edge facing it.
///
/// Triangles are counter-clockwise. Returns `None` for collinear input.
fn sweep(points: &[[f64; 2]]) -> Option<Vec<[usize; 3]>> {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        points[i][0]
            .total_cmp(&points[j][0])
            .then(points[i][1].total_cmp(&points[j][1]))
    });

    // Leading collinear run, closed off by the first point beside it
    let (first, second) = (order[0], order[1]);
    let k = (2..n).find(|&m| orientation(points[first], points[second], points[order[m]]) != 0.0)?;
    let apex = order[k];
    let chain = &order[..k];

    let mut triangles = Vec::with_capacity(2 * n);
    let mut hull: Vec<usize>;
    if cross(points[first], points[chain[k - 1]], points[apex]) > 0.0 {
        triangles.extend(chain.windows(2).map(|w| [w[0], w[1], apex]));
        hull = chain.to_vec();
    } else {
        triangles.extend(chain.windows(2).map(|w| [w[1], w[0], apex]));
        hull = chain.iter().rev().copied().collect();
    }
    hull.push(apex);

    for &pi in &order[k + 1..] {
        let p = points[pi];
        let h = hull.len();
        let visible: Vec<bool> = (0..h)
            .map(|i| orientation(points[hull[i]], points[hull[(i + 1) % h]], p) < 0.0)
            .collect();
        let Some(start) = (0..h).find(|&i| visible[i] && !visible[(i + h - 1) % h]) else {
            continue;
        };
        let run = (0..h).take_while(|&s| visible[(start + s) % h]).count();

        for s in 0..run {
            let i = (start + s) % h;
            triangles.push([hull[(i + 1) % h], hull[i], pi]);
        }

        // Vertices strictly inside the visible chain leave the hull
        let mut next = Vec::with_capacity(h - run + 2);
        for s in 0..=(h - run) {
            next.push(hull[(start + run + s) % h]);
        }
        next.push(pi);
        hull = next;
    }

    Some(triangles)
}

fn directed_edges(t: &[usize; 3]) -> [(usize, usize); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

/// Lawson flips until every interior edge is locally Delaunay.
fn legalize(points: &[[f64; 2]], triangles: &mut [[usize; 3]]) {
    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(3 * triangles.len());
    for (t, tri) in triangles.iter().enumerate() {
        for e in directed_edges(tri) {
            owner.insert(e, t);
        }
    }

    let mut stack: Vec<(usize, usize)> = owner.keys().copied().filter(|&(a, b)| a < b).collect();
    stack.sort_unstable();
    let mut budget = triangles.len() * triangles.len() + 1024;

    while let Some((a, b)) = stack.pop() {
        let (Some(&t1), Some(&t2)) = (owner.get(&(a, b)), owner.get(&(b, a))) else {
            continue;
        };
        let opposite = |t: &[usize; 3]| t.iter().copied().find(|&v| v != a && v != b);
        let (Some(c), Some(d)) = (opposite(&triangles[t1]), opposite(&triangles[t2])) else {
            continue;
        };

        // (a, b, c) and (b, a, d) are counter-clockwise
        let [pa, pb, pc, pd] = [points[a], points[b], points[c], points[d]];
        if !in_circle(pa, pb, pc, pd) || cross(pa, pd, pc) <= 0.0 || cross(pd, pb, pc) <= 0.0 {
            continue;
        }

        for t in [t1, t2] {
            for e in directed_edges(&triangles[t]) {
                owner.remove(&e);
            }
        }
        triangles[t1] = [a, d, c];
        triangles[t2] = [d, b, c];
        for t in [t1, t2] {
            for e in directed_edges(&triangles[t]) {
                owner.insert(e, t);
            }
        }
        stack.extend([(a, d), (d, b), (b, c), (c, a)]);

        budget -= 1;
        if budget == 0 {
            break;
        }
    }
}
