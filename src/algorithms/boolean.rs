//! Boolean operations on polygon regions.
//!
//! The pipeline is the classical one: split both boundaries at their
//! mutual intersection points, classify every resulting edge against the
//! other region, tag coincident boundary pieces with their traversal
//! direction, select edges per operation and stitch the survivors back
//! into closed faces.

use crate::algorithms::intersect;
use crate::algorithms::ray_casting::ray_shoot;
use crate::error::GeometryError;
use crate::polygon::{EdgeShape, Inclusion, Multiline, MultilineShape, Overlap, Polygon};
use crate::primitives::{Box2, Shape, Vector};
use crate::tolerance::{eq_0, get_tolerance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    Union,
    Intersect,
    Subtract,
}

/// Union of two polygon regions.
pub fn unify(p1: &Polygon, p2: &Polygon) -> Result<Polygon, GeometryError> {
    boolean_op(p1, p2, BoolOp::Union)
}

/// Intersection of two polygon regions.
pub fn intersect(p1: &Polygon, p2: &Polygon) -> Result<Polygon, GeometryError> {
    boolean_op(p1, p2, BoolOp::Intersect)
}

/// Difference `p1 - p2` of two polygon regions.
pub fn subtract(p1: &Polygon, p2: &Polygon) -> Result<Polygon, GeometryError> {
    boolean_op(p1, p2, BoolOp::Subtract)
}

fn boolean_op(p1: &Polygon, p2: &Polygon, op: BoolOp) -> Result<Polygon, GeometryError> {
    let mut res = p1.clone();
    // reversing the subtrahend turns subtraction into edge selection with
    // the same rules as union on the first operand
    let mut wrk = if op == BoolOp::Subtract {
        p2.reverse()
    } else {
        p2.clone()
    };

    let ips = intersect::polygon_to_polygon(&res, &wrk);
    split_at_points(&mut res, &ips);
    split_at_points(&mut wrk, &ips);
    classify(&mut res, &wrk);
    classify(&mut wrk, &res);
    mark_overlaps(&mut res, &mut wrk);

    let mut selected: Vec<EdgeShape> = Vec::new();
    for id in res.edge_ids() {
        let edge = res.edge(id);
        if keep_first(op, edge.inclusion, edge.overlap)? {
            selected.push(edge.shape);
        }
    }
    for id in wrk.edge_ids() {
        let edge = wrk.edge(id);
        if keep_second(op, edge.inclusion) {
            selected.push(edge.shape);
        }
    }
    selected.retain(|shape| !eq_0(shape.length()));

    restore_faces(selected)
}

fn keep_first(
    op: BoolOp,
    inclusion: Option<Inclusion>,
    overlap: Option<Overlap>,
) -> Result<bool, GeometryError> {
    match inclusion {
        Some(Inclusion::Outside) => Ok(matches!(op, BoolOp::Union | BoolOp::Subtract)),
        Some(Inclusion::Inside) => Ok(op == BoolOp::Intersect),
        Some(Inclusion::Boundary) => match overlap {
            Some(Overlap::Same) => Ok(true),
            Some(Overlap::Opposite) => Ok(false),
            None => Err(GeometryError::UnresolvedBoundaryConflict),
        },
        None => Err(GeometryError::UnresolvedBoundaryConflict),
    }
}

fn keep_second(op: BoolOp, inclusion: Option<Inclusion>) -> bool {
    match op {
        BoolOp::Union => inclusion == Some(Inclusion::Outside),
        BoolOp::Intersect | BoolOp::Subtract => inclusion == Some(Inclusion::Inside),
    }
}

/// Intersection points between two polygon boundaries, each list sorted
/// along its own boundary.
pub fn calculate_intersections(p1: &Polygon, p2: &Polygon) -> (Vec<Vector>, Vec<Vector>) {
    let ips = intersect::polygon_to_polygon(p1, p2);
    (
        sorted_along_boundary(p1, &ips),
        sorted_along_boundary(p2, &ips),
    )
}

/// Pieces of each boundary lying strictly inside the other region:
/// `(pieces of p1 inside p2, pieces of p2 inside p1)`.
pub fn inner_clip(p1: &Polygon, p2: &Polygon) -> (Vec<Shape>, Vec<Shape>) {
    clip(p1, p2, Inclusion::Inside)
}

/// Pieces of each boundary lying strictly outside the other region:
/// `(pieces of p1 outside p2, pieces of p2 outside p1)`.
pub fn outer_clip(p1: &Polygon, p2: &Polygon) -> (Vec<Shape>, Vec<Shape>) {
    clip(p1, p2, Inclusion::Outside)
}

fn clip(p1: &Polygon, p2: &Polygon, wanted: Inclusion) -> (Vec<Shape>, Vec<Shape>) {
    let mut res = p1.clone();
    let mut wrk = p2.clone();
    let ips = intersect::polygon_to_polygon(&res, &wrk);
    split_at_points(&mut res, &ips);
    split_at_points(&mut wrk, &ips);
    classify(&mut res, &wrk);
    classify(&mut wrk, &res);
    let collect = |poly: &Polygon| {
        poly.edge_ids()
            .into_iter()
            .map(|id| poly.edge(id))
            .filter(|edge| edge.inclusion == Some(wanted) && !eq_0(edge.length()))
            .map(|edge| edge.shape.as_shape())
            .collect()
    };
    (collect(&res), collect(&wrk))
}

/// Splits every edge containing one of the points at that point.
fn split_at_points(polygon: &mut Polygon, points: &[Vector]) {
    let tol = get_tolerance();
    for pt in points {
        let probe = Box2::new(pt.x - tol, pt.y - tol, pt.x + tol, pt.y + tol);
        for edge_id in polygon.search(&probe) {
            if polygon.edge(edge_id).shape.contains(pt) {
                polygon.add_vertex(*pt, edge_id);
            }
        }
    }
}

/// Classifies every edge of `target` against the region of `other`.
///
/// Both polygons are assumed to be split at all mutual intersection
/// points, so an edge can only touch the other boundary at its endpoints
/// and the endpoint verdicts decide; ambiguous combinations fall back to
/// the middle point.
fn classify(target: &mut Polygon, other: &Polygon) {
    for id in target.edge_ids() {
        let (start, end, middle) = {
            let edge = target.edge(id);
            (edge.start(), edge.end(), edge.shape.middle())
        };
        let start_inc = ray_shoot(other, start);
        let end_inc = ray_shoot(other, end);
        let inclusion = match (start_inc, end_inc) {
            (Inclusion::Outside, Inclusion::Outside) => Inclusion::Outside,
            (Inclusion::Inside, Inclusion::Inside) => Inclusion::Inside,
            (Inclusion::Boundary, Inclusion::Inside)
            | (Inclusion::Inside, Inclusion::Boundary) => Inclusion::Inside,
            (Inclusion::Boundary, Inclusion::Outside)
            | (Inclusion::Outside, Inclusion::Boundary) => Inclusion::Outside,
            _ => ray_shoot(other, middle),
        };
        let edge = target.edge_mut(id);
        edge.start_inclusion = Some(start_inc);
        edge.end_inclusion = Some(end_inc);
        edge.inclusion = Some(inclusion);
    }
}

/// Pairs up coincident boundary edges of the two polygons and tags both
/// with their relative traversal direction.
fn mark_overlaps(res: &mut Polygon, wrk: &mut Polygon) {
    let res_boundary: Vec<usize> = res
        .edge_ids()
        .into_iter()
        .filter(|&id| res.edge(id).inclusion == Some(Inclusion::Boundary))
        .collect();
    let wrk_boundary: Vec<usize> = wrk
        .edge_ids()
        .into_iter()
        .filter(|&id| wrk.edge(id).inclusion == Some(Inclusion::Boundary))
        .collect();

    for &rid in &res_boundary {
        for &wid in &wrk_boundary {
            let r_edge = res.edge(rid);
            let w_edge = wrk.edge(wid);
            let ends_match = (r_edge.start().equal_to(&w_edge.start())
                && r_edge.end().equal_to(&w_edge.end()))
                || (r_edge.start().equal_to(&w_edge.end())
                    && r_edge.end().equal_to(&w_edge.start()));
            if !ends_match || !r_edge.shape.middle().equal_to(&w_edge.shape.middle()) {
                continue;
            }
            let overlap = r_edge.overlap_with(w_edge);
            res.edge_mut(rid).overlap = Some(overlap);
            wrk.edge_mut(wid).overlap = Some(overlap);
            break;
        }
    }
}

/// Stitches selected edges into closed faces by matching endpoints.
fn restore_faces(shapes: Vec<EdgeShape>) -> Result<Polygon, GeometryError> {
    let n = shapes.len();
    let mut used = vec![false; n];
    let mut polygon = Polygon::new();

    for start in 0..n {
        if used[start] {
            continue;
        }
        let mut chain = vec![shapes[start]];
        used[start] = true;
        let origin = shapes[start].start();
        let mut cursor = shapes[start].end();

        while !cursor.equal_to(&origin) {
            let next = (0..n)
                .find(|&j| !used[j] && shapes[j].start().equal_to(&cursor))
                .ok_or(GeometryError::UnresolvedBoundaryConflict)?;
            used[next] = true;
            cursor = shapes[next].end();
            chain.push(shapes[next]);
            if chain.len() > n {
                return Err(GeometryError::InfiniteLoop);
            }
        }
        polygon.add_face_unchecked(chain);
    }
    Ok(polygon)
}

fn sorted_along_boundary(polygon: &Polygon, points: &[Vector]) -> Vec<Vector> {
    let tol = get_tolerance();
    let mut keyed: Vec<(usize, f64, Vector)> = points
        .iter()
        .map(|pt| {
            let probe = Box2::new(pt.x - tol, pt.y - tol, pt.x + tol, pt.y + tol);
            for edge_id in polygon.search(&probe) {
                let edge = polygon.edge(edge_id);
                if edge.shape.contains(pt) {
                    return (edge.face, edge.arc_length + length_along(&edge.shape, pt), *pt);
                }
            }
            (usize::MAX, 0.0, *pt)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    keyed.into_iter().map(|(_, _, pt)| pt).collect()
}

fn length_along(shape: &EdgeShape, pt: &Vector) -> f64 {
    match shape {
        EdgeShape::Segment(seg) => Vector::from_points(seg.start, *pt).len(),
        EdgeShape::Arc(arc) => {
            let angle = Vector::from_points(arc.center, *pt).slope();
            crate::primitives::Arc::new(
                arc.center,
                arc.radius,
                arc.start_angle,
                angle,
                arc.counter_clockwise,
            )
            .length()
        }
    }
}

/// Carves a polygon region into pieces along a multiline.
///
/// Every bounded piece of the multiline that runs through the interior
/// between two boundary points splits the region it crosses in two;
/// unbounded pieces and pieces outside the region are ignored.
pub fn cut_polygon(
    polygon: &Polygon,
    multiline: &Multiline,
) -> Result<Vec<Polygon>, GeometryError> {
    let mut pieces = vec![polygon.clone()];
    for edge in &multiline.edges {
        let chord = match edge.shape {
            MultilineShape::Segment(seg) => EdgeShape::Segment(seg),
            MultilineShape::Arc(arc) => EdgeShape::Arc(arc),
            // unbounded pieces cannot bound a finite region
            MultilineShape::Line(_) | MultilineShape::Ray(_) => continue,
        };
        let mut queue = std::mem::take(&mut pieces);
        while let Some(piece) = queue.pop() {
            match cut_piece(&piece, &chord)? {
                Some((a, b)) => {
                    queue.push(a);
                    queue.push(b);
                }
                None => pieces.push(piece),
            }
        }
    }
    Ok(pieces)
}

/// Cuts one region by one chord if the chord divides it; `None` when it
/// does not.
fn cut_piece(
    piece: &Polygon,
    chord: &EdgeShape,
) -> Result<Option<(Polygon, Polygon)>, GeometryError> {
    let ips = intersect::shape_to_polygon(&chord.as_shape(), piece);
    if ips.len() < 2 {
        return Ok(None);
    }
    let sorted = chord.sort_points(&ips);
    for pair in sorted.windows(2) {
        let (_, after) = chord.split(&pair[0]);
        let Some(after) = after else { continue };
        let (sub, _) = after.split(&pair[1]);
        let Some(sub) = sub else { continue };
        if eq_0(sub.length()) {
            continue;
        }
        if ray_shoot(piece, sub.middle()) == Inclusion::Inside {
            return split_face(piece, &sub).map(Some);
        }
    }
    Ok(None)
}

fn split_face(piece: &Polygon, chord: &EdgeShape) -> Result<(Polygon, Polygon), GeometryError> {
    let mut poly = piece.clone();
    let a = chord.start();
    let b = chord.end();
    let tol = get_tolerance();
    for pt in [a, b] {
        let probe = Box2::new(pt.x - tol, pt.y - tol, pt.x + tol, pt.y + tol);
        for edge_id in poly.search(&probe) {
            if poly.edge(edge_id).shape.contains(&pt) {
                poly.add_vertex(pt, edge_id);
            }
        }
    }

    let edge_at = |poly: &Polygon, pt: &Vector| {
        poly.edge_ids()
            .into_iter()
            .find(|&id| poly.edge(id).start().equal_to(pt))
            .ok_or(GeometryError::UnresolvedBoundaryConflict)
    };
    let edge_a = edge_at(&poly, &a)?;
    let edge_b = edge_at(&poly, &b)?;
    let face = poly.edge(edge_a).face;
    if poly.edge(edge_b).face != face {
        return Err(GeometryError::UnresolvedBoundaryConflict);
    }

    let walk = |from: usize, to: &Vector| -> Result<Vec<EdgeShape>, GeometryError> {
        let mut shapes = Vec::new();
        let mut cursor = from;
        loop {
            shapes.push(poly.edge(cursor).shape);
            if poly.edge(cursor).end().equal_to(to) {
                return Ok(shapes);
            }
            cursor = poly.edge(cursor).next;
            if shapes.len() > poly.edge_count() {
                return Err(GeometryError::InfiniteLoop);
            }
        }
    };

    let mut first_shapes = walk(edge_a, &b)?;
    first_shapes.push(chord.reverse());
    let mut second_shapes = walk(edge_b, &a)?;
    second_shapes.push(*chord);

    let mut first = Polygon::new();
    first.add_face_unchecked(first_shapes);
    let mut second = Polygon::new();
    second.add_face_unchecked(second_shapes);

    // holes of the original region follow the piece that contains them
    for face_id in poly.face_ids() {
        if face_id == face {
            continue;
        }
        let shapes = poly.face_shapes(face_id);
        let Some(probe) = shapes.first().map(|s| s.middle()) else {
            continue;
        };
        if ray_shoot(&first, probe) == Inclusion::Inside {
            first.add_face_unchecked(shapes);
        } else {
            second.add_face_unchecked(shapes);
        }
    }
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Circle, Segment};
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        Polygon::from_points(&[
            Vector::new(x, y),
            Vector::new(x + side, y),
            Vector::new(x + side, y + side),
            Vector::new(x, y + side),
        ])
        .unwrap()
    }

    #[test]
    fn test_unify_overlapping_squares() {
        let res = unify(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0)).unwrap();
        assert_eq!(res.face_ids().len(), 1);
        assert_relative_eq!(res.area(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersect_overlapping_squares() {
        let res = intersect(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0)).unwrap();
        assert_eq!(res.face_ids().len(), 1);
        assert_relative_eq!(res.area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_overlapping_squares() {
        let res = subtract(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0)).unwrap();
        assert_relative_eq!(res.area(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_disjoint() {
        let res = unify(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(res.face_ids().len(), 2);
        assert_relative_eq!(res.area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let res = intersect(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(res.edge_count(), 0);
    }

    #[test]
    fn test_intersect_touching_squares_is_empty() {
        let res = intersect(&square(0.0, 0.0, 2.0), &square(2.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(res.area(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_touching_squares() {
        let res = unify(&square(0.0, 0.0, 2.0), &square(2.0, 0.0, 2.0)).unwrap();
        assert_eq!(res.face_ids().len(), 1);
        assert_relative_eq!(res.area(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unify_contained() {
        let res = unify(&square(0.0, 0.0, 4.0), &square(1.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(res.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_hole() {
        let res = subtract(&square(0.0, 0.0, 4.0), &square(1.0, 1.0, 2.0)).unwrap();
        assert_eq!(res.face_ids().len(), 2);
        assert_relative_eq!(res.area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_covering_is_empty() {
        let res = subtract(&square(1.0, 1.0, 1.0), &square(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(res.edge_count(), 0);
    }

    #[test]
    fn test_subtract_equal_is_empty() {
        let sq = square(0.0, 0.0, 2.0);
        let res = subtract(&sq, &sq.clone()).unwrap();
        assert_eq!(res.edge_count(), 0);
    }

    #[test]
    fn test_unify_equal_is_same() {
        let sq = square(0.0, 0.0, 2.0);
        let res = unify(&sq, &sq.clone()).unwrap();
        assert_relative_eq!(res.area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inner_outer_clip() {
        let p1 = square(0.0, 0.0, 2.0);
        let p2 = square(1.0, 0.0, 2.0);
        let (inner1, inner2) = inner_clip(&p1, &p2);
        assert!(!inner1.is_empty());
        assert!(!inner2.is_empty());
        let inner_len: f64 = inner1
            .iter()
            .map(|s| match s {
                Shape::Segment(seg) => seg.length(),
                _ => 0.0,
            })
            .sum();
        // top and bottom pieces of p1 between x=1 and x=2
        assert_relative_eq!(inner_len, 2.0, epsilon = 1e-9);

        let (outer1, _) = outer_clip(&p1, &p2);
        let outer_len: f64 = outer1
            .iter()
            .map(|s| match s {
                Shape::Segment(seg) => seg.length(),
                _ => 0.0,
            })
            .sum();
        // left edge plus top/bottom pieces between x=0 and x=1
        assert_relative_eq!(outer_len, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_calculate_intersections_sorted() {
        let p1 = square(0.0, 0.0, 2.0);
        let p2 = square(1.0, -1.0, 1.0);
        let (on_p1, on_p2) = calculate_intersections(&p1, &p2);
        assert_eq!(on_p1.len(), 2);
        assert_eq!(on_p2.len(), 2);
        // sorted along p1's bottom edge from (0,0) towards (2,0)
        assert!(on_p1[0].x < on_p1[1].x);
    }

    #[test]
    fn test_intersect_circle_square() {
        let circle = Polygon::from_circle(&Circle::new(Vector::zero(), 1.0));
        let quadrant = square(0.0, 0.0, 2.0);
        let res = intersect(&circle, &quadrant).unwrap();
        assert_relative_eq!(res.area(), std::f64::consts::PI / 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cut_polygon() {
        let sq = square(0.0, 0.0, 4.0);
        let chord = Segment::from_coords(2.0, -1.0, 2.0, 5.0);
        let multiline =
            Multiline::from_shapes(&[Shape::Segment(chord)]).unwrap();
        let pieces = cut_polygon(&sq, &multiline).unwrap();
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_relative_eq!(piece.area(), 8.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cut_polygon_missing_chord() {
        let sq = square(0.0, 0.0, 4.0);
        let chord = Segment::from_coords(10.0, 0.0, 10.0, 4.0);
        let multiline =
            Multiline::from_shapes(&[Shape::Segment(chord)]).unwrap();
        let pieces = cut_polygon(&sq, &multiline).unwrap();
        assert_eq!(pieces.len(), 1);
    }
}
