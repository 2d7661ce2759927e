//! Minimal distance between shapes.
//!
//! Every routine returns the distance together with the witness segment
//! that realizes it, oriented from the first shape to the second. Shapes
//! that intersect are at distance zero and the witness degenerates to a
//! point.

use crate::algorithms::intersect;
use crate::polygon::Polygon;
use crate::primitives::{Arc, Box2, Circle, Line, Ray, Segment, Shape, Vector};
use crate::spatial::PlanarSet;
use crate::tolerance::{eq_0, ge};

/// Distance between two shapes of any kind.
pub fn distance(a: &Shape, b: &Shape) -> (f64, Segment) {
    match (a, b) {
        (Shape::Polygon(p1), Shape::Polygon(p2)) => polygon_to_polygon(p1, p2),
        (other, Shape::Polygon(poly)) => shape_to_polygon(other, poly),
        (Shape::Polygon(poly), other) => rev(shape_to_polygon(other, poly)),
        (other, Shape::Box(bbox)) => shape_to_box(other, bbox),
        (Shape::Box(bbox), other) => rev(shape_to_box(other, bbox)),
        (other, Shape::Ray(ray)) => shape_to_ray(other, ray),
        (Shape::Ray(ray), other) => rev(shape_to_ray(other, ray)),
        (Shape::Point(p1), Shape::Point(p2)) => point_to_point(p1, p2),
        (Shape::Point(pt), Shape::Line(line)) => point_to_line(pt, line),
        (Shape::Line(line), Shape::Point(pt)) => rev(point_to_line(pt, line)),
        (Shape::Point(pt), Shape::Segment(seg)) => point_to_segment(pt, seg),
        (Shape::Segment(seg), Shape::Point(pt)) => rev(point_to_segment(pt, seg)),
        (Shape::Point(pt), Shape::Arc(arc)) => point_to_arc(pt, arc),
        (Shape::Arc(arc), Shape::Point(pt)) => rev(point_to_arc(pt, arc)),
        (Shape::Point(pt), Shape::Circle(circle)) => point_to_circle(pt, circle),
        (Shape::Circle(circle), Shape::Point(pt)) => rev(point_to_circle(pt, circle)),
        (Shape::Line(l1), Shape::Line(l2)) => line_to_line(l1, l2),
        (Shape::Line(line), Shape::Segment(seg)) => rev(segment_to_line(seg, line)),
        (Shape::Segment(seg), Shape::Line(line)) => segment_to_line(seg, line),
        (Shape::Line(line), Shape::Arc(arc)) => line_to_arc(line, arc),
        (Shape::Arc(arc), Shape::Line(line)) => rev(line_to_arc(line, arc)),
        (Shape::Line(line), Shape::Circle(circle)) => line_to_circle(line, circle),
        (Shape::Circle(circle), Shape::Line(line)) => rev(line_to_circle(line, circle)),
        (Shape::Segment(s1), Shape::Segment(s2)) => segment_to_segment(s1, s2),
        (Shape::Segment(seg), Shape::Arc(arc)) => segment_to_arc(seg, arc),
        (Shape::Arc(arc), Shape::Segment(seg)) => rev(segment_to_arc(seg, arc)),
        (Shape::Segment(seg), Shape::Circle(circle)) => segment_to_circle(seg, circle),
        (Shape::Circle(circle), Shape::Segment(seg)) => rev(segment_to_circle(seg, circle)),
        (Shape::Arc(a1), Shape::Arc(a2)) => arc_to_arc(a1, a2),
        (Shape::Arc(arc), Shape::Circle(circle)) => arc_to_circle(arc, circle),
        (Shape::Circle(circle), Shape::Arc(arc)) => rev(arc_to_circle(arc, circle)),
        (Shape::Circle(c1), Shape::Circle(c2)) => circle_to_circle(c1, c2),
    }
}

#[inline]
fn rev((dist, witness): (f64, Segment)) -> (f64, Segment) {
    (dist, witness.reverse())
}

#[inline]
fn min_of(a: (f64, Segment), b: (f64, Segment)) -> (f64, Segment) {
    if b.0 < a.0 {
        b
    } else {
        a
    }
}

#[inline]
fn touching(pt: Vector) -> (f64, Segment) {
    (0.0, Segment::new(pt, pt))
}

/// Distance between two points.
pub fn point_to_point(p1: &Vector, p2: &Vector) -> (f64, Segment) {
    p1.distance_to_point(p2)
}

/// Distance from a point to a line, realized by the perpendicular foot.
pub fn point_to_line(pt: &Vector, line: &Line) -> (f64, Segment) {
    let prj = pt.projection_on_line(line);
    (
        Vector::from_points(*pt, prj).len(),
        Segment::new(*pt, prj),
    )
}

/// Distance from a point to the circle boundary.
pub fn point_to_circle(pt: &Vector, circle: &Circle) -> (f64, Segment) {
    let vec = Vector::from_points(circle.center, *pt);
    if eq_0(vec.len()) {
        // the center is equidistant from the whole boundary
        let boundary = circle.center.translate(Vector::new(circle.radius, 0.0));
        return (circle.radius, Segment::new(*pt, boundary));
    }
    let dist = (vec.len() - circle.radius).abs();
    let boundary = circle.center.translate(vec.normalize() * circle.radius);
    (dist, Segment::new(*pt, boundary))
}

/// Distance from a point to a segment.
///
/// The witness ends at the perpendicular foot when it falls inside the
/// segment, at the nearest endpoint otherwise.
pub fn point_to_segment(pt: &Vector, seg: &Segment) -> (f64, Segment) {
    if seg.start.equal_to(&seg.end) {
        return point_to_point(pt, &seg.start);
    }
    let v_seg = Vector::from_points(seg.start, seg.end);
    let v_start = Vector::from_points(seg.start, *pt);
    let v_end = Vector::from_points(seg.end, *pt);

    let start_sp = v_seg.dot(&v_start);
    let end_sp = -v_seg.dot(&v_end);

    if ge(start_sp, 0.0) && ge(end_sp, 0.0) {
        let unit = seg.tangent_in_start();
        let dist = unit.cross(&v_start).abs();
        let foot = seg.start.translate(unit * unit.dot(&v_start));
        return (dist, Segment::new(*pt, foot));
    }
    if start_sp < 0.0 {
        point_to_point(pt, &seg.start)
    } else {
        point_to_point(pt, &seg.end)
    }
}

/// Distance from a point to an arc.
pub fn point_to_arc(pt: &Vector, arc: &Arc) -> (f64, Segment) {
    let mut best = point_to_point(pt, &arc.start());
    best = min_of(best, point_to_point(pt, &arc.end()));
    let (dist, witness) = point_to_circle(pt, &arc.circle());
    if arc.contains(&witness.end) {
        best = min_of(best, (dist, witness));
    }
    best
}

/// Distance between two lines: zero unless parallel.
pub fn line_to_line(l1: &Line, l2: &Line) -> (f64, Segment) {
    if l1.parallel_to(l2) {
        return point_to_line(&l1.pt, l2);
    }
    let ip = intersect::line_to_line(l1, l2);
    touching(ip[0])
}

/// Distance from a segment to a line.
pub fn segment_to_line(seg: &Segment, line: &Line) -> (f64, Segment) {
    let ip = intersect::segment_to_line(seg, line);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    min_of(
        point_to_line(&seg.start, line),
        point_to_line(&seg.end, line),
    )
}

/// Distance between two segments.
pub fn segment_to_segment(s1: &Segment, s2: &Segment) -> (f64, Segment) {
    let ip = intersect::segment_to_segment(s1, s2);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = point_to_segment(&s1.start, s2);
    best = min_of(best, point_to_segment(&s1.end, s2));
    best = min_of(best, rev(point_to_segment(&s2.start, s1)));
    best = min_of(best, rev(point_to_segment(&s2.end, s1)));
    best
}

/// Distance from a segment to the circle boundary.
pub fn segment_to_circle(seg: &Segment, circle: &Circle) -> (f64, Segment) {
    let ip = intersect::segment_to_circle(seg, circle);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = point_to_circle(&seg.start, circle);
    best = min_of(best, point_to_circle(&seg.end, circle));
    // perpendicular foot candidate
    let (_, w) = point_to_segment(&circle.center, seg);
    let foot = w.end;
    let dir = Vector::from_points(circle.center, foot).normalize();
    if !eq_0(dir.len()) {
        let boundary = circle.center.translate(dir * circle.radius);
        best = min_of(
            best,
            (
                Vector::from_points(foot, boundary).len(),
                Segment::new(foot, boundary),
            ),
        );
    }
    best
}

/// Distance from a segment to an arc.
pub fn segment_to_arc(seg: &Segment, arc: &Arc) -> (f64, Segment) {
    let ip = intersect::segment_to_arc(seg, arc);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = point_to_arc(&seg.start, arc);
    best = min_of(best, point_to_arc(&seg.end, arc));
    best = min_of(best, rev(point_to_segment(&arc.start(), seg)));
    best = min_of(best, rev(point_to_segment(&arc.end(), seg)));
    // perpendicular foot candidate through the arc interior
    let (_, w) = point_to_segment(&arc.center, seg);
    let foot = w.end;
    let dir = Vector::from_points(arc.center, foot).normalize();
    if !eq_0(dir.len()) {
        let boundary = arc.center.translate(dir * arc.radius);
        if arc.contains(&boundary) {
            best = min_of(
                best,
                (
                    Vector::from_points(foot, boundary).len(),
                    Segment::new(foot, boundary),
                ),
            );
        }
    }
    best
}

/// Distance from a line to the circle boundary.
pub fn line_to_circle(line: &Line, circle: &Circle) -> (f64, Segment) {
    let ip = intersect::line_to_circle(line, circle);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let prj = circle.center.projection_on_line(line);
    let dir = Vector::from_points(circle.center, prj).normalize();
    let boundary = circle.center.translate(dir * circle.radius);
    (
        Vector::from_points(prj, boundary).len(),
        Segment::new(prj, boundary),
    )
}

/// Distance from a line to an arc.
pub fn line_to_arc(line: &Line, arc: &Arc) -> (f64, Segment) {
    let ip = intersect::line_to_arc(line, arc);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = rev(point_to_line(&arc.start(), line));
    best = min_of(best, rev(point_to_line(&arc.end(), line)));
    let prj = arc.center.projection_on_line(line);
    let dir = Vector::from_points(arc.center, prj).normalize();
    if !eq_0(dir.len()) {
        let boundary = arc.center.translate(dir * arc.radius);
        if arc.contains(&boundary) {
            best = min_of(
                best,
                (
                    Vector::from_points(prj, boundary).len(),
                    Segment::new(prj, boundary),
                ),
            );
        }
    }
    best
}

/// Distance between two circle boundaries.
pub fn circle_to_circle(c1: &Circle, c2: &Circle) -> (f64, Segment) {
    let ip = intersect::circle_to_circle(c1, c2);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let vec = Vector::from_points(c1.center, c2.center);
    let between = vec.len();
    if eq_0(between) {
        // concentric circles
        let dir = Vector::new(1.0, 0.0);
        return (
            (c1.radius - c2.radius).abs(),
            Segment::new(
                c1.center.translate(dir * c1.radius),
                c2.center.translate(dir * c2.radius),
            ),
        );
    }
    let dir = vec.normalize();
    if between > c1.radius + c2.radius {
        // separate circles face each other along the center line
        return (
            between - c1.radius - c2.radius,
            Segment::new(
                c1.center.translate(dir * c1.radius),
                c2.center.translate(dir * (-c2.radius)),
            ),
        );
    }
    if c1.radius > c2.radius {
        // second circle nested inside the first
        (
            c1.radius - between - c2.radius,
            Segment::new(
                c1.center.translate(dir * c1.radius),
                c2.center.translate(dir * c2.radius),
            ),
        )
    } else {
        (
            c2.radius - between - c1.radius,
            Segment::new(
                c1.center.translate(dir * (-c1.radius)),
                c2.center.translate(dir * (-c2.radius)),
            ),
        )
    }
}

/// Distance from an arc to the circle boundary.
pub fn arc_to_circle(arc: &Arc, circle: &Circle) -> (f64, Segment) {
    let ip = intersect::arc_to_circle(arc, circle);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = point_to_circle(&arc.start(), circle);
    best = min_of(best, point_to_circle(&arc.end(), circle));
    let dir = Vector::from_points(arc.center, circle.center).normalize();
    if !eq_0(dir.len()) {
        for facing in [arc.center.translate(dir * arc.radius), arc.center.translate(dir * (-arc.radius))] {
            if arc.contains(&facing) {
                best = min_of(best, point_to_circle(&facing, circle));
            }
        }
    }
    best
}

/// Distance between two arcs.
pub fn arc_to_arc(a1: &Arc, a2: &Arc) -> (f64, Segment) {
    let ip = intersect::arc_to_arc(a1, a2);
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let mut best = point_to_arc(&a1.start(), a2);
    best = min_of(best, point_to_arc(&a1.end(), a2));
    best = min_of(best, rev(point_to_arc(&a2.start(), a1)));
    best = min_of(best, rev(point_to_arc(&a2.end(), a1)));
    let dir = Vector::from_points(a1.center, a2.center).normalize();
    if !eq_0(dir.len()) {
        for facing in [a1.center.translate(dir * a1.radius), a1.center.translate(dir * (-a1.radius))] {
            if a1.contains(&facing) {
                best = min_of(best, point_to_arc(&facing, a2));
            }
        }
    }
    best
}

/// Distance from a shape to a ray.
///
/// Uses the supporting line when the perpendicular foot falls on the ray,
/// the ray start point otherwise.
pub fn shape_to_ray(shape: &Shape, ray: &Ray) -> (f64, Segment) {
    let ip = intersect::intersect(shape, &Shape::Ray(*ray));
    if let Some(&pt) = ip.first() {
        return touching(pt);
    }
    let start = distance(shape, &Shape::Point(ray.pt));
    let on_line = distance(shape, &Shape::Line(ray.line()));
    if ray.contains(&on_line.1.end) {
        min_of(start, on_line)
    } else {
        start
    }
}

/// Distance from a shape to a box boundary.
pub fn shape_to_box(shape: &Shape, bbox: &Box2) -> (f64, Segment) {
    let mut best = (f64::INFINITY, Segment::new(Vector::zero(), Vector::zero()));
    for side in bbox.to_segments() {
        best = min_of(best, distance(shape, &Shape::Segment(side)));
    }
    best
}

/// Distance from a shape to a polygon boundary, scanning every edge.
pub fn shape_to_polygon(shape: &Shape, polygon: &Polygon) -> (f64, Segment) {
    let mut best = (f64::INFINITY, Segment::new(Vector::zero(), Vector::zero()));
    for edge_id in polygon.edge_ids() {
        let edge_shape = polygon.edge(edge_id).shape.as_shape();
        best = min_of(best, distance(shape, &edge_shape));
    }
    best
}

/// Distance between the boundaries of two polygons.
pub fn polygon_to_polygon(p1: &Polygon, p2: &Polygon) -> (f64, Segment) {
    let mut best = (f64::INFINITY, Segment::new(Vector::zero(), Vector::zero()));
    for edge_id in p1.edge_ids() {
        let edge_shape = p1.edge(edge_id).shape.as_shape();
        best = min_of(best, shape_to_polygon(&edge_shape, p2));
    }
    best
}

/// Squared distance bounds between two boxes: `(min², max²)`.
///
/// The minimum is zero when the boxes intersect; the bounds bracket the
/// distance between any shapes the boxes contain, which is what the
/// planar-set descent prunes with.
pub fn box_to_box_minmax(b1: &Box2, b2: &Box2) -> (f64, f64) {
    let dx_min = (b1.xmin - b2.xmax).max(b2.xmin - b1.xmax).max(0.0);
    let dy_min = (b1.ymin - b2.ymax).max(b2.ymin - b1.ymax).max(0.0);
    let dx_max = (b1.xmax - b2.xmin).abs().max((b2.xmax - b1.xmin).abs());
    let dy_max = (b1.ymax - b2.ymin).abs().max((b2.ymax - b1.ymin).abs());
    (
        dx_min * dx_min + dy_min * dy_min,
        dx_max * dx_max + dy_max * dy_max,
    )
}

/// Distance from a shape to the nearest member of a planar set.
///
/// Descends the set's interval tree best-first with the box separation
/// lower bound, so subtrees that cannot hold a closer member are never
/// visited. Returns `None` for an empty set.
pub fn shape_to_planar_set(shape: &Shape, set: &PlanarSet) -> Option<(f64, Segment)> {
    let shape_box = shape.bounding_box();
    let mut best: Option<(f64, Segment)> = None;
    set.descend_nearest(
        |member_box| box_to_box_minmax(&shape_box, member_box).0.sqrt(),
        |member| {
            let candidate = distance(shape, member);
            if best.map_or(true, |(best_dist, _)| candidate.0 < best_dist) {
                best = Some(candidate);
            }
            candidate.0
        },
    );
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_point_to_segment_foot_inside() {
        let seg = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let (dist, witness) = point_to_segment(&Vector::new(3.0, 4.0), &seg);
        assert_relative_eq!(dist, 4.0, epsilon = 1e-12);
        assert!(witness.end.equal_to(&Vector::new(3.0, 0.0)));
    }

    #[test]
    fn test_point_to_segment_past_endpoint() {
        let seg = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let (dist, witness) = point_to_segment(&Vector::new(13.0, 4.0), &seg);
        assert_relative_eq!(dist, 5.0, epsilon = 1e-12);
        assert!(witness.end.equal_to(&Vector::new(10.0, 0.0)));
    }

    #[test]
    fn test_point_to_circle() {
        let circle = Circle::new(Vector::zero(), 5.0);
        let (dist, witness) = point_to_circle(&Vector::new(8.0, 0.0), &circle);
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);
        assert!(witness.end.equal_to(&Vector::new(5.0, 0.0)));

        // inside the circle the distance goes to the boundary
        let (dist, _) = point_to_circle(&Vector::new(3.0, 0.0), &circle);
        assert_relative_eq!(dist, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_to_segment_parallel() {
        let s1 = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let s2 = Segment::from_coords(0.0, 3.0, 10.0, 3.0);
        let (dist, _) = segment_to_segment(&s1, &s2);
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_to_segment_intersecting_is_zero() {
        let s1 = Segment::from_coords(0.0, 0.0, 2.0, 2.0);
        let s2 = Segment::from_coords(0.0, 2.0, 2.0, 0.0);
        let (dist, witness) = segment_to_segment(&s1, &s2);
        assert_eq!(dist, 0.0);
        assert!(witness.is_zero_length());
    }

    #[test]
    fn test_circle_to_circle_separate() {
        let c1 = Circle::new(Vector::zero(), 1.0);
        let c2 = Circle::new(Vector::new(10.0, 0.0), 2.0);
        let (dist, witness) = circle_to_circle(&c1, &c2);
        assert_relative_eq!(dist, 7.0, epsilon = 1e-12);
        assert!(witness.start.equal_to(&Vector::new(1.0, 0.0)));
        assert!(witness.end.equal_to(&Vector::new(8.0, 0.0)));
    }

    #[test]
    fn test_circle_to_circle_nested() {
        let outer = Circle::new(Vector::zero(), 10.0);
        let inner = Circle::new(Vector::new(2.0, 0.0), 3.0);
        let (dist, _) = circle_to_circle(&outer, &inner);
        assert_relative_eq!(dist, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_to_arc() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, true);
        let seg = Segment::from_coords(-5.0, 3.0, 5.0, 3.0);
        let (dist, witness) = segment_to_arc(&seg, &arc);
        assert_relative_eq!(dist, 2.0, epsilon = 1e-9);
        assert!(witness.end.equal_to(&Vector::new(0.0, 1.0)));
    }

    #[test]
    fn test_perpendicular_lines_touch() {
        let horizontal = Line::new(Vector::new(0.0, 3.0), Vector::new(1.0, 3.0)).unwrap();
        let vertical = Line::new(Vector::new(2.0, 0.0), Vector::new(2.0, 1.0)).unwrap();
        let (dist, witness) = line_to_line(&horizontal, &vertical);
        assert_relative_eq!(dist, 0.0, epsilon = 1e-12);
        assert!(witness.start.equal_to(&Vector::new(2.0, 3.0)));
        assert!(witness.is_zero_length());
    }

    #[test]
    fn test_parallel_lines() {
        let l1 = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let l2 = Line::new(Vector::new(0.0, 4.0), Vector::new(1.0, 4.0)).unwrap();
        let (dist, _) = line_to_line(&l1, &l2);
        assert_relative_eq!(dist, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_to_circle() {
        let line = Line::new(Vector::new(0.0, 5.0), Vector::new(1.0, 5.0)).unwrap();
        let circle = Circle::new(Vector::zero(), 2.0);
        let (dist, witness) = line_to_circle(&line, &circle);
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);
        assert!(witness.start.equal_to(&Vector::new(0.0, 5.0)));
        assert!(witness.end.equal_to(&Vector::new(0.0, 2.0)));
    }

    #[test]
    fn test_witness_orientation_swaps() {
        let pt = Shape::Point(Vector::new(0.0, 5.0));
        let seg = Shape::Segment(Segment::from_coords(-1.0, 0.0, 1.0, 0.0));
        let (d1, w1) = distance(&pt, &seg);
        let (d2, w2) = distance(&seg, &pt);
        assert_relative_eq!(d1, d2, epsilon = 1e-12);
        assert!(w1.start.equal_to(&w2.end));
        assert!(w1.end.equal_to(&w2.start));
    }

    #[test]
    fn test_shape_to_ray() {
        let ray = Ray::shooting_right(Vector::zero());
        let above = Shape::Point(Vector::new(5.0, 2.0));
        let (dist, _) = distance(&above, &Shape::Ray(ray));
        assert_relative_eq!(dist, 2.0, epsilon = 1e-12);

        // behind the start the nearest ray point is the start itself
        let behind = Shape::Point(Vector::new(-3.0, 4.0));
        let (dist, _) = distance(&behind, &Shape::Ray(ray));
        assert_relative_eq!(dist, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_to_box_minmax() {
        let b1 = Box2::new(0.0, 0.0, 1.0, 1.0);
        let b2 = Box2::new(4.0, 5.0, 6.0, 7.0);
        let (min_sq, max_sq) = box_to_box_minmax(&b1, &b2);
        assert_relative_eq!(min_sq.sqrt(), 5.0, epsilon = 1e-12);
        // farthest corner pair is (0, 0) to (6, 7)
        assert_relative_eq!(max_sq, 85.0, epsilon = 1e-12);
        assert_eq!(box_to_box_minmax(&b1, &b1).0, 0.0);
    }

    #[test]
    fn test_shape_to_planar_set() {
        let mut set = PlanarSet::new();
        set.add(Shape::Circle(Circle::new(Vector::new(10.0, 0.0), 1.0)));
        set.add(Shape::Segment(Segment::from_coords(0.0, 3.0, 5.0, 3.0)));

        let query = Shape::Point(Vector::zero());
        let (dist, _) = shape_to_planar_set(&query, &set).unwrap();
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);

        let empty = PlanarSet::new();
        assert!(shape_to_planar_set(&query, &empty).is_none());
    }
}
