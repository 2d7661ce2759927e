//! Pairwise intersection of shapes.
//!
//! Every routine returns the finite set of intersection points between two
//! shape boundaries. Coincident lines intersect in infinitely many points
//! and return an empty set; coincident equal circles return one canonical
//! representative; overlapping segments and arcs return the endpoints of
//! the overlap.

use crate::polygon::Polygon;
use crate::primitives::{Arc, Box2, Circle, Line, Ray, Segment, Shape, Vector};
use crate::tolerance::{eq, eq_0, lt};

/// Intersects two shapes of any kind.
pub fn intersect(a: &Shape, b: &Shape) -> Vec<Vector> {
    match (a, b) {
        (Shape::Point(pt), other) | (other, Shape::Point(pt)) => {
            if other.contains_point(pt) {
                vec![*pt]
            } else {
                Vec::new()
            }
        }
        (Shape::Polygon(p1), Shape::Polygon(p2)) => polygon_to_polygon(p1, p2),
        (Shape::Polygon(poly), other) | (other, Shape::Polygon(poly)) => {
            shape_to_polygon(other, poly)
        }
        (Shape::Line(l1), Shape::Line(l2)) => line_to_line(l1, l2),
        (Shape::Line(l), Shape::Ray(r)) | (Shape::Ray(r), Shape::Line(l)) => ray_to_line(r, l),
        (Shape::Line(l), Shape::Segment(s)) | (Shape::Segment(s), Shape::Line(l)) => {
            segment_to_line(s, l)
        }
        (Shape::Line(l), Shape::Arc(arc)) | (Shape::Arc(arc), Shape::Line(l)) => line_to_arc(l, arc),
        (Shape::Line(l), Shape::Circle(c)) | (Shape::Circle(c), Shape::Line(l)) => {
            line_to_circle(l, c)
        }
        (Shape::Line(l), Shape::Box(bx)) | (Shape::Box(bx), Shape::Line(l)) => line_to_box(l, bx),
        (Shape::Ray(r1), Shape::Ray(r2)) => ray_to_ray(r1, r2),
        (Shape::Ray(r), Shape::Segment(s)) | (Shape::Segment(s), Shape::Ray(r)) => {
            ray_to_segment(r, s)
        }
        (Shape::Ray(r), Shape::Arc(arc)) | (Shape::Arc(arc), Shape::Ray(r)) => ray_to_arc(r, arc),
        (Shape::Ray(r), Shape::Circle(c)) | (Shape::Circle(c), Shape::Ray(r)) => ray_to_circle(r, c),
        (Shape::Ray(r), Shape::Box(bx)) | (Shape::Box(bx), Shape::Ray(r)) => ray_to_box(r, bx),
        (Shape::Segment(s1), Shape::Segment(s2)) => segment_to_segment(s1, s2),
        (Shape::Segment(s), Shape::Arc(arc)) | (Shape::Arc(arc), Shape::Segment(s)) => {
            segment_to_arc(s, arc)
        }
        (Shape::Segment(s), Shape::Circle(c)) | (Shape::Circle(c), Shape::Segment(s)) => {
            segment_to_circle(s, c)
        }
        (Shape::Segment(s), Shape::Box(bx)) | (Shape::Box(bx), Shape::Segment(s)) => {
            segment_to_box(s, bx)
        }
        (Shape::Arc(a1), Shape::Arc(a2)) => arc_to_arc(a1, a2),
        (Shape::Arc(arc), Shape::Circle(c)) | (Shape::Circle(c), Shape::Arc(arc)) => {
            arc_to_circle(arc, c)
        }
        (Shape::Arc(arc), Shape::Box(bx)) | (Shape::Box(bx), Shape::Arc(arc)) => arc_to_box(arc, bx),
        (Shape::Circle(c1), Shape::Circle(c2)) => circle_to_circle(c1, c2),
        (Shape::Circle(c), Shape::Box(bx)) | (Shape::Box(bx), Shape::Circle(c)) => {
            circle_to_box(c, bx)
        }
        (Shape::Box(b1), Shape::Box(b2)) => box_to_box(b1, b2),
    }
}

fn push_unique(ip: &mut Vec<Vector>, pt: Vector) {
    if !ip.iter().any(|p| p.equal_to(&pt)) {
        ip.push(pt);
    }
}

/// Intersects two infinite lines. Parallel and coincident lines yield no
/// points.
pub fn line_to_line(l1: &Line, l2: &Line) -> Vec<Vector> {
    let [a1, b1, c1] = l1.standard();
    let [a2, b2, c2] = l2.standard();
    let det = a1 * b2 - b1 * a2;
    if eq_0(det) {
        return Vec::new();
    }
    let x = (c1 * b2 - b1 * c2) / det;
    let y = (a1 * c2 - c1 * a2) / det;
    vec![Vector::new(x, y)]
}

/// Intersects a line with a circle: zero, one (tangent) or two points.
pub fn line_to_circle(line: &Line, circle: &Circle) -> Vec<Vector> {
    let prj = circle.center.projection_on_line(line);
    let dist = Vector::from_points(circle.center, prj).len();
    if eq(dist, circle.radius) {
        return vec![prj];
    }
    if lt(dist, circle.radius) {
        let delta = (circle.radius * circle.radius - dist * dist).sqrt();
        let dir = Vector::new(line.norm.y, -line.norm.x);
        return vec![prj.translate(dir * delta), prj.translate(dir * (-delta))];
    }
    Vec::new()
}

/// Intersects a line with a box boundary.
pub fn line_to_box(line: &Line, bbox: &Box2) -> Vec<Vector> {
    let mut ip = Vec::new();
    for seg in bbox.to_segments() {
        for pt in segment_to_line(&seg, line) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}

/// Intersects a line with an arc.
pub fn line_to_arc(line: &Line, arc: &Arc) -> Vec<Vector> {
    line_to_circle(line, &arc.circle())
        .into_iter()
        .filter(|pt| arc.contains(pt))
        .collect()
}

/// Intersects a segment with an infinite line.
///
/// A segment lying on the line contributes both endpoints.
pub fn segment_to_line(seg: &Segment, line: &Line) -> Vec<Vector> {
    let mut ip = Vec::new();
    if line.contains(&seg.start) {
        ip.push(seg.start);
    }
    if line.contains(&seg.end) && !seg.is_zero_length() {
        push_unique(&mut ip, seg.end);
    }
    if !ip.is_empty() || seg.is_zero_length() {
        return ip;
    }
    // both endpoints strictly off the line here
    if seg.start.left_to(line) == seg.end.left_to(line) {
        return ip;
    }
    let Ok(support) = Line::new(seg.start, seg.end) else {
        return ip;
    };
    line_to_line(&support, line)
}

/// Intersects two segments. Collinear overlapping segments yield the
/// endpoints of the overlap.
pub fn segment_to_segment(seg1: &Segment, seg2: &Segment) -> Vec<Vector> {
    let mut ip = Vec::new();
    if seg1.bounding_box().not_intersects(&seg2.bounding_box()) {
        return ip;
    }
    if seg1.is_zero_length() {
        if seg2.is_zero_length() {
            if seg1.start.equal_to(&seg2.start) {
                ip.push(seg1.start);
            }
        } else if seg2.contains(&seg1.start) {
            ip.push(seg1.start);
        }
        return ip;
    }
    if seg2.is_zero_length() {
        if seg1.contains(&seg2.start) {
            ip.push(seg2.start);
        }
        return ip;
    }
    let (Ok(l1), Ok(l2)) = (
        Line::new(seg1.start, seg1.end),
        Line::new(seg2.start, seg2.end),
    ) else {
        return ip;
    };
    if l1.incident_to(&l2) {
        for pt in [seg1.start, seg1.end] {
            if seg2.contains(&pt) {
                push_unique(&mut ip, pt);
            }
        }
        for pt in [seg2.start, seg2.end] {
            if seg1.contains(&pt) {
                push_unique(&mut ip, pt);
            }
        }
        return ip;
    }
    for pt in line_to_line(&l1, &l2) {
        if seg1.contains(&pt) && seg2.contains(&pt) {
            ip.push(pt);
        }
    }
    ip
}

/// Intersects a segment with a circle.
pub fn segment_to_circle(seg: &Segment, circle: &Circle) -> Vec<Vector> {
    if seg.bounding_box().not_intersects(&circle.bounding_box()) {
        return Vec::new();
    }
    if seg.is_zero_length() {
        let dist = Vector::from_points(circle.center, seg.start).len();
        return if eq(dist, circle.radius) {
            vec![seg.start]
        } else {
            Vec::new()
        };
    }
    let Ok(support) = Line::new(seg.start, seg.end) else {
        return Vec::new();
    };
    line_to_circle(&support, circle)
        .into_iter()
        .filter(|pt| seg.contains(pt))
        .collect()
}

/// Intersects a segment with an arc.
pub fn segment_to_arc(seg: &Segment, arc: &Arc) -> Vec<Vector> {
    if seg.bounding_box().not_intersects(&arc.bounding_box()) {
        return Vec::new();
    }
    if seg.is_zero_length() {
        return if arc.contains(&seg.start) {
            vec![seg.start]
        } else {
            Vec::new()
        };
    }
    let Ok(support) = Line::new(seg.start, seg.end) else {
        return Vec::new();
    };
    line_to_circle(&support, &arc.circle())
        .into_iter()
        .filter(|pt| seg.contains(pt) && arc.contains(pt))
        .collect()
}

/// Intersects a segment with a box boundary.
pub fn segment_to_box(seg: &Segment, bbox: &Box2) -> Vec<Vector> {
    let mut ip = Vec::new();
    for side in bbox.to_segments() {
        for pt in segment_to_segment(seg, &side) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}

/// Intersects two circles: zero, one (tangent) or two points. Coincident
/// equal circles yield their leftmost point as a canonical representative.
pub fn circle_to_circle(c1: &Circle, c2: &Circle) -> Vec<Vector> {
    if c1.bounding_box().not_intersects(&c2.bounding_box()) {
        return Vec::new();
    }
    if eq_0(c1.radius) || eq_0(c2.radius) {
        return Vec::new();
    }
    let vec = Vector::from_points(c1.center, c2.center);
    let (r1, r2) = (c1.radius, c2.radius);
    if eq_0(vec.x) && eq_0(vec.y) {
        // coincident equal circles: one canonical representative, the
        // leftmost point; concentric unequal circles never meet
        return if eq(r1, r2) {
            vec![c1.center.translate(Vector::new(-r1, 0.0))]
        } else {
            Vec::new()
        };
    }
    let dist = vec.len();
    if crate::tolerance::gt(dist, r1 + r2) {
        return Vec::new();
    }
    if lt(dist + r1.min(r2), r1.max(r2)) {
        return Vec::new();
    }
    let dir = Vector::new(vec.x / dist, vec.y / dist);
    if eq(dist, r1 + r2) || eq(dist, (r1 - r2).abs()) {
        // external tangency, or internal with the touch point past the
        // first center when this circle is the smaller one
        let sign = if eq(dist, r1 + r2) || r1 >= r2 { 1.0 } else { -1.0 };
        return vec![c1.center.translate(dir * (sign * r1))];
    }
    // distance from the first center to the midpoint of the common chord
    let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
    let mid = c1.center.translate(dir * a);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    vec![
        mid.translate(Vector::new(dir.y, -dir.x) * h),
        mid.translate(Vector::new(-dir.y, dir.x) * h),
    ]
}

/// Intersects a circle with a box boundary.
pub fn circle_to_box(circle: &Circle, bbox: &Box2) -> Vec<Vector> {
    let mut ip = Vec::new();
    for side in bbox.to_segments() {
        for pt in segment_to_circle(&side, circle) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}

/// Intersects an arc with a circle. An arc lying on the circle yields its
/// endpoints.
pub fn arc_to_circle(arc: &Arc, circle: &Circle) -> Vec<Vector> {
    if arc.bounding_box().not_intersects(&circle.bounding_box()) {
        return Vec::new();
    }
    if arc.center.equal_to(&circle.center) && eq(arc.radius, circle.radius) {
        let mut ip = Vec::new();
        push_unique(&mut ip, arc.start());
        push_unique(&mut ip, arc.end());
        return ip;
    }
    circle_to_circle(&arc.circle(), circle)
        .into_iter()
        .filter(|pt| arc.contains(pt))
        .collect()
}

/// Intersects two arcs. Overlapping arcs on the same circle yield the
/// endpoints of the overlap.
pub fn arc_to_arc(a1: &Arc, a2: &Arc) -> Vec<Vector> {
    if a1.bounding_box().not_intersects(&a2.bounding_box()) {
        return Vec::new();
    }
    if a1.center.equal_to(&a2.center) && eq(a1.radius, a2.radius) {
        let mut ip = Vec::new();
        for pt in [a1.start(), a1.end()] {
            if a2.contains(&pt) {
                push_unique(&mut ip, pt);
            }
        }
        for pt in [a2.start(), a2.end()] {
            if a1.contains(&pt) {
                push_unique(&mut ip, pt);
            }
        }
        return ip;
    }
    circle_to_circle(&a1.circle(), &a2.circle())
        .into_iter()
        .filter(|pt| a1.contains(pt) && a2.contains(pt))
        .collect()
}

/// Intersects an arc with a box boundary.
pub fn arc_to_box(arc: &Arc, bbox: &Box2) -> Vec<Vector> {
    let mut ip = Vec::new();
    for side in bbox.to_segments() {
        for pt in segment_to_arc(&side, arc) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}

/// Intersects a ray with a line. A ray lying on the line yields its start
/// point.
pub fn ray_to_line(ray: &Ray, line: &Line) -> Vec<Vector> {
    if line.incident_to(&ray.line()) {
        return vec![ray.pt];
    }
    line_to_line(&ray.line(), line)
        .into_iter()
        .filter(|pt| ray.contains(pt))
        .collect()
}

/// Intersects two rays. Collinear overlapping rays yield the start points
/// inside the overlap.
pub fn ray_to_ray(r1: &Ray, r2: &Ray) -> Vec<Vector> {
    if r1.line().incident_to(&r2.line()) {
        let mut ip = Vec::new();
        if r2.contains(&r1.pt) {
            push_unique(&mut ip, r1.pt);
        }
        if r1.contains(&r2.pt) {
            push_unique(&mut ip, r2.pt);
        }
        return ip;
    }
    line_to_line(&r1.line(), &r2.line())
        .into_iter()
        .filter(|pt| r1.contains(pt) && r2.contains(pt))
        .collect()
}

/// Intersects a ray with a segment. A collinear overlap yields its
/// endpoints.
pub fn ray_to_segment(ray: &Ray, seg: &Segment) -> Vec<Vector> {
    if seg.is_zero_length() {
        return if ray.contains(&seg.start) {
            vec![seg.start]
        } else {
            Vec::new()
        };
    }
    let Ok(support) = Line::new(seg.start, seg.end) else {
        return Vec::new();
    };
    if support.incident_to(&ray.line()) {
        let mut ip = Vec::new();
        for pt in [seg.start, seg.end] {
            if ray.contains(&pt) {
                push_unique(&mut ip, pt);
            }
        }
        if seg.contains(&ray.pt) {
            push_unique(&mut ip, ray.pt);
        }
        return ip;
    }
    line_to_line(&ray.line(), &support)
        .into_iter()
        .filter(|pt| ray.contains(pt) && seg.contains(pt))
        .collect()
}

/// Intersects a ray with a circle.
pub fn ray_to_circle(ray: &Ray, circle: &Circle) -> Vec<Vector> {
    line_to_circle(&ray.line(), circle)
        .into_iter()
        .filter(|pt| ray.contains(pt))
        .collect()
}

/// Intersects a ray with an arc.
pub fn ray_to_arc(ray: &Ray, arc: &Arc) -> Vec<Vector> {
    line_to_circle(&ray.line(), &arc.circle())
        .into_iter()
        .filter(|pt| ray.contains(pt) && arc.contains(pt))
        .collect()
}

/// Intersects a ray with a box boundary.
pub fn ray_to_box(ray: &Ray, bbox: &Box2) -> Vec<Vector> {
    let mut ip = Vec::new();
    for side in bbox.to_segments() {
        for pt in ray_to_segment(ray, &side) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}

/// Intersects two box boundaries.
pub fn box_to_box(b1: &Box2, b2: &Box2) -> Vec<Vector> {
    if b1.not_intersects(b2) {
        return Vec::new();
    }
    let mut ip = Vec::new();
    for s1 in b1.to_segments() {
        for s2 in b2.to_segments() {
            for pt in segment_to_segment(&s1, &s2) {
                push_unique(&mut ip, pt);
            }
        }
    }
    ip
}

/// Intersects any shape with a polygon boundary, using the polygon's edge
/// index to narrow candidates. Points found on a line come back sorted
/// along it.
pub fn shape_to_polygon(shape: &Shape, polygon: &Polygon) -> Vec<Vector> {
    let mut ip = Vec::new();
    for edge_id in polygon.search(&shape.bounding_box()) {
        let edge_shape = polygon.edge(edge_id).shape.as_shape();
        for pt in intersect(&edge_shape, shape) {
            push_unique(&mut ip, pt);
        }
    }
    if let Shape::Line(line) = shape {
        ip = line.sort_points(&ip);
    }
    ip
}

/// Intersects the boundaries of two polygons.
pub fn polygon_to_polygon(p1: &Polygon, p2: &Polygon) -> Vec<Vector> {
    let mut ip = Vec::new();
    if p1.bounding_box().not_intersects(&p2.bounding_box()) {
        return ip;
    }
    for edge_id in p1.edge_ids() {
        let edge_shape = p1.edge(edge_id).shape.as_shape();
        for pt in shape_to_polygon(&edge_shape, p2) {
            push_unique(&mut ip, pt);
        }
    }
    ip
}
