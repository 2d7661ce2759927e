//! Topological relations between shapes via the dimensionally extended
//! nine-intersection model.
//!
//! [`relate`] fills a 3x3 matrix whose cells hold witness shapes for the
//! intersection of interior, boundary and exterior of the two operands;
//! the named predicates read the matrix. Cells left `None` were not
//! computed by the routine and read as empty.

use crate::algorithms::boolean;
use crate::algorithms::intersect::{intersect as intersect_shapes, shape_to_polygon};
use crate::algorithms::ray_casting::ray_shoot;
use crate::error::GeometryError;
use crate::polygon::{Inclusion, Multiline, Polygon};
use crate::primitives::{Shape, Vector};

/// Intersection matrix of two shapes. Each cell is the set of witness
/// shapes for one interior/boundary/exterior pairing, `None` when the
/// routine did not compute it.
#[derive(Debug, Clone, Default)]
pub struct DE9IM {
    pub i2i: Option<Vec<Shape>>,
    pub i2b: Option<Vec<Shape>>,
    pub i2e: Option<Vec<Shape>>,
    pub b2i: Option<Vec<Shape>>,
    pub b2b: Option<Vec<Shape>>,
    pub b2e: Option<Vec<Shape>>,
    pub e2i: Option<Vec<Shape>>,
    pub e2b: Option<Vec<Shape>>,
    pub e2e: Option<Vec<Shape>>,
}

impl DE9IM {
    /// The matrix with operands swapped.
    pub fn transpose(self) -> DE9IM {
        DE9IM {
            i2i: self.i2i,
            i2b: self.b2i,
            i2e: self.e2i,
            b2i: self.i2b,
            b2b: self.b2b,
            b2e: self.e2b,
            e2i: self.i2e,
            e2b: self.b2e,
            e2e: self.e2e,
        }
    }
}

fn nonempty(cell: &Option<Vec<Shape>>) -> bool {
    cell.as_ref().is_some_and(|v| !v.is_empty())
}

/// Returns `true` if the shapes share at least one point.
pub fn intersect(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    let im = relate(a, b)?;
    Ok(nonempty(&im.i2i) || nonempty(&im.i2b) || nonempty(&im.b2i) || nonempty(&im.b2b))
}

/// Returns `true` if the shapes share no point.
pub fn disjoint(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    Ok(!intersect(a, b)?)
}

/// Returns `true` if the shapes cover the same point set.
pub fn equal(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    let im = relate(a, b)?;
    Ok(nonempty(&im.i2i)
        && !nonempty(&im.i2e)
        && !nonempty(&im.e2i)
        && !nonempty(&im.b2e)
        && !nonempty(&im.e2b))
}

/// Returns `true` if the shapes meet only at boundary points.
pub fn touch(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    let im = relate(a, b)?;
    Ok(!nonempty(&im.i2i) && (nonempty(&im.i2b) || nonempty(&im.b2i) || nonempty(&im.b2b)))
}

/// Returns `true` if `a` lies strictly inside `b`, boundaries apart.
pub fn inside(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    let im = relate(a, b)?;
    Ok(nonempty(&im.i2i)
        && !nonempty(&im.i2e)
        && !nonempty(&im.b2e)
        && !nonempty(&im.b2b))
}

/// Returns `true` if `a` lies in the closure of `b`.
pub fn covered(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    let im = relate(a, b)?;
    Ok(!nonempty(&im.i2e) && !nonempty(&im.b2e))
}

/// Returns `true` if `b` lies strictly inside `a`.
pub fn contain(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    inside(b, a)
}

/// Returns `true` if `b` lies in the closure of `a`.
pub fn cover(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    covered(b, a)
}

/// Computes the intersection matrix of two shapes.
pub fn relate(a: &Shape, b: &Shape) -> Result<DE9IM, GeometryError> {
    if let (Shape::Point(p1), Shape::Point(p2)) = (a, b) {
        return Ok(relate_point_to_point(p1, p2));
    }
    if let Shape::Point(pt) = a {
        if is_linear(b) {
            return Ok(relate_point_to_linear(pt, b));
        }
        if let Some(poly) = to_polygon(b) {
            return Ok(relate_point_to_areal(pt, &poly));
        }
        return Err(GeometryError::IllegalParameters);
    }
    if let Shape::Point(_) = b {
        return relate(b, a).map(DE9IM::transpose);
    }

    match (is_linear(a), is_linear(b)) {
        (true, true) => relate_linear_to_linear(a, b),
        (true, false) => {
            let poly = to_polygon(b).ok_or(GeometryError::IllegalParameters)?;
            relate_linear_to_areal(a, &poly)
        }
        (false, true) => {
            let poly = to_polygon(a).ok_or(GeometryError::IllegalParameters)?;
            relate_linear_to_areal(b, &poly).map(DE9IM::transpose)
        }
        (false, false) => {
            let p1 = to_polygon(a).ok_or(GeometryError::IllegalParameters)?;
            let p2 = to_polygon(b).ok_or(GeometryError::IllegalParameters)?;
            relate_polygon_to_polygon(&p1, &p2)
        }
    }
}

fn is_linear(shape: &Shape) -> bool {
    matches!(
        shape,
        Shape::Line(_) | Shape::Ray(_) | Shape::Segment(_) | Shape::Arc(_)
    )
}

/// Lifts an areal shape to a polygon region.
fn to_polygon(shape: &Shape) -> Option<Polygon> {
    match shape {
        Shape::Circle(circle) => Some(Polygon::from_circle(circle)),
        Shape::Box(bbox) => Some(Polygon::from_box(bbox)),
        Shape::Polygon(polygon) => Some(polygon.clone()),
        _ => None,
    }
}

/// Boundary points of a linear shape; a line has none.
fn linear_endpoints(shape: &Shape) -> Vec<Vector> {
    match shape {
        Shape::Line(_) => Vec::new(),
        Shape::Ray(ray) => vec![ray.pt],
        Shape::Segment(seg) => vec![seg.start, seg.end],
        Shape::Arc(arc) => vec![arc.start(), arc.end()],
        _ => Vec::new(),
    }
}

fn linear_sort_points(shape: &Shape, points: &[Vector]) -> Vec<Vector> {
    match shape {
        Shape::Line(line) => line.sort_points(points),
        Shape::Ray(ray) => ray.sort_points(points),
        Shape::Segment(seg) => seg.sort_points(points),
        Shape::Arc(arc) => arc.sort_points(points),
        _ => points.to_vec(),
    }
}

fn relate_point_to_point(a: &Vector, b: &Vector) -> DE9IM {
    let mut im = DE9IM::default();
    if a.equal_to(b) {
        im.i2i = Some(vec![Shape::Point(*a)]);
        im.i2e = Some(Vec::new());
        im.e2i = Some(Vec::new());
    } else {
        im.i2i = Some(Vec::new());
        im.i2e = Some(vec![Shape::Point(*a)]);
        im.e2i = Some(vec![Shape::Point(*b)]);
    }
    im
}

fn relate_point_to_linear(pt: &Vector, shape: &Shape) -> DE9IM {
    let mut im = DE9IM::default();
    im.i2i = Some(Vec::new());
    im.i2b = Some(Vec::new());
    im.i2e = Some(Vec::new());
    // the rest of the shape always has interior points off the query point
    im.e2i = Some(vec![shape.clone()]);
    if linear_endpoints(shape).iter().any(|end| end.equal_to(pt)) {
        im.i2b = Some(vec![Shape::Point(*pt)]);
    } else if shape.contains_point(pt) {
        im.i2i = Some(vec![Shape::Point(*pt)]);
    } else {
        im.i2e = Some(vec![Shape::Point(*pt)]);
    }
    im
}

fn relate_point_to_areal(pt: &Vector, polygon: &Polygon) -> DE9IM {
    let mut im = DE9IM::default();
    im.i2i = Some(Vec::new());
    im.i2b = Some(Vec::new());
    im.i2e = Some(Vec::new());
    im.e2i = Some(vec![Shape::Polygon(polygon.clone())]);
    match ray_shoot(polygon, *pt) {
        Inclusion::Inside => im.i2i = Some(vec![Shape::Point(*pt)]),
        Inclusion::Boundary => im.i2b = Some(vec![Shape::Point(*pt)]),
        Inclusion::Outside => im.i2e = Some(vec![Shape::Point(*pt)]),
    }
    im
}

fn relate_linear_to_linear(a: &Shape, b: &Shape) -> Result<DE9IM, GeometryError> {
    let ips = intersect_shapes(a, b);
    let ends_a = linear_endpoints(a);
    let ends_b = linear_endpoints(b);

    let mut i2i = Vec::new();
    let mut i2b = Vec::new();
    let mut i2e = Vec::new();
    let mut b2i = Vec::new();
    let mut b2b = Vec::new();
    let mut b2e = Vec::new();
    let mut e2i = Vec::new();
    let mut e2b = Vec::new();

    // pieces of each operand between intersection points, classified by
    // a representative interior point
    let mut ml_a = Multiline::from_shapes(std::slice::from_ref(a))?;
    ml_a.split(&linear_sort_points(a, &ips));
    for edge in &ml_a.edges {
        if b.contains_point(&edge.shape.interior_point()) {
            i2i.push(edge.shape.as_shape());
        } else {
            i2e.push(edge.shape.as_shape());
        }
    }
    let mut ml_b = Multiline::from_shapes(std::slice::from_ref(b))?;
    ml_b.split(&linear_sort_points(b, &ips));
    for edge in &ml_b.edges {
        if !a.contains_point(&edge.shape.interior_point()) {
            e2i.push(edge.shape.as_shape());
        }
    }

    for ip in &ips {
        let on_a = ends_a.iter().any(|end| end.equal_to(ip));
        let on_b = ends_b.iter().any(|end| end.equal_to(ip));
        match (on_a, on_b) {
            (true, true) => b2b.push(Shape::Point(*ip)),
            (true, false) => b2i.push(Shape::Point(*ip)),
            (false, true) => i2b.push(Shape::Point(*ip)),
            (false, false) => i2i.push(Shape::Point(*ip)),
        }
    }
    for end in &ends_a {
        if !ips.iter().any(|ip| ip.equal_to(end)) {
            b2e.push(Shape::Point(*end));
        }
    }
    for end in &ends_b {
        if !ips.iter().any(|ip| ip.equal_to(end)) {
            e2b.push(Shape::Point(*end));
        }
    }

    Ok(DE9IM {
        i2i: Some(i2i),
        i2b: Some(i2b),
        i2e: Some(i2e),
        b2i: Some(b2i),
        b2b: Some(b2b),
        b2e: Some(b2e),
        e2i: Some(e2i),
        e2b: Some(e2b),
        e2e: None,
    })
}

fn relate_linear_to_areal(shape: &Shape, polygon: &Polygon) -> Result<DE9IM, GeometryError> {
    let ips = shape_to_polygon(shape, polygon);
    let ends = linear_endpoints(shape);

    let mut i2i = Vec::new();
    let mut i2b = Vec::new();
    let mut i2e = Vec::new();
    let mut b2i = Vec::new();
    let mut b2b = Vec::new();
    let mut b2e = Vec::new();

    let mut multiline = Multiline::from_shapes(std::slice::from_ref(shape))?;
    multiline.split(&linear_sort_points(shape, &ips));
    for edge in &multiline.edges {
        match ray_shoot(polygon, edge.shape.interior_point()) {
            Inclusion::Inside => i2i.push(edge.shape.as_shape()),
            Inclusion::Boundary => i2b.push(edge.shape.as_shape()),
            Inclusion::Outside => i2e.push(edge.shape.as_shape()),
        }
    }
    // tangency points live in the shape interior against the region
    // boundary even when every piece stays outside
    for ip in &ips {
        if !ends.iter().any(|end| end.equal_to(ip)) {
            i2b.push(Shape::Point(*ip));
        }
    }
    for end in &ends {
        match ray_shoot(polygon, *end) {
            Inclusion::Inside => b2i.push(Shape::Point(*end)),
            Inclusion::Boundary => b2b.push(Shape::Point(*end)),
            Inclusion::Outside => b2e.push(Shape::Point(*end)),
        }
    }

    Ok(DE9IM {
        i2i: Some(i2i),
        i2b: Some(i2b),
        i2e: Some(i2e),
        b2i: Some(b2i),
        b2b: Some(b2b),
        b2e: Some(b2e),
        // the region interior always exceeds a one-dimensional shape
        e2i: Some(vec![Shape::Polygon(polygon.clone())]),
        e2b: None,
        e2e: None,
    })
}

fn relate_polygon_to_polygon(p1: &Polygon, p2: &Polygon) -> Result<DE9IM, GeometryError> {
    let (ips_on_p1, _) = boolean::calculate_intersections(p1, p2);
    let intersection = boolean::intersect(p1, p2)?;
    let difference1 = boolean::subtract(p1, p2)?;
    let difference2 = boolean::subtract(p2, p1)?;
    let (inner1, inner2) = boolean::inner_clip(p1, p2);
    let (outer1, outer2) = boolean::outer_clip(p1, p2);

    Ok(DE9IM {
        i2i: Some(polygon_cell(intersection)),
        i2b: Some(inner2),
        i2e: Some(polygon_cell(difference1)),
        b2i: Some(inner1),
        b2b: Some(ips_on_p1.iter().map(|pt| Shape::Point(*pt)).collect()),
        b2e: Some(outer1),
        e2i: Some(polygon_cell(difference2)),
        e2b: Some(outer2),
        e2e: None,
    })
}

fn polygon_cell(polygon: Polygon) -> Vec<Shape> {
    if polygon.edge_count() == 0 {
        Vec::new()
    } else {
        vec![Shape::Polygon(polygon)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Circle, Line, Segment};

    fn square(x: f64, y: f64, side: f64) -> Shape {
        Shape::Polygon(
            Polygon::from_points(&[
                Vector::new(x, y),
                Vector::new(x + side, y),
                Vector::new(x + side, y + side),
                Vector::new(x, y + side),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_points() {
        let a = Shape::Point(Vector::new(1.0, 1.0));
        let b = Shape::Point(Vector::new(1.0, 1.0));
        let c = Shape::Point(Vector::new(2.0, 1.0));
        assert!(equal(&a, &b).unwrap());
        assert!(disjoint(&a, &c).unwrap());
    }

    #[test]
    fn test_point_vs_segment() {
        let seg = Shape::Segment(Segment::from_coords(0.0, 0.0, 4.0, 0.0));
        let interior = Shape::Point(Vector::new(2.0, 0.0));
        let end = Shape::Point(Vector::new(0.0, 0.0));
        let off = Shape::Point(Vector::new(2.0, 1.0));
        assert!(inside(&interior, &seg).unwrap());
        assert!(covered(&end, &seg).unwrap());
        assert!(!inside(&end, &seg).unwrap());
        assert!(disjoint(&off, &seg).unwrap());
    }

    #[test]
    fn test_point_vs_polygon() {
        let poly = square(0.0, 0.0, 4.0);
        assert!(inside(&Shape::Point(Vector::new(2.0, 2.0)), &poly).unwrap());
        assert!(touch(&Shape::Point(Vector::new(0.0, 2.0)), &poly).unwrap());
        assert!(disjoint(&Shape::Point(Vector::new(5.0, 5.0)), &poly).unwrap());
        // transposed dispatch
        assert!(contain(&poly, &Shape::Point(Vector::new(2.0, 2.0))).unwrap());
    }

    #[test]
    fn test_segments_crossing_and_touching() {
        let a = Shape::Segment(Segment::from_coords(0.0, 0.0, 4.0, 4.0));
        let b = Shape::Segment(Segment::from_coords(0.0, 4.0, 4.0, 0.0));
        assert!(intersect(&a, &b).unwrap());
        assert!(!touch(&a, &b).unwrap());

        // meeting at a shared endpoint
        let c = Shape::Segment(Segment::from_coords(4.0, 4.0, 8.0, 4.0));
        assert!(touch(&a, &c).unwrap());
        assert!(!disjoint(&a, &c).unwrap());
    }

    #[test]
    fn test_equal_segments() {
        let a = Shape::Segment(Segment::from_coords(0.0, 0.0, 4.0, 0.0));
        let b = Shape::Segment(Segment::from_coords(4.0, 0.0, 0.0, 0.0));
        assert!(equal(&a, &b).unwrap());
    }

    #[test]
    fn test_segment_vs_polygon() {
        let poly = square(0.0, 0.0, 4.0);
        let inner = Shape::Segment(Segment::from_coords(1.0, 1.0, 3.0, 3.0));
        let crossing = Shape::Segment(Segment::from_coords(-1.0, 2.0, 5.0, 2.0));
        let outside = Shape::Segment(Segment::from_coords(5.0, 5.0, 6.0, 6.0));
        assert!(inside(&inner, &poly).unwrap());
        assert!(intersect(&crossing, &poly).unwrap());
        assert!(!inside(&crossing, &poly).unwrap());
        assert!(disjoint(&outside, &poly).unwrap());
    }

    #[test]
    fn test_line_tangent_to_circle() {
        let circle = Shape::Circle(Circle::new(Vector::zero(), 1.0));
        let tangent =
            Shape::Line(Line::new(Vector::new(0.0, 1.0), Vector::new(1.0, 1.0)).unwrap());
        assert!(touch(&tangent, &circle).unwrap());
        let secant = Shape::Line(Line::new(Vector::zero(), Vector::new(0.0, 1.0)).unwrap());
        assert!(intersect(&secant, &circle).unwrap());
        assert!(!touch(&secant, &circle).unwrap());
    }

    #[test]
    fn test_polygon_relations() {
        let big = square(0.0, 0.0, 4.0);
        let small = square(1.0, 1.0, 1.0);
        let far = square(10.0, 10.0, 1.0);
        let neighbor = square(4.0, 0.0, 4.0);

        assert!(inside(&small, &big).unwrap());
        assert!(contain(&big, &small).unwrap());
        assert!(cover(&big, &small).unwrap());
        assert!(disjoint(&big, &far).unwrap());
        assert!(touch(&big, &neighbor).unwrap());
        assert!(equal(&big, &big.clone()).unwrap());
    }

    #[test]
    fn test_overlapping_polygons() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!(intersect(&a, &b).unwrap());
        assert!(!touch(&a, &b).unwrap());
        assert!(!equal(&a, &b).unwrap());
        assert!(!inside(&a, &b).unwrap());
    }

    #[test]
    fn test_circle_in_box() {
        let circle = Shape::Circle(Circle::new(Vector::new(2.0, 2.0), 1.0));
        let bbox = Shape::Box(crate::primitives::Box2::new(0.0, 0.0, 4.0, 4.0));
        assert!(inside(&circle, &bbox).unwrap());
        assert!(cover(&bbox, &circle).unwrap());
    }
}
