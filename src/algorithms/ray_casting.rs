//! Point-in-polygon test by horizontal ray shooting.

use crate::polygon::{EdgeShape, Inclusion, Polygon};
use crate::primitives::{Box2, Line, Ray, Shape, Vector};
use crate::tolerance::{eq, eq_0, get_tolerance};

/// Classifies a point against a polygon region.
///
/// Shoots a horizontal ray in the positive x direction and counts proper
/// boundary crossings: a hit equal to the query point short-circuits to
/// `Boundary`; a crossing at a vertex is counted once and only when the
/// adjacent edges leave the ray line on opposite sides; an arc touching
/// the ray at a bounding-box extremum is tangent, not a crossing. An odd
/// count means `Inside`.
pub fn ray_shoot(polygon: &Polygon, pt: Vector) -> Inclusion {
    let tol = get_tolerance();
    let polygon_box = polygon.bounding_box();
    let padded = Box2::new(
        polygon_box.xmin - tol,
        polygon_box.ymin - tol,
        polygon_box.xmax + tol,
        polygon_box.ymax + tol,
    );
    if !padded.contains_point(&pt) {
        return Inclusion::Outside;
    }

    let ray = Ray::shooting_right(pt);
    let line = ray.line();
    let search_box = Box2::new(pt.x - tol, pt.y - tol, f64::INFINITY, pt.y + tol);

    let mut intersections: Vec<(Vector, usize)> = Vec::new();
    for edge_id in polygon.search(&search_box) {
        let edge_shape = polygon.edge(edge_id).shape.as_shape();
        for ip in crate::algorithms::intersect::intersect(&Shape::Ray(ray), &edge_shape) {
            if ip.equal_to(&pt) {
                return Inclusion::Boundary;
            }
            intersections.push((ip, edge_id));
        }
    }
    intersections.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));

    let mut counter = 0;
    for i in 0..intersections.len() {
        let (ip, edge_id) = intersections[i];
        let edge = polygon.edge(edge_id);
        if ip.equal_to(&edge.start()) {
            // a vertex hit shows up on both adjacent edges; count it on
            // one of them only
            if i > 0 {
                let (prev_ip, prev_edge_id) = intersections[i - 1];
                if ip.equal_to(&prev_ip) && edge.prev == prev_edge_id {
                    continue;
                }
            }
            let prev_id = skip_zero_length_back(polygon, edge.prev);
            let prev_tangent = polygon.edge(prev_id).shape.tangent_in_end();
            let cur_tangent = edge.shape.tangent_in_start();
            if straddles(&line, &ip, &prev_tangent, &cur_tangent) {
                counter += 1;
            }
        } else if ip.equal_to(&edge.end()) {
            if i > 0 {
                let (prev_ip, prev_edge_id) = intersections[i - 1];
                if ip.equal_to(&prev_ip) && edge.next == prev_edge_id {
                    continue;
                }
            }
            let next_id = skip_zero_length_forward(polygon, edge.next);
            let next_tangent = polygon.edge(next_id).shape.tangent_in_start();
            let cur_tangent = edge.shape.tangent_in_end();
            if straddles(&line, &ip, &next_tangent, &cur_tangent) {
                counter += 1;
            }
        } else {
            match edge.shape {
                EdgeShape::Segment(_) => counter += 1,
                EdgeShape::Arc(_) => {
                    // tangency at an arc extremum is not a crossing
                    let bounding = edge.shape.bounding_box();
                    if !(eq(ip.y, bounding.ymin) || eq(ip.y, bounding.ymax)) {
                        counter += 1;
                    }
                }
            }
        }
    }

    if counter % 2 == 1 {
        Inclusion::Inside
    } else {
        Inclusion::Outside
    }
}

/// Nudges the vertex along both tangents and checks whether the two
/// neighbors leave the ray line on opposite sides.
fn straddles(line: &Line, vertex: &Vector, tangent_a: &Vector, tangent_b: &Vector) -> bool {
    let pt_a = vertex.translate(*tangent_a);
    let pt_b = vertex.translate(*tangent_b);
    pt_a.left_to(line) != pt_b.left_to(line)
}

fn skip_zero_length_back(polygon: &Polygon, mut id: usize) -> usize {
    let mut guard = 0;
    while eq_0(polygon.edge(id).length()) && guard < polygon.edge_count() {
        id = polygon.edge(id).prev;
        guard += 1;
    }
    id
}

fn skip_zero_length_forward(polygon: &Polygon, mut id: usize) -> usize {
    let mut guard = 0;
    while eq_0(polygon.edge(id).length()) && guard < polygon.edge_count() {
        id = polygon.edge(id).next;
        guard += 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Circle;

    fn square() -> Polygon {
        Polygon::from_points(&[
            Vector::new(0.0, 0.0),
            Vector::new(4.0, 0.0),
            Vector::new(4.0, 4.0),
            Vector::new(0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_inside() {
        assert_eq!(ray_shoot(&square(), Vector::new(2.0, 2.0)), Inclusion::Inside);
    }

    #[test]
    fn test_outside() {
        let poly = square();
        assert_eq!(ray_shoot(&poly, Vector::new(5.0, 2.0)), Inclusion::Outside);
        assert_eq!(ray_shoot(&poly, Vector::new(2.0, -1.0)), Inclusion::Outside);
    }

    #[test]
    fn test_boundary_edge_and_vertex() {
        let poly = square();
        assert_eq!(ray_shoot(&poly, Vector::new(2.0, 0.0)), Inclusion::Boundary);
        assert_eq!(ray_shoot(&poly, Vector::new(0.0, 0.0)), Inclusion::Boundary);
        assert_eq!(ray_shoot(&poly, Vector::new(4.0, 2.0)), Inclusion::Boundary);
    }

    #[test]
    fn test_outside_collinear_with_edge() {
        // the ray runs along the bottom edge without entering
        let poly = square();
        assert_eq!(ray_shoot(&poly, Vector::new(-1.0, 0.0)), Inclusion::Outside);
        assert_eq!(ray_shoot(&poly, Vector::new(-1.0, 4.0)), Inclusion::Outside);
    }

    #[test]
    fn test_ray_through_vertex() {
        // diamond: the ray from the left passes exactly through two
        // vertices but crosses the boundary twice
        let poly = Polygon::from_points(&[
            Vector::new(2.0, 0.0),
            Vector::new(4.0, 2.0),
            Vector::new(2.0, 4.0),
            Vector::new(0.0, 2.0),
        ])
        .unwrap();
        assert_eq!(ray_shoot(&poly, Vector::new(2.0, 2.0)), Inclusion::Inside);
        assert_eq!(ray_shoot(&poly, Vector::new(-2.0, 2.0)), Inclusion::Outside);
    }

    #[test]
    fn test_hole() {
        let mut poly = square();
        poly.add_face_from_points(&[
            Vector::new(1.0, 1.0),
            Vector::new(1.0, 3.0),
            Vector::new(3.0, 3.0),
            Vector::new(3.0, 1.0),
        ])
        .unwrap();
        assert_eq!(ray_shoot(&poly, Vector::new(2.0, 2.0)), Inclusion::Outside);
        assert_eq!(ray_shoot(&poly, Vector::new(0.5, 2.0)), Inclusion::Inside);
    }

    #[test]
    fn test_circle_polygon() {
        let poly = Polygon::from_circle(&Circle::new(Vector::zero(), 2.0));
        assert_eq!(ray_shoot(&poly, Vector::zero()), Inclusion::Inside);
        assert_eq!(ray_shoot(&poly, Vector::new(2.0, 0.0)), Inclusion::Boundary);
        assert_eq!(ray_shoot(&poly, Vector::new(3.0, 0.0)), Inclusion::Outside);
        // tangent to the top of the circle from outside
        assert_eq!(ray_shoot(&poly, Vector::new(-3.0, 2.0)), Inclusion::Outside);
    }
}
