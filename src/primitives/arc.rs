//! Circular arc defined by center, radius, angles and winding direction.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::primitives::{Box2, Circle, Segment, Shape, Vector};
use crate::tolerance::{eq, eq_0, le};

/// Winding direction constant for counter-clockwise arcs.
pub const CCW: bool = true;
/// Winding direction constant for clockwise arcs.
pub const CW: bool = false;

/// A circular arc.
///
/// The arc starts at `start_angle` and ends at `end_angle`, traversed in
/// the direction given by `counter_clockwise`. Start and end points are
/// derived by rotating the reference point `(center.x + radius, center.y)`
/// around the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Vector,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub counter_clockwise: bool,
}

impl Arc {
    /// Creates a new arc.
    #[inline]
    pub fn new(
        center: Vector,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            counter_clockwise,
        }
    }

    /// Creates an arc from its center and explicit start/end points.
    ///
    /// When the two points subtend the same angle the result is a full
    /// counter-clockwise circle. The radius is taken from the start point.
    pub fn from_endpoints(center: Vector, start: Vector, end: Vector, counter_clockwise: bool) -> Self {
        let start_angle = Vector::from_points(center, start).slope();
        let mut end_angle = Vector::from_points(center, end).slope();
        let mut ccw = counter_clockwise;
        if eq(start_angle, end_angle) {
            end_angle += TAU;
            ccw = true;
        }
        let radius = Vector::from_points(center, start).len();
        Self::new(center, radius, start_angle, end_angle, ccw)
    }

    /// Sweep angle in radians, a non-negative number in `[0, 2π]`.
    pub fn sweep(&self) -> f64 {
        if eq(self.start_angle, self.end_angle) {
            return 0.0;
        }
        if eq((self.start_angle - self.end_angle).abs(), TAU) {
            return TAU;
        }
        // fold both angles into [0, 2π) so angles several turns apart
        // cannot push the sweep past a full turn
        let start = self.start_angle.rem_euclid(TAU);
        let end = self.end_angle.rem_euclid(TAU);
        let mut sweep = if self.counter_clockwise {
            end - start
        } else {
            start - end
        };
        if sweep < 0.0 {
            sweep += TAU;
        }
        sweep
    }

    /// Start point of the arc.
    pub fn start(&self) -> Vector {
        let p0 = Vector::new(self.center.x + self.radius, self.center.y);
        p0.rotate_about(self.start_angle, self.center)
    }

    /// End point of the arc.
    pub fn end(&self) -> Vector {
        let p0 = Vector::new(self.center.x + self.radius, self.center.y);
        p0.rotate_about(self.end_angle, self.center)
    }

    /// Arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.sweep() * self.radius).abs()
    }

    /// The supporting circle of the arc.
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    /// Bounding box, computed from the quadrant-monotonic decomposition.
    pub fn bounding_box(&self) -> Box2 {
        let mut bounding = self
            .break_to_functional()
            .iter()
            .fold(Box2::empty(), |acc, arc| acc.merge(&arc.start().box_of()));
        bounding = bounding.merge(&self.end().box_of());
        bounding
    }

    /// Returns `true` if the point lies on the arc.
    ///
    /// The point must lie on the supporting circle and its angular position
    /// must fall inside the sweep, tested by comparing the length of a
    /// trial arc from the start to the point against the full length.
    pub fn contains(&self, pt: &Vector) -> bool {
        if !eq(Vector::from_points(self.center, *pt).len(), self.radius) {
            return false;
        }
        if pt.equal_to(&self.start()) {
            return true;
        }
        let angle = Vector::from_points(self.center, *pt).slope();
        let test_arc = Arc::new(
            self.center,
            self.radius,
            self.start_angle,
            angle,
            self.counter_clockwise,
        );
        le(test_arc.length(), self.length())
    }

    /// Splits the arc at a point assumed to lie on it.
    ///
    /// Returns `(None, Some(clone))` or `(Some(clone), None)` when the point
    /// coincides with an endpoint.
    pub fn split(&self, pt: &Vector) -> (Option<Arc>, Option<Arc>) {
        if self.start().equal_to(pt) {
            return (None, Some(*self));
        }
        if self.end().equal_to(pt) {
            return (Some(*self), None);
        }
        let angle = Vector::from_points(self.center, *pt).slope();
        (
            Some(Arc::new(
                self.center,
                self.radius,
                self.start_angle,
                angle,
                self.counter_clockwise,
            )),
            Some(Arc::new(
                self.center,
                self.radius,
                angle,
                self.end_angle,
                self.counter_clockwise,
            )),
        )
    }

    /// Middle point of the arc.
    pub fn middle(&self) -> Vector {
        let end_angle = if self.counter_clockwise {
            self.start_angle + self.sweep() / 2.0
        } else {
            self.start_angle - self.sweep() / 2.0
        };
        Arc::new(
            self.center,
            self.radius,
            self.start_angle,
            end_angle,
            self.counter_clockwise,
        )
        .end()
    }

    /// Point at the given arc length from the start, or `None` outside
    /// `[0, length]`.
    pub fn point_at_length(&self, length: f64) -> Option<Vector> {
        if length < 0.0 || length > self.length() {
            return None;
        }
        if length == 0.0 {
            return Some(self.start());
        }
        let factor = length / self.length();
        let end_angle = if self.counter_clockwise {
            self.start_angle + self.sweep() * factor
        } else {
            self.start_angle - self.sweep() * factor
        };
        Some(
            Arc::new(
                self.center,
                self.radius,
                self.start_angle,
                end_angle,
                self.counter_clockwise,
            )
            .end(),
        )
    }

    /// Chord height ("sagitta") of the arc.
    pub fn chord_height(&self) -> f64 {
        (1.0 - (self.sweep() / 2.0).abs().cos()) * self.radius
    }

    /// Breaks the arc at the axis-extreme angles 0, π/2, π and 3π/2 it
    /// passes through, returning quadrant-monotonic sub-arcs ordered from
    /// start to end.
    ///
    /// Bounding box and area-integral computations are only correct on arcs
    /// that do not cross an extremum internally, which is what the returned
    /// pieces guarantee. Degenerate or accidentally-full-circle pieces are
    /// dropped.
    pub fn break_to_functional(&self) -> Vec<Arc> {
        let mut functional_arcs: Vec<Arc> = Vec::new();
        let angles = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
        let r = self.radius;
        let (x, y) = (self.center.x, self.center.y);
        let points = [
            Vector::new(x + r, y),
            Vector::new(x, y + r),
            Vector::new(x - r, y),
            Vector::new(x, y - r),
        ];

        // Test arcs from the start point to every extreme point the arc
        // passes through
        let mut test_arcs: Vec<Arc> = Vec::new();
        for i in 0..4 {
            if self.contains(&points[i]) {
                test_arcs.push(Arc::new(
                    self.center,
                    self.radius,
                    self.start_angle,
                    angles[i],
                    self.counter_clockwise,
                ));
            }
        }

        if test_arcs.is_empty() {
            functional_arcs.push(*self);
            return functional_arcs;
        }

        test_arcs.sort_by(|a, b| a.length().total_cmp(&b.length()));

        for test_arc in &test_arcs {
            let start_angle = match functional_arcs.last() {
                Some(prev) => prev.end_angle,
                None => self.start_angle,
            };
            let new_arc = Arc::new(
                self.center,
                self.radius,
                start_angle,
                test_arc.end_angle,
                self.counter_clockwise,
            );
            if !eq_0(new_arc.length()) {
                functional_arcs.push(new_arc);
            }
        }

        // Last piece from the last extreme point to the arc end
        let start_angle = match functional_arcs.last() {
            Some(prev) => prev.end_angle,
            None => self.start_angle,
        };
        let new_arc = Arc::new(
            self.center,
            self.radius,
            start_angle,
            self.end_angle,
            self.counter_clockwise,
        );
        // The closing piece may degenerate to a full circle when the arc
        // starts exactly at an extremum; such a piece is not functional
        if !eq_0(new_arc.length()) && !eq(new_arc.sweep(), TAU) {
            functional_arcs.push(new_arc);
        }
        functional_arcs
    }

    /// Unit tangent at the start point, pointing from start towards end.
    pub fn tangent_in_start(&self) -> Vector {
        let vec = Vector::from_points(self.center, self.start());
        let angle = if self.counter_clockwise {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        };
        vec.rotate(angle).normalize()
    }

    /// Unit tangent at the end point, pointing from end towards start.
    pub fn tangent_in_end(&self) -> Vector {
        let vec = Vector::from_points(self.center, self.end());
        let angle = if self.counter_clockwise {
            -FRAC_PI_2
        } else {
            FRAC_PI_2
        };
        vec.rotate(angle).normalize()
    }

    /// Returns the arc traversed in the opposite direction.
    pub fn reverse(&self) -> Arc {
        Arc::new(
            self.center,
            self.radius,
            self.end_angle,
            self.start_angle,
            !self.counter_clockwise,
        )
    }

    /// Returns the arc translated by `v`.
    pub fn translate(&self, v: Vector) -> Arc {
        Arc::new(
            self.center.translate(v),
            self.radius,
            self.start_angle,
            self.end_angle,
            self.counter_clockwise,
        )
    }

    /// Signed area between the arc and the horizontal baseline `ymin`,
    /// summed over the quadrant-monotonic decomposition.
    pub fn definite_integral(&self, ymin: f64) -> f64 {
        self.break_to_functional()
            .iter()
            .map(|arc| arc.circular_segment_definite_integral(ymin))
            .sum()
    }

    fn circular_segment_definite_integral(&self, ymin: f64) -> f64 {
        let chord = Segment::new(self.start(), self.end());
        let area_trapez = chord.definite_integral(ymin);
        let area_circular_segment = self.circular_segment_area();
        // a minor arc bulges right of its directed chord when the winding
        // is counter-clockwise, left when clockwise
        if self.counter_clockwise {
            area_trapez - area_circular_segment
        } else {
            area_trapez + area_circular_segment
        }
    }

    /// Area between the arc and its chord.
    pub fn circular_segment_area(&self) -> f64 {
        0.5 * self.radius * self.radius * (self.sweep() - self.sweep().sin())
    }

    /// Sorts points lying on the arc from start to end along the winding
    /// direction, by the length of the trial arc from the start to each
    /// point.
    pub fn sort_points(&self, points: &[Vector]) -> Vec<Vector> {
        let param = |pt: &Vector| {
            let angle = Vector::from_points(self.center, *pt).slope();
            Arc::new(
                self.center,
                self.radius,
                self.start_angle,
                angle,
                self.counter_clockwise,
            )
            .length()
        };
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| param(a).total_cmp(&param(b)));
        sorted
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(&Shape::Arc(*self), other)
    }

    /// Returns the minimal distance to another shape and the witness
    /// segment from this arc to it.
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(&Shape::Arc(*self), other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_quarter() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, FRAC_PI_2, CCW);
        assert_relative_eq!(arc.sweep(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_sweep_equal_angles_is_zero() {
        let arc = Arc::new(Vector::zero(), 1.0, 1.0, 1.0, CCW);
        assert_eq!(arc.sweep(), 0.0);
    }

    #[test]
    fn test_sweep_full_circle() {
        let arc = Arc::new(Vector::zero(), 1.0, PI, -PI, CCW);
        assert_relative_eq!(arc.sweep(), TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_sweep_clockwise() {
        let arc = Arc::new(Vector::zero(), 1.0, FRAC_PI_2, 0.0, CW);
        assert_relative_eq!(arc.sweep(), FRAC_PI_2, epsilon = 1e-12);
        let wrapped = Arc::new(Vector::zero(), 1.0, 0.0, FRAC_PI_2, CW);
        assert_relative_eq!(wrapped.sweep(), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_start_end_points() {
        let arc = Arc::new(Vector::zero(), 2.0, 0.0, FRAC_PI_2, CCW);
        assert!(arc.start().equal_to(&Vector::new(2.0, 0.0)));
        assert!(arc.end().equal_to(&Vector::new(0.0, 2.0)));
    }

    #[test]
    fn test_contains() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        assert!(arc.contains(&Vector::new(0.0, 1.0)));
        assert!(arc.contains(&Vector::new(1.0, 0.0)));
        assert!(arc.contains(&Vector::new(-1.0, 0.0)));
        assert!(!arc.contains(&Vector::new(0.0, -1.0)));
        assert!(!arc.contains(&Vector::new(0.5, 0.5)));
    }

    #[test]
    fn test_split() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let (first, second) = arc.split(&Vector::new(0.0, 1.0));
        let first = first.unwrap();
        let second = second.unwrap();
        assert_relative_eq!(first.sweep(), FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(second.sweep(), FRAC_PI_2, epsilon = 1e-9);
        assert!(first.end().equal_to(&second.start()));
    }

    #[test]
    fn test_middle() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        assert!(arc.middle().equal_to(&Vector::new(0.0, 1.0)));
    }

    #[test]
    fn test_break_to_functional_quarters() {
        // half circle from angle 0 to PI passes extrema at PI/2
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let parts = arc.break_to_functional();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].end().equal_to(&parts[1].start()));
        let total: f64 = parts.iter().map(|a| a.length()).sum();
        assert_relative_eq!(total, arc.length(), epsilon = 1e-9);
    }

    #[test]
    fn test_bounding_box_half_circle() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let b = arc.bounding_box();
        assert_relative_eq!(b.xmin, -1.0, epsilon = 1e-9);
        assert_relative_eq!(b.ymin, 0.0, epsilon = 1e-9);
        assert_relative_eq!(b.xmax, 1.0, epsilon = 1e-9);
        assert_relative_eq!(b.ymax, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tangents() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        assert!(arc.tangent_in_start().equal_to(&Vector::new(0.0, 1.0)));
        // the end tangent points backwards, from end towards start
        assert!(arc.tangent_in_end().equal_to(&Vector::new(0.0, 1.0)));
    }

    #[test]
    fn test_point_at_length() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let mid = arc.point_at_length(arc.length() / 2.0).unwrap();
        assert!(mid.equal_to(&Vector::new(0.0, 1.0)));
        assert!(arc.point_at_length(-0.1).is_none());
        assert!(arc.point_at_length(arc.length() + 0.1).is_none());
    }

    #[test]
    fn test_reverse() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let rev = arc.reverse();
        assert!(rev.start().equal_to(&arc.end()));
        assert!(rev.end().equal_to(&arc.start()));
        assert_relative_eq!(rev.sweep(), arc.sweep(), epsilon = 1e-12);
    }

    #[test]
    fn test_sort_points_follows_winding() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        let a = Vector::new(0.0, 1.0);
        let b = Vector::new((PI / 4.0).cos(), (PI / 4.0).sin());
        let sorted = arc.sort_points(&[a, b]);
        assert!(sorted[0].equal_to(&b));
        assert!(sorted[1].equal_to(&a));
    }

    #[test]
    fn test_from_endpoints() {
        let arc = Arc::from_endpoints(Vector::zero(), Vector::new(1.0, 0.0), Vector::new(0.0, 1.0), CCW);
        assert_relative_eq!(arc.radius, 1.0, epsilon = 1e-12);
        assert_relative_eq!(arc.sweep(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_circular_segment_area_half_circle() {
        let arc = Arc::new(Vector::zero(), 2.0, 0.0, PI, CCW);
        assert_relative_eq!(arc.circular_segment_area(), 2.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_distant_angles() {
        // angles more than a full turn apart still give a sweep in [0, 2π]
        let arc = Arc::new(Vector::zero(), 1.0, -10.0, 10.0, CCW);
        assert!(arc.sweep() <= TAU);
        assert_relative_eq!(arc.sweep(), 20.0f64.rem_euclid(TAU), epsilon = 1e-9);
        assert_relative_eq!(arc.length(), arc.radius * arc.sweep(), epsilon = 1e-9);
        assert!(arc.contains(&arc.middle()));

        let cw = Arc::new(Vector::zero(), 1.0, -10.0, 10.0, CW);
        assert_relative_eq!(arc.sweep() + cw.sweep(), TAU, epsilon = 1e-9);
    }

    #[test]
    fn test_definite_integral_half_circle() {
        let arc = Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW);
        // traversed right to left over the top, so the area comes out negative
        assert_relative_eq!(arc.definite_integral(0.0), -FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(arc.reverse().definite_integral(0.0), FRAC_PI_2, epsilon = 1e-9);
    }
}
