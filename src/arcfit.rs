//! Arc fitting: compresses a polyline into line and arc segments.
//!
//! The fitter slides a window along the trace, growing it while a
//! least-squares circle stays within the deviation tolerance, and emits one
//! arc per maximal window. Runs that no circle can approximate (straight or
//! noisy stretches) fall back to single-step line segments.

use nalgebra::{Matrix3, Vector3};

/// Real-valued coordinate in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A circle fitted to a window of points.
#[derive(Debug, Clone, Copy)]
pub struct CircleFit {
    pub center: Point,
    pub radius: f64,
}

/// Types of fitted segments. Arc direction is part of the type, mirroring
/// the G2/G3 split in the output vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentType {
    Line,
    ArcCW,
    ArcCCW,
}

/// A contiguous sub-range of a trace approximated by one motion primitive.
#[derive(Debug, Clone)]
pub struct FittedSegment {
    pub segment_type: SegmentType,
    pub start: Point,
    pub end: Point,
    /// Fitted circle center; `None` for line segments.
    pub center: Option<Point>,
}

/// Fits a circle to `points` by linear least squares on the algebraic form
/// `2*x*xc + 2*y*yc + c = x^2 + y^2`, solved via the normal equations. The
/// radius is `sqrt(c + xc^2 + yc^2)`. Returns `None` when the system is
/// singular: collinear points make the circle unbounded, which callers must
/// treat as "no circle", not an error.
pub fn least_squares_circle_fit(points: &[Point]) -> Option<CircleFit> {
    if points.len() < 3 {
        return None;
    }

    // Normal equations A^T A m = A^T b for rows [2x, 2y, 1] and b = x^2+y^2.
    let mut ata = Matrix3::zeros();
    let mut atb = Vector3::zeros();
    for p in points {
        let row = Vector3::new(2.0 * p.x, 2.0 * p.y, 1.0);
        let b = p.x * p.x + p.y * p.y;
        ata += row * row.transpose();
        atb += row * b;
    }

    let solution = ata.lu().solve(&atb)?;
    let (xc, yc, c) = (solution[0], solution[1], solution[2]);

    let radius_sq = c + xc * xc + yc * yc;
    if !radius_sq.is_finite() || radius_sq <= 0.0 {
        return None;
    }

    Some(CircleFit {
        center: Point::new(xc, yc),
        radius: radius_sq.sqrt(),
    })
}

/// Maximum radial deviation of any point from the fitted circle's curve.
pub fn max_radial_deviation(points: &[Point], fit: &CircleFit) -> f64 {
    points
        .iter()
        .map(|p| (p.distance_to(&fit.center) - fit.radius).abs())
        .fold(0.0, f64::max)
}

/// Signed area test: positive when p0->p1->p2 turns counter-clockwise,
/// negative when clockwise, zero when collinear.
pub fn cross_product(p0: Point, p1: Point, p2: Point) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x)
}

/// Greedy maximal-window arc fitter.
#[derive(Debug, Clone)]
pub struct ArcFitter {
    /// Maximum allowed radial deviation of any window point from its fitted
    /// circle, in output units.
    tolerance: f64,
}

impl ArcFitter {
    /// Smallest window a circle can be fitted to.
    const MIN_WINDOW: usize = 3;
    /// Cap on window growth. Bounds fit cost and avoids ill-conditioned
    /// fits on long near-straight runs.
    const MAX_WINDOW: usize = 10;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Covers `points` with an ordered sequence of line and arc segments.
    ///
    /// At each cursor position the window grows from 3 points up to
    /// `min(10, remaining)`, keeping the largest window whose fitted circle
    /// stays within tolerance and stopping at the first failure. An accepted
    /// window becomes one arc and the cursor advances to its last point,
    /// which seeds the next window. With no accepted window, one line
    /// segment connects the cursor to the next point and the cursor
    /// advances by 1.
    pub fn fit(&self, points: &[Point]) -> Vec<FittedSegment> {
        let mut segments = Vec::new();

        let mut i = 0;
        while i < points.len() {
            let max_window = Self::MAX_WINDOW.min(points.len() - i);

            let mut best_fit = None;
            let mut best_window = Self::MIN_WINDOW;

            for size in Self::MIN_WINDOW..=max_window {
                let window = &points[i..i + size];
                let Some(fit) = least_squares_circle_fit(window) else {
                    break;
                };
                if max_radial_deviation(window, &fit) > self.tolerance {
                    break;
                }
                best_fit = Some(fit);
                best_window = size;
            }

            let Some(fit) = best_fit else {
                if i + 1 < points.len() {
                    segments.push(FittedSegment {
                        segment_type: SegmentType::Line,
                        start: points[i],
                        end: points[i + 1],
                        center: None,
                    });
                }
                i += 1;
                continue;
            };

            let window = &points[i..i + best_window];
            let cross = cross_product(window[0], window[1], window[2]);
            // Exactly-collinear windows default to clockwise.
            let segment_type = if cross <= 0.0 {
                SegmentType::ArcCW
            } else {
                SegmentType::ArcCCW
            };

            segments.push(FittedSegment {
                segment_type,
                start: window[0],
                end: window[best_window - 1],
                center: Some(fit.center),
            });

            // The shared endpoint seeds the next window.
            i += best_window - 1;
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn circle_points(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point> {
        (0..n)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / n as f64;
                Point::new(cx + r * theta.cos(), cy + r * theta.sin())
            })
            .collect()
    }

    #[test]
    fn test_collinear_points_have_no_fit() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert!(least_squares_circle_fit(&points).is_none());
    }

    #[test]
    fn test_exact_circle_fit() {
        let points = circle_points(3.0, -2.0, 5.0, 12);
        let fit = least_squares_circle_fit(&points[..8]).unwrap();
        assert!((fit.center.x - 3.0).abs() < 1e-9);
        assert!((fit.center.y - -2.0).abs() < 1e-9);
        assert!((fit.radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_point_window_is_arc_eligible() {
        // Minimum window size is 3: a 3-point trace still gets one arc.
        let points = circle_points(0.0, 0.0, 10.0, 36);
        let segments = ArcFitter::new(0.01).fit(&points[..3]);
        assert_eq!(segments.len(), 1);
        assert_ne!(segments[0].segment_type, SegmentType::Line);
    }

    #[test]
    fn test_straight_run_falls_back_to_lines() {
        let points: Vec<Point> = (0..6).map(|k| Point::new(k as f64, 0.0)).collect();
        let segments = ArcFitter::new(0.5).fit(&points);
        assert_eq!(segments.len(), 5);
        for (k, seg) in segments.iter().enumerate() {
            assert_eq!(seg.segment_type, SegmentType::Line);
            assert_eq!(seg.start, points[k]);
            assert_eq!(seg.end, points[k + 1]);
            assert!(seg.center.is_none());
        }
    }

    #[test]
    fn test_perfect_circle_yields_maximal_arcs() {
        // 19 exact points on a circle: one 10-point window, then the shared
        // endpoint seeds a second 10-point window ending at the last point.
        let points: Vec<Point> = circle_points(10.0, 10.0, 8.0, 36)
            .into_iter()
            .take(19)
            .collect();
        let segments = ArcFitter::new(0.01).fit(&points);
        assert_eq!(segments.len(), 2);
        for seg in &segments {
            assert_ne!(seg.segment_type, SegmentType::Line);
            let center = seg.center.unwrap();
            assert!((center.x - 10.0).abs() < 0.01);
            assert!((center.y - 10.0).abs() < 0.01);
            assert!((center.distance_to(&seg.start) - 8.0).abs() < 0.01);
        }
        assert_eq!(segments[0].end, segments[1].start);
        assert_eq!(segments[1].end, points[18]);
    }

    #[test]
    fn test_orientation_follows_winding() {
        let ccw = circle_points(0.0, 0.0, 5.0, 24);
        let segments = ArcFitter::new(0.05).fit(&ccw[..10]);
        assert!(segments
            .iter()
            .all(|s| s.segment_type == SegmentType::ArcCCW));

        let cw: Vec<Point> = ccw[..10].iter().rev().copied().collect();
        let segments = ArcFitter::new(0.05).fit(&cw);
        assert!(segments.iter().all(|s| s.segment_type == SegmentType::ArcCW));
    }

    #[test]
    fn test_tolerance_bounds_deviation() {
        // A circle with one point nudged outward: a tight tolerance must
        // reject windows containing it.
        let mut points = circle_points(0.0, 0.0, 5.0, 24);
        points[5].x += 0.5;
        let segments = ArcFitter::new(0.01).fit(&points[..12]);
        for seg in &segments {
            if let Some(center) = seg.center {
                let fit = CircleFit {
                    center,
                    radius: center.distance_to(&seg.start),
                };
                assert!(max_radial_deviation(&[seg.start, seg.end], &fit) < 0.1);
            }
        }
        // The nudged point forces at least one window break.
        assert!(segments.len() > 2);
    }

    #[test]
    fn test_two_point_input_yields_single_line() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let segments = ArcFitter::new(1.0).fit(&points);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_type, SegmentType::Line);
    }
}
