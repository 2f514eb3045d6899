//! Contour tracing: walks connected boundary pixels into ordered traces.
//!
//! A trace is an ordered, 8-connected sequence of boundary pixels produced by
//! one walk. The walk prefers to continue in the direction it last moved
//! before trying turns, which keeps traces following edges instead of
//! zig-zagging into corners. A raster-wide visited mask guarantees every
//! pixel belongs to at most one trace.

use tracing::debug;

use crate::raster::BinaryRaster;

/// 4-connected neighbor offsets: up, right, left, down.
const NEIGHBORS_4: [(i32, i32); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

/// 8-connected neighbor offsets. The walk indexes this table by direction,
/// resuming from the previously used index, so the ordering is part of the
/// algorithm: reordering it changes which pixel wins multi-way ties.
const NEIGHBORS_8: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Traces shorter than this are degenerate (single or double pixels) and are
/// discarded.
const MIN_TRACE_LEN: usize = 3;

/// Integer pixel coordinate on a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TracePoint {
    pub x: i32,
    pub y: i32,
}

impl TracePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An ordered, 8-connected walk of boundary pixels.
#[derive(Debug, Clone)]
pub struct Trace {
    pub points: Vec<TracePoint>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Mutable visited grid owned by a single tracing run. Once a pixel is
/// marked it is never reset, so tracing terminates after at most W*H
/// admissions.
struct VisitedMask {
    width: usize,
    visited: Vec<bool>,
}

impl VisitedMask {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            visited: vec![false; width * height],
        }
    }

    fn is_visited(&self, p: TracePoint) -> bool {
        self.visited[p.y as usize * self.width + p.x as usize]
    }

    fn mark(&mut self, p: TracePoint) {
        self.visited[p.y as usize * self.width + p.x as usize] = true;
    }
}

/// Extracts ordered boundary traces from a binary raster.
pub struct ContourTracer<'a> {
    raster: &'a BinaryRaster,
}

impl<'a> ContourTracer<'a> {
    pub fn new(raster: &'a BinaryRaster) -> Self {
        Self { raster }
    }

    /// A boundary pixel is an on pixel with at least one off or
    /// out-of-bounds 4-connected neighbor. Off pixels are never boundary
    /// pixels.
    pub fn is_boundary_pixel(&self, x: i32, y: i32) -> bool {
        if !self.raster.is_set(x, y) {
            return false;
        }
        NEIGHBORS_4
            .iter()
            .any(|&(dx, dy)| !self.raster.is_set(x + dx, y + dy))
    }

    /// Scans the raster in row-major order and walks a trace from every on,
    /// unvisited boundary pixel. Deterministic for a fixed raster.
    pub fn trace_all(&self) -> Vec<Trace> {
        let mut visited = VisitedMask::new(self.raster.width(), self.raster.height());
        let mut traces = Vec::new();

        for y in 0..self.raster.height() as i32 {
            for x in 0..self.raster.width() as i32 {
                let start = TracePoint::new(x, y);
                if !self.raster.is_set(x, y) || visited.is_visited(start) {
                    continue;
                }
                if !self.is_boundary_pixel(x, y) {
                    continue;
                }

                let points = self.walk_from(start, &mut visited);
                if points.len() >= MIN_TRACE_LEN {
                    traces.push(Trace { points });
                }
            }
        }

        debug!(
            traces = traces.len(),
            pixels = self.raster.count_set(),
            "contour tracing complete"
        );
        traces
    }

    /// Walks a single trace starting at `start`. The neighbor search resumes
    /// from the previously used direction index, wrapping modulo 8, and
    /// admits the first in-bounds, on, unvisited boundary pixel. The walk
    /// ends when no neighbor is admissible or it returns to the start point.
    fn walk_from(&self, start: TracePoint, visited: &mut VisitedMask) -> Vec<TracePoint> {
        let mut points = vec![start];
        visited.mark(start);

        let mut prev_direction = 0;
        let mut current = start;

        loop {
            let mut found_next = false;

            for i in 0..NEIGHBORS_8.len() {
                let direction = (prev_direction + i) % NEIGHBORS_8.len();
                let (dx, dy) = NEIGHBORS_8[direction];
                let next = TracePoint::new(current.x + dx, current.y + dy);

                if self.raster.is_set(next.x, next.y)
                    && !visited.is_visited(next)
                    && self.is_boundary_pixel(next.x, next.y)
                {
                    points.push(next);
                    visited.mark(next);
                    prev_direction = direction;
                    current = next;
                    found_next = true;
                    break;
                }
            }

            if !found_next || current == start {
                break;
            }
        }

        points
    }
}
