//! Toolpath assembly: fitted segments to ordered motion commands.
//!
//! Each trace becomes one toolpath: a rapid positioning move to the trace's
//! first point followed by one command per fitted segment. Trace points are
//! scaled into output units before fitting, so both the arc tolerance and
//! the resulting commands are expressed in machine coordinates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arcfit::{ArcFitter, Point, SegmentType};
use crate::trace::Trace;

/// One motion instruction in output coordinates. Command order within a
/// toolpath is the draw order and is preserved exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolpathCommand {
    /// Rapid positioning move (pen up).
    RapidMove { x: f64, y: f64 },
    /// Straight drawing move.
    LinearMove { x: f64, y: f64 },
    /// Circular drawing move. `i`/`j` are the arc center relative to the
    /// move's start point.
    ArcMove {
        x: f64,
        y: f64,
        i: f64,
        j: f64,
        clockwise: bool,
    },
}

/// Ordered motion-command sequence for one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolpath {
    pub commands: Vec<ToolpathCommand>,
}

impl Toolpath {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Parameters for toolpath generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathParameters {
    /// Pixel to machine unit scale.
    pub scale: f64,
    /// Maximum allowable radial deviation for arc fitting, in output units.
    pub arc_tolerance: f64,
}

impl Default for ToolpathParameters {
    fn default() -> Self {
        Self {
            scale: 1.0,
            arc_tolerance: 1.0,
        }
    }
}

/// Converts traces into toolpaths via arc fitting.
#[derive(Debug, Clone)]
pub struct ToolpathGenerator {
    params: ToolpathParameters,
}

impl ToolpathGenerator {
    pub fn new(params: ToolpathParameters) -> Self {
        Self { params }
    }

    /// Generates one toolpath per trace, in trace order.
    pub fn generate(&self, traces: &[Trace]) -> Vec<Toolpath> {
        let fitter = ArcFitter::new(self.params.arc_tolerance);
        let toolpaths: Vec<Toolpath> = traces
            .iter()
            .map(|trace| self.toolpath_for(trace, &fitter))
            .collect();

        debug!(
            toolpaths = toolpaths.len(),
            commands = toolpaths.iter().map(Toolpath::len).sum::<usize>(),
            "toolpath generation complete"
        );
        toolpaths
    }

    fn toolpath_for(&self, trace: &Trace, fitter: &ArcFitter) -> Toolpath {
        let scaled: Vec<Point> = trace
            .points
            .iter()
            .map(|p| {
                Point::new(
                    f64::from(p.x) * self.params.scale,
                    f64::from(p.y) * self.params.scale,
                )
            })
            .collect();

        let mut commands = Vec::new();
        if let Some(first) = scaled.first() {
            commands.push(ToolpathCommand::RapidMove {
                x: first.x,
                y: first.y,
            });
        }

        for segment in fitter.fit(&scaled) {
            let command = match segment.segment_type {
                SegmentType::Line => ToolpathCommand::LinearMove {
                    x: segment.end.x,
                    y: segment.end.y,
                },
                SegmentType::ArcCW | SegmentType::ArcCCW => {
                    // Fit always attaches a center to arc segments.
                    let center = segment.center.unwrap_or(segment.start);
                    ToolpathCommand::ArcMove {
                        x: segment.end.x,
                        y: segment.end.y,
                        i: center.x - segment.start.x,
                        j: center.y - segment.start.y,
                        clockwise: segment.segment_type == SegmentType::ArcCW,
                    }
                }
            };
            commands.push(command);
        }

        Toolpath { commands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TracePoint;

    fn trace_of(points: &[(i32, i32)]) -> Trace {
        Trace {
            points: points.iter().map(|&(x, y)| TracePoint::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_toolpath_leads_with_rapid_to_first_point() {
        let traces = vec![trace_of(&[(2, 3), (3, 3), (4, 3), (5, 3)])];
        let toolpaths = ToolpathGenerator::new(ToolpathParameters::default()).generate(&traces);
        assert_eq!(toolpaths.len(), 1);
        assert_eq!(
            toolpaths[0].commands[0],
            ToolpathCommand::RapidMove { x: 2.0, y: 3.0 }
        );
    }

    #[test]
    fn test_scale_applies_before_fitting() {
        let params = ToolpathParameters {
            scale: 0.5,
            arc_tolerance: 1.0,
        };
        let traces = vec![trace_of(&[(0, 0), (2, 0), (4, 0)])];
        let toolpaths = ToolpathGenerator::new(params).generate(&traces);
        let commands = &toolpaths[0].commands;
        assert_eq!(commands[0], ToolpathCommand::RapidMove { x: 0.0, y: 0.0 });
        // Collinear points cannot be fit: single-step lines at scaled coords.
        assert_eq!(commands[1], ToolpathCommand::LinearMove { x: 1.0, y: 0.0 });
        assert_eq!(commands[2], ToolpathCommand::LinearMove { x: 2.0, y: 0.0 });
    }

    #[test]
    fn test_arc_offsets_are_relative_to_segment_start() {
        // Quarter-ish arc on a circle centered at (1, 0) through integer
        // points (0,0), (1,1), (2,0): radius 1.
        let traces = vec![trace_of(&[(0, 0), (1, 1), (2, 0)])];
        let params = ToolpathParameters {
            scale: 1.0,
            arc_tolerance: 0.1,
        };
        let toolpaths = ToolpathGenerator::new(params).generate(&traces);
        let commands = &toolpaths[0].commands;
        assert_eq!(commands.len(), 2);
        match commands[1] {
            ToolpathCommand::ArcMove {
                x,
                y,
                i,
                j,
                clockwise,
            } => {
                assert!((x - 2.0).abs() < 1e-9);
                assert!(y.abs() < 1e-9);
                // Center (1, 0) relative to start (0, 0).
                assert!((i - 1.0).abs() < 1e-9);
                assert!(j.abs() < 1e-9);
                // (0,0) -> (1,1) -> (2,0) turns clockwise.
                assert!(clockwise);
            }
            ref other => panic!("expected ArcMove, got {:?}", other),
        }
    }

    #[test]
    fn test_one_toolpath_per_trace_in_order() {
        let traces = vec![
            trace_of(&[(0, 0), (1, 0), (2, 0)]),
            trace_of(&[(0, 5), (1, 5), (2, 5)]),
        ];
        let toolpaths = ToolpathGenerator::new(ToolpathParameters::default()).generate(&traces);
        assert_eq!(toolpaths.len(), 2);
        assert_eq!(toolpaths[0].commands[0], ToolpathCommand::RapidMove { x: 0.0, y: 0.0 });
        assert_eq!(toolpaths[1].commands[0], ToolpathCommand::RapidMove { x: 0.0, y: 5.0 });
    }
}
