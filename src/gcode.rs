//! G-code rendering for pen plotters.
//!
//! Renders toolpaths into textual G-code: G0/G1 moves, G2/G3 arcs with I/J
//! center offsets, and a pen-up/pen-down bracket around each toolpath. The
//! output is fully determined by the toolpaths and parameters; reruns on
//! identical input produce byte-identical files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PlotCamResult;
use crate::toolpath::{Toolpath, ToolpathCommand};

/// Parameters for G-code rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeParameters {
    /// Feed rate for drawing moves (mm/min).
    pub feed_rate: f64,
    /// Command that lifts the pen off the paper.
    pub pen_up: String,
    /// Command that lowers the pen onto the paper. The default S value is
    /// the servo angle that reaches the paper on the reference machine.
    pub pen_down: String,
}

impl Default for GcodeParameters {
    fn default() -> Self {
        Self {
            feed_rate: 500.0,
            pen_up: "M3".to_string(),
            pen_down: "M5 S20".to_string(),
        }
    }
}

/// Renders toolpaths into a G-code program.
pub struct GcodeGenerator {
    params: GcodeParameters,
}

impl GcodeGenerator {
    pub fn new(params: GcodeParameters) -> Self {
        Self { params }
    }

    /// Generates the complete G-code program for the given toolpaths.
    pub fn generate(&self, toolpaths: &[Toolpath]) -> String {
        let mut gcode = String::new();
        self.generate_header(&mut gcode);
        for toolpath in toolpaths {
            self.generate_toolpath(&mut gcode, toolpath);
        }
        self.generate_footer(&mut gcode);
        gcode
    }

    /// Generates G-code and writes it to `path`.
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        toolpaths: &[Toolpath],
        path: P,
    ) -> PlotCamResult<()> {
        let gcode = self.generate(toolpaths);
        fs::write(path.as_ref(), &gcode)?;
        info!(
            path = %path.as_ref().display(),
            lines = gcode.lines().count(),
            "wrote G-code"
        );
        Ok(())
    }

    fn generate_header(&self, gcode: &mut String) {
        gcode.push_str("; G-code generated from image by plotcam\n");
        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Use absolute positioning\n");
        gcode.push_str(&format!("F{:.1} ; Drawing feed rate\n", self.params.feed_rate));
        gcode.push_str(&self.params.pen_up);
        gcode.push_str(" ; Pen up\n");
        gcode.push_str("G1 X0.000 Y0.000 ; Return to home\n");
    }

    /// Emits one toolpath bracketed by pen control: pen up, rapid to the
    /// start point, pen down, then the drawing moves.
    fn generate_toolpath(&self, gcode: &mut String, toolpath: &Toolpath) {
        for (index, command) in toolpath.commands.iter().enumerate() {
            if index == 0 {
                gcode.push_str(&self.params.pen_up);
                gcode.push('\n');
            } else if index == 1 {
                gcode.push_str(&self.params.pen_down);
                gcode.push('\n');
            }
            gcode.push_str(&Self::format_command(command));
            gcode.push('\n');
        }
    }

    fn generate_footer(&self, gcode: &mut String) {
        gcode.push_str(&self.params.pen_up);
        gcode.push_str(" ; Pen up\n");
        gcode.push_str("G1 X0.000 Y0.000 ; Return to home\n");
        gcode.push_str("M2 ; End the program\n");
    }

    /// Formats one motion command with fixed 3-decimal coordinates.
    fn format_command(command: &ToolpathCommand) -> String {
        match command {
            ToolpathCommand::RapidMove { x, y } => format!("G0 X{:.3} Y{:.3}", x, y),
            ToolpathCommand::LinearMove { x, y } => format!("G1 X{:.3} Y{:.3}", x, y),
            ToolpathCommand::ArcMove {
                x,
                y,
                i,
                j,
                clockwise,
            } => {
                let cmd = if *clockwise { "G2" } else { "G3" };
                format!("{} X{:.3} Y{:.3} I{:.3} J{:.3}", cmd, x, y, i, j)
            }
        }
    }
}
