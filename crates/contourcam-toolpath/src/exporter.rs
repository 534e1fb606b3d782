//! Task export to a G-code program.

use crate::emitter::{EmitReport, EmitterConfig, ToolpathEmitter, UnresolvedArcPolicy};
use crate::error::ToolpathResult;
use crate::gcode::GcodeWriter;
use crate::model::Task;
use contourcam_core::config_dump;
use contourcam_core::{GcodeProfile, Tool};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;
use tracing::info;

/// Export options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prefix the program with the tool and G-code settings as comments
    pub export_config: bool,
    pub unresolved_arc_policy: UnresolvedArcPolicy,
}

/// Summary of an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub emit: EmitReport,
    /// Total lines written, comments included
    pub lines: usize,
}

/// Converts a task into a G-code program for one tool and profile.
#[derive(Debug, Clone)]
pub struct Exporter {
    tool: Tool,
    gcode: GcodeProfile,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(tool: &Tool, gcode: &GcodeProfile, options: ExportOptions) -> Self {
        Self {
            tool: tool.clone(),
            gcode: gcode.clone(),
            options,
        }
    }

    /// Writes the whole program for `task` to `output`.
    pub fn export<W: Write>(&self, task: &Task, mut output: W) -> ToolpathResult<ExportReport> {
        let emitter = ToolpathEmitter::new(
            EmitterConfig::from_tool(&self.tool)
                .with_unresolved_arc_policy(self.options.unresolved_arc_policy),
        )?;

        let mut comment_lines = 0;
        if self.options.export_config {
            let mut comments = Vec::new();
            config_dump::write_comments("tool", &self.tool, &mut comments)?;
            config_dump::write_comments("gcode", &self.gcode, &mut comments)?;
            comment_lines = comments.iter().filter(|byte| **byte == b'\n').count();
            output.write_all(&comments)?;
        }

        let mut writer = GcodeWriter::new(&mut output, &self.gcode, self.tool.general.retract_depth);
        writer.write_header()?;
        let emit = emitter.emit_task(task, &mut writer)?;
        writer.write_footer()?;

        let report = ExportReport {
            lines: comment_lines + writer.lines(),
            emit,
        };
        info!(
            lines = report.lines,
            paths = report.emit.paths_emitted,
            issues = report.emit.issues.len(),
            "Exported G-code"
        );
        Ok(report)
    }

    /// Exports `task` into a string.
    pub fn export_to_string(&self, task: &Task) -> ToolpathResult<String> {
        let mut buffer = Vec::new();
        self.export(task, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Exports `task` into the file at `path`, replacing it.
    pub fn export_to_file(&self, task: &Task, path: &FsPath) -> ToolpathResult<ExportReport> {
        let file = File::create(path)?;
        let mut output = BufWriter::new(file);
        let report = self.export(task, &mut output)?;
        output.flush()?;
        Ok(report)
    }
}
