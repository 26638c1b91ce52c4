use std::path::PathBuf;

use crate::mark::MarkRef;
use crate::tools::Tool;

#[derive(Debug, Clone)]
pub enum SketchEvent {
    /// Fired after every change to the committed marks or the in-progress
    /// gesture, carrying the committed marks in draw order
    DrawingChanged { marks: Vec<MarkRef> },
    ToolChanged { tool: Tool },
    /// A PNG was written (native) or handed to the browser (web)
    Exported { path: PathBuf, bytes: usize },
}

impl SketchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DrawingChanged { .. } => "drawing-changed",
            Self::ToolChanged { .. } => "tool-changed",
            Self::Exported { .. } => "exported",
        }
    }
}
