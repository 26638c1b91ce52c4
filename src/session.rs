//! The sketching session: one explicit context object that owns the history,
//! the tool selection, the gesture controller and the event bus.
//!
//! Every mutating operation emits [`SketchEvent::DrawingChanged`] when it
//! changes what is visible. Redrawing is the caller's job; [`Session::redraw`]
//! repaints any [`Surface`] from the current model.

use std::path::{Path, PathBuf};

use egui::{Color32, Pos2};
use log::info;

use crate::config::SketchConfig;
use crate::error::ExportResult;
use crate::event::{EventBus, EventHandler, SketchEvent};
use crate::export::Exporter;
use crate::history::HistoryStore;
use crate::input::PointerEvent;
use crate::mark::MarkRef;
use crate::renderer::Renderer;
use crate::surface::Surface;
use crate::tools::{GestureController, ToolSelection};

#[derive(Debug)]
pub struct Session {
    config: SketchConfig,
    history: HistoryStore,
    tools: ToolSelection,
    gesture: GestureController,
    renderer: Renderer,
    exporter: Exporter,
    event_bus: EventBus,
    /// Glyphs entered by the user, in entry order
    custom_glyphs: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl Session {
    pub fn new(config: SketchConfig) -> Self {
        Self {
            history: HistoryStore::new(),
            tools: ToolSelection::new(config.default_pen_width, Color32::BLACK, config.glyph_size),
            gesture: GestureController::new(config.glyph_offset()),
            renderer: Renderer::new(),
            exporter: Exporter::from_config(&config),
            event_bus: EventBus::new(),
            custom_glyphs: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn tools(&self) -> &ToolSelection {
        &self.tools
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// Register an observer for session events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(handler);
    }

    /// Committed marks in draw order
    pub fn snapshot(&self) -> Vec<MarkRef> {
        self.history.snapshot()
    }

    /// Built-in glyphs followed by user-entered ones
    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.config
            .glyphs
            .iter()
            .chain(self.custom_glyphs.iter())
            .map(String::as_str)
    }

    fn notify_drawing_changed(&self) {
        self.event_bus.emit(SketchEvent::DrawingChanged {
            marks: self.history.snapshot(),
        });
    }

    fn notify_tool_changed(&self) {
        self.event_bus.emit(SketchEvent::ToolChanged {
            tool: self.tools.active_tool(),
        });
    }

    // --- Pointer input ---

    /// Feed one pointer event through the gesture controller.
    /// Returns true if the canvas needs a redraw.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up(_) => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> bool {
        let changed = self.gesture.pointer_down(pos, &self.tools, &mut self.history);
        if changed {
            self.notify_drawing_changed();
        }
        changed
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        let drawing = !self.gesture.is_idle();
        let changed = self.gesture.pointer_move(pos, &self.tools, &mut self.history);
        if drawing {
            self.notify_drawing_changed();
        }
        changed
    }

    pub fn pointer_up(&mut self) -> bool {
        let committed = self.gesture.pointer_up(&mut self.history).is_some();
        if committed {
            self.notify_drawing_changed();
        }
        committed
    }

    pub fn pointer_leave(&mut self) -> bool {
        let (committed, changed) = self.gesture.pointer_leave(&mut self.history);
        if committed.is_some() {
            self.notify_drawing_changed();
        }
        changed
    }

    // --- Tool selection ---

    pub fn select_pen(&mut self, width: f32, color: Color32) -> bool {
        let selected = self.tools.select_pen(width, color);
        if selected {
            info!("Selected pen: width {} color {:?}", width, color);
            self.notify_tool_changed();
        }
        selected
    }

    /// Select a pen preset from the config by index
    pub fn select_pen_preset(&mut self, index: usize) -> bool {
        let Some(preset) = self.config.pen_presets.get(index) else {
            log::warn!("No pen preset at index {}", index);
            return false;
        };
        let (width, color) = (preset.width, preset.color32());
        self.select_pen(width, color)
    }

    pub fn set_pen_hue(&mut self, hue_degrees: f32) {
        self.tools.set_pen_hue(hue_degrees);
        self.notify_tool_changed();
    }

    pub fn select_glyph(&mut self, glyph: &str) -> bool {
        let selected = self.tools.select_glyph(glyph);
        if selected {
            info!("Selected glyph {}", glyph.trim());
            self.notify_tool_changed();
        }
        selected
    }

    /// Select free-text entered by the user. A blank entry (or a cancelled
    /// prompt) leaves the current tool unchanged; a new glyph is remembered
    /// so the UI can offer it as a button.
    pub fn select_custom_glyph(&mut self, input: &str) -> bool {
        if !self.select_glyph(input) {
            return false;
        }

        let glyph = input.trim();
        if !self.glyphs().any(|known| known == glyph) {
            self.custom_glyphs.push(glyph.to_owned());
        }
        true
    }

    // --- Commands ---

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            info!("Undo ({} marks left)", self.history.len());
            self.notify_drawing_changed();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            info!("Redo ({} marks)", self.history.len());
            self.notify_drawing_changed();
        }
        redone
    }

    /// Remove every mark, including undone ones. Also drops an open gesture.
    pub fn clear(&mut self) -> bool {
        let cancelled = self.gesture.cancel(&mut self.history);
        let cleared = self.history.clear();
        if cleared || cancelled {
            info!("Cleared drawing");
            self.notify_drawing_changed();
        }
        cleared || cancelled
    }

    /// Repaint the whole canvas from the model
    pub fn redraw(&self, surface: &mut dyn Surface) {
        self.renderer.redraw(surface, &self.history, &self.gesture);
    }

    pub fn export_file_name(&self) -> &str {
        self.exporter.file_name()
    }

    /// Render the committed marks as PNG bytes at export resolution
    pub fn export_png(&self) -> ExportResult<Vec<u8>> {
        self.exporter.render_png(self.history.marks())
    }

    /// Write the export next to the given directory's other files
    pub fn export_to_dir(&self, dir: &Path) -> ExportResult<PathBuf> {
        let (path, bytes) = self.exporter.export_to_dir(self.history.marks(), dir)?;
        self.event_bus.emit(SketchEvent::Exported {
            path: path.clone(),
            bytes,
        });
        Ok(path)
    }

    /// Report an export that was delivered some other way (browser download)
    pub fn notify_exported(&self, bytes: usize) {
        self.event_bus.emit(SketchEvent::Exported {
            path: PathBuf::from(self.exporter.file_name()),
            bytes,
        });
    }
}
