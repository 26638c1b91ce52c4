use std::cell::Cell;
use std::rc::Rc;

use egui::{Key, KeyboardShortcut, Modifiers};

use crate::config::SketchConfig;
use crate::event::SketchEvent;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::session::Session;

pub const APP_NAME: &str = "Drawing & Emoticons";

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_SHORTCUT_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// The sketch pad UI. Holds the session plus the bits of widget state the
/// panels need between frames. Nothing here is persisted.
pub struct SketchApp {
    pub(crate) session: Session,
    pub(crate) input: Option<InputHandler>,
    /// Label of the pen preset last clicked, for the feedback line
    pub(crate) pen_label: Option<String>,
    pub(crate) hue: f32,
    pub(crate) custom_glyph_prompt: Option<String>,
    /// Result of the last export, shown under the canvas
    pub(crate) status_message: Option<String>,
    /// Kept current by a drawing-changed subscriber
    mark_count: Rc<Cell<usize>>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_config(SketchConfig::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: SketchConfig) -> Self {
        let session = Session::new(config);

        let mark_count = Rc::new(Cell::new(0));
        let counter = mark_count.clone();
        session.subscribe(move |event: &SketchEvent| {
            if let SketchEvent::DrawingChanged { marks } = event {
                counter.set(marks.len());
            }
        });

        Self {
            session,
            input: None,
            pen_label: None,
            hue: 0.0,
            custom_glyph_prompt: None,
            status_message: None,
            mark_count,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn mark_count(&self) -> usize {
        self.mark_count.get()
    }

    pub fn undo(&mut self) {
        self.session.undo();
    }

    pub fn redo(&mut self) {
        self.session.redo();
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    pub fn select_pen_preset(&mut self, index: usize) {
        if self.session.select_pen_preset(index) {
            self.pen_label = self.session.config().pen_presets.get(index).map(|p| p.label.clone());
        }
    }

    /// Export the committed marks and record the outcome in the status line
    pub fn export(&mut self) {
        self.status_message = Some(match self.export_inner() {
            Ok(message) => message,
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {err}")
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export_inner(&self) -> Result<String, crate::ExportError> {
        let dir = std::env::current_dir()?;
        let path = self.session.export_to_dir(&dir)?;
        Ok(format!("Saved {}", path.display()))
    }

    #[cfg(target_arch = "wasm32")]
    fn export_inner(&self) -> Result<String, crate::ExportError> {
        let bytes = self.session.export_png()?;
        let file_name = self.session.export_file_name();
        crate::web::download_png(&bytes, file_name)?;
        self.session.notify_exported(bytes.len());
        Ok(format!("Downloaded {file_name}"))
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // The prompt's text field owns undo/redo while it is open
        if self.custom_glyph_prompt.is_some() {
            return;
        }

        // Check the shifted variant first, plain Cmd+Z would match it too
        let (redo, undo) = ctx.input_mut(|i| {
            let redo = i.consume_shortcut(&REDO_SHORTCUT) || i.consume_shortcut(&REDO_SHORTCUT_ALT);
            let undo = i.consume_shortcut(&UNDO_SHORTCUT);
            (redo, undo)
        });

        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
