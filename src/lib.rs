#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
mod geometry;
pub mod history;
pub mod input;
pub mod mark;
pub mod panels;
pub mod preview;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod tools;
#[cfg(target_arch = "wasm32")]
mod web;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use error::{ConfigError, ExportError};
pub use event::{EventBus, EventHandler, SketchEvent};
pub use export::Exporter;
pub use history::HistoryStore;
pub use input::{InputHandler, PointerEvent};
pub use mark::{GlyphMark, Mark, MarkRef, StrokeMark};
pub use preview::ToolPreview;
pub use renderer::Renderer;
pub use session::Session;
pub use surface::{DrawOp, PainterSurface, RasterSurface, RecordingSurface, Surface};
pub use tools::{GestureController, GestureState, Tool, ToolSelection};
