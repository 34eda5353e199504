//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the root folder, library,
//! playlist and the prompt/dialog state layered over them.

mod model;
mod pick;

pub use model::*;
