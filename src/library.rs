//! Library scanning and the scanned library model.

mod model;
mod scan;

pub use model::Library;
pub use scan::scan;
