mod analyze;
pub mod model;
mod render;

pub use analyze::analyze;
pub use render::print_report;
