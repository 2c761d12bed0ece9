//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod controls;
pub mod help;
pub mod indicator;
pub mod plot;
pub mod shade;
pub mod title;

pub use controls::ControlsPanel;
pub use help::HelpPanel;
pub use plot::{InteractiveLinePlot, PlotProps};
pub use title::TitlePanel;
