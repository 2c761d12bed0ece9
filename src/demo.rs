//! src/demo.rs
//!
//! Customization screen: control definitions, bound values, and the screen
//! that ties them to the plot.

pub mod controls;
pub mod screen;
pub mod state;

pub use controls::ControlId;
pub use screen::DemoScreen;
pub use state::DemoState;
