//! Presentation-side chart model.
//!
//! - `state`: selected countries, legend colors, hover lookups
//! - `scale`: date and logarithmic axis mapping
//! - `palette`: categorical colors

pub mod palette;
pub mod scale;
pub mod state;

pub use scale::{LogScale, TimeScale};
pub use state::{ChartState, HoverReading, HoverReadout, Selection, pick_color_index};
