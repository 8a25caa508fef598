// Domain models

mod aggregate;
mod sample;
mod stats;

pub use aggregate::Aggregate;
pub use sample::Sample;
pub use stats::{StatsMethod, StatsReport, Totals, WindowSet, WindowStats};
