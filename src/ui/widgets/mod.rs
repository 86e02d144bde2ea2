//! UI widgets for displaying telemetry data.

pub mod chart;
pub mod env_chart;
pub mod help;
pub mod markers;
pub mod readings;
pub mod soil_chart;
pub mod status_bar;

pub use env_chart::{render_env_chart, EnvChart};
pub use help::render_help;
pub use readings::render_readings;
pub use soil_chart::{render_soil_chart, SoilChart};
pub use status_bar::render_status_bar;
