pub mod autopilot;
pub mod logging;
pub mod render;
pub mod rules_file;
