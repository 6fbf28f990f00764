pub mod ai;
pub mod chart;
pub mod config;
pub mod export;
pub mod format;
pub mod render;
pub mod session;
pub mod shell;
pub mod theme;
pub mod types;

#[cfg(any(feature = "desktop", feature = "web", feature = "mobile"))]
pub mod ui;
#[cfg(any(feature = "desktop", feature = "web", feature = "mobile"))]
pub mod views;
