//! UI layer for the desktop GUI: the eframe app shell and its panels.

pub mod app;
pub mod panels;

pub use app::DesktopGuiApp;
