pub mod compositor;
pub mod logging;
pub mod overlay;
pub mod settings;
pub mod shortcut;
pub mod state;
pub mod suspend;
