pub mod action;
pub mod config;
pub mod effect;
pub mod input;
pub mod keymap;
pub mod logging;
pub mod r#loop;
pub mod reducer;
pub mod registry;
pub mod state;
pub mod ui;
