pub mod command_palette;
pub mod helpers;
pub mod manager;

pub use command_palette::CommandPaletteModal;
pub use manager::ModalManager;
