pub mod dashboard;
pub mod footer;
pub mod header;
pub mod modals;
