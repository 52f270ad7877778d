//! Input handling: vacancy and resume files on disk

pub mod manager;

pub use manager::InputManager;
