// src/systems/mod.rs

pub mod fill_animation_system;
pub mod kitchen_setup_system;

pub use fill_animation_system::FillAnimationSystem;
pub use kitchen_setup_system::{KitchenLayout, KitchenSetupSystem};
