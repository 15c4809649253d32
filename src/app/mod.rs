// src/app/mod.rs
//! ブラウザ側のホスト層。入力イベントを KitchenSession に流して、Canvas に描くだけ。

pub mod browser_event_manager;
pub mod game_app;
pub mod renderer;
pub mod state_getter;

pub use game_app::GameApp;
