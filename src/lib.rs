// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod ecs;
pub mod logger;
pub mod logic;
pub mod session;
pub mod systems;

pub use app::GameApp;
pub use config::GameSettings;
pub use logic::{DragController, DropOutcome, PlateState};
pub use session::KitchenSession;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    log::info!("Panic hook and console logger set!");
}
