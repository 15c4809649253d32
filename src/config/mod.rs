// src/config/mod.rs
//! 画面レイアウトの定数と、JSON から読み込む実行時設定。

pub mod layout;
pub mod settings;

pub use settings::{
    DragConfig, FillMethod, FillOrigin, GameSettings, GaugeConfig, PlateConfig, SceneConfig,
    TrayConfig,
};
