// src/config/layout.rs
//! ゲーム画面のレイアウトに関する定数を定義するよ！
//! 食材アイコンやお皿の座標、サイズなど。

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const INGREDIENT_SIZE: f32 = 72.0; // 食材アイコンの一辺
pub const TRAY_START_X: f32 = 40.0; // トレイの最初のスロットの X
pub const TRAY_START_Y: f32 = 480.0; // トレイの Y
pub const TRAY_SLOT_SPACING: f32 = 96.0; // スロット間の間隔

pub const PLATE_POS_X: f32 = 300.0; // お皿の左上 X
pub const PLATE_POS_Y: f32 = 120.0; // お皿の左上 Y
pub const PLATE_WIDTH: f32 = 200.0;
pub const PLATE_HEIGHT: f32 = 200.0;

// コンテナのレイヤー。オーバーレイは常に一番手前。
pub const KITCHEN_LAYER: i32 = 0;
pub const TRAY_LAYER: i32 = 1;
pub const OVERLAY_LAYER: i32 = 100;

/// トレイの `slot` 番目の左上座標
pub fn tray_slot_position(slot: usize) -> (f32, f32) {
    (TRAY_START_X + slot as f32 * TRAY_SLOT_SPACING, TRAY_START_Y)
}
