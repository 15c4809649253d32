// src/components/draggable.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

pub const DEFAULT_DRAG_ALPHA: f32 = 0.7;

/// ドラッグできるエンティティに付けるマーカー兼設定。
/// `drag_alpha` はドラッグ中の不透明度 (0..1)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Draggable {
    pub drag_alpha: f32,
}

impl Draggable {
    pub fn new(drag_alpha: f32) -> Self {
        Self {
            drag_alpha: drag_alpha.clamp(0.0, 1.0),
        }
    }
}

impl Default for Draggable {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_ALPHA)
    }
}

impl Component for Draggable {}
