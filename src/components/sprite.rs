// src/components/sprite.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 見た目に関する情報。色と不透明度と「レイキャストに当たるか」フラグを持つよ。
///
/// `raycast_target` が false の間は、ヒットテストがこのエンティティを素通りする。
/// ドラッグ中の食材は自分自身でお皿の判定を邪魔しないように false になるんだ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// CSS の色文字列 ("#e74c3c" とか)
    pub color: String,
    pub opacity: f32,
    pub raycast_target: bool,
}

impl Sprite {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            opacity: 1.0,
            raycast_target: true,
        }
    }
}

impl Component for Sprite {}
