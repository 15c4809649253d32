// src/components/dragging_info.rs

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// ドラッグ中の食材に関する情報を表すコンポーネントだよ！🖱️➡️🍅
///
/// ドラッグ開始時に付いて、ドラッグ終了時に必ず外れる。
/// つまり「これが付いてる = ドラッグ中」って意味になるんだ。
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DraggingInfo {
    /// ドラッグ開始前の位置。戻す時に使う。
    pub original_position: Position,
    /// ドラッグ開始前に入っていたコンテナ
    pub original_container: Entity,
    /// ドラッグ開始前の不透明度
    pub original_opacity: f32,
}

impl Component for DraggingInfo {}
