// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// Entity はゲームに登場する「モノ」を表すただの ID だよ！
///
/// 食材アイコン、お皿、トレイやオーバーレイみたいなコンテナも全部エンティティ。
/// ID だけだと意味はなくて、コンポーネントと組み合わせて初めて
/// 「ID 3 はトマトで、座標 (120, 40) にあって、トレイに入ってる」みたいな意味になるんだ。
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
pub struct Entity(pub usize);

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
