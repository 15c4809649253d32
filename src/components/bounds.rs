// src/components/bounds.rs

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::ecs::component::Component;

/// ヒットテスト用の矩形サイズ。`Position` を左上の角として使うよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `origin` に置いたこの矩形の中に `point` が入ってるか。右端と下端は含まない。
    pub fn contains(&self, origin: Position, point: Position) -> bool {
        point.x >= origin.x
            && point.x < origin.x + self.width
            && point.y >= origin.y
            && point.y < origin.y + self.height
    }

    pub fn center(&self, origin: Position) -> Position {
        Position::new(origin.x + self.width / 2.0, origin.y + self.height / 2.0)
    }
}

impl Component for Bounds {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_half_open_edges() {
        let bounds = Bounds::new(10.0, 20.0);
        let origin = Position::new(5.0, 5.0);
        assert!(bounds.contains(origin, Position::new(5.0, 5.0)));
        assert!(bounds.contains(origin, Position::new(14.9, 24.9)));
        assert!(!bounds.contains(origin, Position::new(15.0, 10.0)));
        assert!(!bounds.contains(origin, Position::new(4.9, 10.0)));
        assert_eq!(bounds.center(origin), Position::new(10.0, 15.0));
    }
}
