// src/components/position.rs

use std::ops::{Add, AddAssign, Div, Sub};

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 2D 空間での位置 (x, y) を表すコンポーネントだよ！📍
///
/// キャンバス座標 (左上原点、y は下向き) で持ってる。どのコンテナに入っていても
/// 同じ座標系なので、親を付け替えても見た目の位置は変わらないんだ。
/// ポインタの移動量 (delta) もこの型で表すよ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f32> for Position {
    type Output = Position;

    fn div(self, rhs: f32) -> Position {
        Position::new(self.x / rhs, self.y / rhs)
    }
}

impl Component for Position {}
