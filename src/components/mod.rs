// src/components/mod.rs

// この components モジュールに属するサブモジュールたち！
// データだけを持つ素朴なコンポーネントをここにまとめてるよ。
pub mod bounds;
pub mod draggable;
pub mod dragging_info;
pub mod hierarchy;
pub mod ingredient;
pub mod position;
pub mod sprite;

pub use bounds::Bounds;
pub use draggable::Draggable;
pub use dragging_info::DraggingInfo;
pub use hierarchy::{Container, ContainerTree, Parent, SiblingIndex};
pub use ingredient::{Ingredient, IngredientKind};
pub use position::Position;
pub use sprite::Sprite;
