// src/components/ingredient.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 食材の種類。描画の色とラベルに使うだけで、ロジックには関係ないよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientKind {
    Tomato,
    Lettuce,
    Cheese,
    Bread,
    Egg,
}

impl IngredientKind {
    pub const ALL: [IngredientKind; 5] = [
        IngredientKind::Tomato,
        IngredientKind::Lettuce,
        IngredientKind::Cheese,
        IngredientKind::Bread,
        IngredientKind::Egg,
    ];

    pub fn color(self) -> &'static str {
        match self {
            IngredientKind::Tomato => "#e74c3c",
            IngredientKind::Lettuce => "#2ecc71",
            IngredientKind::Cheese => "#f1c40f",
            IngredientKind::Bread => "#d35400",
            IngredientKind::Egg => "#ecf0f1",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IngredientKind::Tomato => "tomato",
            IngredientKind::Lettuce => "lettuce",
            IngredientKind::Cheese => "cheese",
            IngredientKind::Bread => "bread",
            IngredientKind::Egg => "egg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub kind: IngredientKind,
}

impl Component for Ingredient {}
