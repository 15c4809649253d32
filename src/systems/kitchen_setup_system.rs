// src/systems/kitchen_setup_system.rs

use itertools::Itertools;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{
    Bounds, Container, ContainerTree, Draggable, Ingredient, IngredientKind, Position, Sprite,
};
use crate::config::layout::*;
use crate::config::GameSettings;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::logic::plate::{PlateState, SceneLink};

/// セットアップで作ったエンティティたち。ホストはこれを覚えておくよ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenLayout {
    pub kitchen: Entity,
    pub tray: Entity,
    pub overlay: Entity,
    pub plate: Entity,
    pub ingredients: Vec<Entity>,
}

/// キッチンのシーンを組み立てるシステム。
/// コンテナ 3 つ (キッチン・トレイ・オーバーレイ)、お皿 1 枚、トレイに並んだ食材を作るよ。
#[derive(Debug, Default)]
pub struct KitchenSetupSystem;

impl KitchenSetupSystem {
    /// 食材の並び順は `rng` でシャッフルする。テストではシード付きの rng を渡してね。
    pub fn execute<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        settings: &GameSettings,
        scene: SceneLink,
        rng: &mut R,
    ) -> KitchenLayout {
        let kitchen = spawn_container(world, "kitchen", KITCHEN_LAYER);
        let tray = spawn_container(world, "tray", TRAY_LAYER);
        let overlay = spawn_container(world, "overlay", OVERLAY_LAYER);

        let plate = world.create_entity();
        world.add_component(plate, Position::new(PLATE_POS_X, PLATE_POS_Y));
        world.add_component(plate, Bounds::new(PLATE_WIDTH, PLATE_HEIGHT));
        world.add_component(plate, Sprite::new("#bdc3c7"));
        world.add_component(plate, PlateState::new(&settings.plate, scene));
        world.reparent(plate, kitchen);

        let mut kinds = IngredientKind::ALL
            .iter()
            .copied()
            .cycle()
            .take(settings.tray.ingredient_count)
            .collect_vec();
        kinds.shuffle(rng);

        let ingredients = kinds
            .into_iter()
            .enumerate()
            .map(|(slot, kind)| spawn_ingredient(world, tray, slot, kind, settings.drag.drag_alpha))
            .collect_vec();

        info!(
            "KitchenSetupSystem: plate {} ready, {} ingredients on the tray",
            plate,
            ingredients.len()
        );

        KitchenLayout {
            kitchen,
            tray,
            overlay,
            plate,
            ingredients,
        }
    }
}

fn spawn_container(world: &mut World, name: &str, layer: i32) -> Entity {
    let entity = world.create_entity();
    world.add_component(entity, Container::new(name, layer));
    entity
}

fn spawn_ingredient(
    world: &mut World,
    tray: Entity,
    slot: usize,
    kind: IngredientKind,
    drag_alpha: f32,
) -> Entity {
    let (x, y) = tray_slot_position(slot);
    let entity = world.create_entity();
    world.add_component(entity, Position::new(x, y));
    world.add_component(entity, Bounds::new(INGREDIENT_SIZE, INGREDIENT_SIZE));
    world.add_component(entity, Sprite::new(kind.color()));
    world.add_component(entity, Draggable::new(drag_alpha));
    world.add_component(entity, Ingredient { kind });
    world.reparent(entity, tray);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::scene::SceneDirector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    fn build(settings: &GameSettings, seed: u64) -> (World, KitchenLayout) {
        let director = Arc::new(Mutex::new(SceneDirector::from_config(&settings.scenes)));
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = KitchenSetupSystem.execute(&mut world, settings, SceneLink::new(director), &mut rng);
        (world, layout)
    }

    #[test]
    fn spawns_plate_and_ingredients_in_their_containers() {
        let settings = GameSettings::default();
        let (world, layout) = build(&settings, 7);

        assert_eq!(layout.ingredients.len(), settings.tray.ingredient_count);
        assert_eq!(world.container_of(layout.plate), Some(layout.kitchen));
        assert!(world.has_component::<PlateState>(layout.plate));
        for (slot, &item) in layout.ingredients.iter().enumerate() {
            assert_eq!(world.container_of(item), Some(layout.tray));
            let (x, y) = tray_slot_position(slot);
            assert_eq!(world.get_component::<Position>(item), Some(&Position::new(x, y)));
            assert_eq!(world.get_component::<Draggable>(item), Some(&Draggable::new(0.7)));
        }
    }

    #[test]
    fn same_seed_gives_same_tray_order() {
        let settings = GameSettings::default();
        let kinds = |seed| {
            let (world, layout) = build(&settings, seed);
            layout
                .ingredients
                .iter()
                .map(|&e| world.get_component::<Ingredient>(e).unwrap().kind)
                .collect_vec()
        };
        assert_eq!(kinds(42), kinds(42));
    }

    #[test]
    fn every_kind_appears_when_tray_is_big_enough() {
        let mut settings = GameSettings::default();
        settings.tray.ingredient_count = 5;
        let (world, layout) = build(&settings, 3);
        let mut kinds = layout
            .ingredients
            .iter()
            .map(|&e| world.get_component::<Ingredient>(e).unwrap().kind.label())
            .collect_vec();
        kinds.sort();
        assert_eq!(kinds, vec!["bread", "cheese", "egg", "lettuce", "tomato"]);
    }

    #[test]
    fn overlay_is_drawn_above_everything() {
        let (world, layout) = build(&GameSettings::default(), 1);
        let overlay_layer = world.get_component::<Container>(layout.overlay).unwrap().layer;
        let tray_layer = world.get_component::<Container>(layout.tray).unwrap().layer;
        let kitchen_layer = world.get_component::<Container>(layout.kitchen).unwrap().layer;
        assert!(overlay_layer > tray_layer && overlay_layer > kitchen_layer);
    }
}
