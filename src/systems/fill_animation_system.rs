// src/systems/fill_animation_system.rs

use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::logic::plate::PlateState;

/// 全部のお皿のフィル表示を 1 フレーム分進めるシステムだよ。
#[derive(Debug, Default)]
pub struct FillAnimationSystem;

impl System for FillAnimationSystem {
    fn run(&mut self, world: &mut World, delta_time: f32) {
        for entity in world.get_all_entities_with_component::<PlateState>() {
            if let Some(plate) = world.get_component_mut::<PlateState>(entity) {
                plate.tick(delta_time);
            }
        }
    }
}
