// src/session.rs
//! キッチン 1 シーン分のゲーム状態をまとめたもの。
//!
//! ブラウザのことは何も知らないので、ネイティブのテストからそのまま動かせる。
//! `app::game_app::GameApp` はこれを `Arc<Mutex<>>` で包んでイベントを流し込むだけ。

use std::sync::{Arc, Mutex};

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::components::{Draggable, DraggingInfo, Ingredient, IngredientKind, Position};
use crate::config::GameSettings;
use crate::ecs::entity::Entity;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::logic::{
    DragController, DropOutcome, FrameTimer, HitTest, PlateState, SceneDirector, SceneLink,
    SceneRequest, WorldRaycaster,
};
use crate::systems::{FillAnimationSystem, KitchenLayout, KitchenSetupSystem};

/// JS 側のデバッグ表示やテスト用に書き出す、今のキッチンの様子。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenSnapshot {
    pub active_scene: String,
    pub plate: Option<PlateSnapshot>,
    pub ingredients: Vec<IngredientSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSnapshot {
    pub entity: Entity,
    pub ingredient_count: u32,
    pub capacity: u32,
    pub fill_amount: f32,
    pub target_fill: f32,
    pub completed: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSnapshot {
    pub entity: Entity,
    pub kind: IngredientKind,
    pub position: Position,
    pub dragging: bool,
}

pub struct KitchenSession {
    settings: GameSettings,
    world: World,
    timer: FrameTimer,
    director: Arc<Mutex<SceneDirector>>,
    controller: DragController,
    raycaster: WorldRaycaster,
    fill_system: FillAnimationSystem,
    layout: KitchenLayout,
    active_drag: Option<Entity>,
}

impl KitchenSession {
    pub fn new(settings: GameSettings) -> Self {
        let director = Arc::new(Mutex::new(SceneDirector::from_config(&settings.scenes)));
        let (world, layout) = build_kitchen(&settings, &director);
        Self {
            controller: DragController::new(layout.overlay),
            settings,
            world,
            timer: FrameTimer::new(),
            director,
            raycaster: WorldRaycaster,
            fill_system: FillAnimationSystem,
            layout,
            active_drag: None,
        }
    }

    /// キッチンを最初から組み立て直す。予約済みのタイマーは捨てる。
    pub fn restart(&mut self) {
        let (world, layout) = build_kitchen(&self.settings, &self.director);
        self.world = world;
        self.controller = DragController::new(layout.overlay);
        self.layout = layout;
        self.timer = FrameTimer::new();
        self.active_drag = None;
        info!("KitchenSession: restarted with {} entities", self.world.entity_count());
    }

    /// ポインタが押された。下にある一番手前の食材を拾う。拾えた食材を返す。
    pub fn pointer_down(&mut self, point: Position) -> Option<Entity> {
        if let Some(dragging) = self.active_drag {
            info!("KitchenSession: pointer_down while {} is still dragged, ignoring", dragging);
            return None;
        }
        let item = self
            .raycaster
            .raycast_all(&self.world, point)
            .into_iter()
            .find(|&e| self.world.has_component::<Draggable>(e))?;

        if self.controller.begin_drag(&mut self.world, item, point) {
            self.active_drag = Some(item);
            Some(item)
        } else {
            None
        }
    }

    /// ポインタが動いた。`delta` はスクリーン上の移動量、`scale_factor` は DPI などの倍率。
    pub fn pointer_move(&mut self, point: Position, delta: Position, scale_factor: f32) -> bool {
        let Some(item) = self.active_drag else {
            return false;
        };
        let moved = self
            .controller
            .update_drag(&mut self.world, item, delta, scale_factor);
        self.controller
            .refresh_hover(&mut self.world, item, point, &self.raycaster);
        moved
    }

    /// ポインタが離された。ドラッグ中でなければ `NotDragging`。
    pub fn pointer_up(&mut self, point: Position) -> DropOutcome {
        let Some(item) = self.active_drag.take() else {
            return DropOutcome::NotDragging;
        };
        self.controller
            .end_drag(&mut self.world, item, point, &self.raycaster, &mut self.timer)
    }

    /// 1 フレーム進める。フィルのアニメーション → タイマーの順。
    /// ホストが処理すべきシーン遷移があれば返す (今のシーンの開き直しはここで済ませる)。
    pub fn tick(&mut self, delta_time: f32) -> Option<SceneRequest> {
        self.fill_system.run(&mut self.world, delta_time);
        self.timer.advance(delta_time);

        let request = match self.director.lock() {
            Ok(mut director) => director.take_pending(),
            Err(e) => {
                error!("KitchenSession: failed to lock SceneDirector: {}", e);
                None
            }
        }?;
        if request.reload {
            self.restart();
        }
        Some(request)
    }

    pub fn reset_plate(&mut self) {
        if let Some(plate) = self.world.get_component_mut::<PlateState>(self.layout.plate) {
            plate.reset();
        }
    }

    pub fn plate(&self) -> Option<&PlateState> {
        self.world.get_component::<PlateState>(self.layout.plate)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn layout(&self) -> &KitchenLayout {
        &self.layout
    }

    pub fn active_drag(&self) -> Option<Entity> {
        self.active_drag
    }

    pub fn director(&self) -> &Arc<Mutex<SceneDirector>> {
        &self.director
    }

    pub fn snapshot(&self) -> KitchenSnapshot {
        let active_scene = match self.director.lock() {
            Ok(director) => director.active_scene().to_string(),
            Err(poisoned) => poisoned.into_inner().active_scene().to_string(),
        };
        let plate = self.plate().map(|plate| PlateSnapshot {
            entity: self.layout.plate,
            ingredient_count: plate.ingredient_count(),
            capacity: plate.capacity(),
            fill_amount: plate.fill_amount(),
            target_fill: plate.target_fill(),
            completed: plate.is_complete(),
            highlighted: plate.is_highlighted(),
        });
        let ingredients = self
            .world
            .get_all_entities_with_component::<Ingredient>()
            .into_iter()
            .filter_map(|entity| {
                Some(IngredientSnapshot {
                    entity,
                    kind: self.world.get_component::<Ingredient>(entity)?.kind,
                    position: *self.world.get_component::<Position>(entity)?,
                    dragging: self.world.has_component::<DraggingInfo>(entity),
                })
            })
            .collect();
        KitchenSnapshot {
            active_scene,
            plate,
            ingredients,
        }
    }
}

fn build_kitchen(
    settings: &GameSettings,
    director: &Arc<Mutex<SceneDirector>>,
) -> (World, KitchenLayout) {
    let mut rng = match settings.tray.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = World::new();
    let scene = SceneLink::new(director.clone());
    let layout = KitchenSetupSystem.execute(&mut world, settings, scene, &mut rng);
    (world, layout)
}
