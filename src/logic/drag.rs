// src/logic/drag.rs
//! Handles ingredient dragging logic (start, update, end).
//!
//! 状態は `DraggingInfo` コンポーネントで表すよ。付いてればドラッグ中、無ければ待機中。
//! ドロップが成功したら食材は消える (お皿に食べられる)、失敗したら元の場所に戻る。

use log::{debug, info, warn};

use crate::components::{ContainerTree, Draggable, DraggingInfo, Position, Sprite};
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::logic::hit_test::{find_drop_target, HitTest};
use crate::logic::plate::PlateState;
use crate::logic::timer::Timer;

/// スケール係数の下限。0 で割らないようにこれより小さい値はここまで持ち上げる。
pub const MIN_SCALE_FACTOR: f32 = 1e-4;

/// ドラッグ終了時に何が起きたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// お皿に入って、食材エンティティは削除された
    Consumed { plate: Entity },
    /// ドロップ先が無かったので元の場所に戻った
    Reverted,
    /// そもそもドラッグ中じゃなかった
    NotDragging,
}

/// 食材のドラッグ＆ドロップを担当するコントローラー。
///
/// ドラッグ中の食材は `overlay` コンテナに移して一番手前に描く。
/// 1 つの食材に対して begin → update* → end の順で呼ばれる前提だよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragController {
    overlay: Entity,
}

impl DragController {
    pub fn new(overlay: Entity) -> Self {
        Self { overlay }
    }

    pub fn overlay(&self) -> Entity {
        self.overlay
    }

    pub fn is_dragging(&self, world: &World, item: Entity) -> bool {
        world.has_component::<DraggingInfo>(item)
    }

    /// ドラッグ開始。元の位置・コンテナ・不透明度を覚えて、オーバーレイの一番手前に移す。
    /// ドラッグ中の食材に二重で呼ばれたら何もせず false を返す。
    pub fn begin_drag(&self, world: &mut World, item: Entity, pointer: Position) -> bool {
        if self.is_dragging(world, item) {
            warn!("begin_drag: {} is already being dragged, ignoring", item);
            return false;
        }
        let Some(draggable) = world.get_component::<Draggable>(item).copied() else {
            warn!("begin_drag: {} is not draggable", item);
            return false;
        };
        let Some(original_position) = world.get_component::<Position>(item).copied() else {
            warn!("begin_drag: {} has no Position", item);
            return false;
        };
        let Some(original_container) = world.container_of(item) else {
            warn!("begin_drag: {} has no container to return to", item);
            return false;
        };
        let original_opacity = world
            .get_component::<Sprite>(item)
            .map_or(1.0, |s| s.opacity);

        world.add_component(
            item,
            DraggingInfo {
                original_position,
                original_container,
                original_opacity,
            },
        );

        world.reparent(item, self.overlay);
        world.bring_to_front(item);

        if let Some(sprite) = world.get_component_mut::<Sprite>(item) {
            sprite.opacity = draggable.drag_alpha;
            sprite.raycast_target = false;
        }

        info!(
            "begin_drag: {} picked up at ({}, {}) from container {}",
            item, pointer.x, pointer.y, original_container
        );
        true
    }

    /// ポインタの移動量 `delta` をスケール係数で割って食材を動かす。
    pub fn update_drag(&self, world: &mut World, item: Entity, delta: Position, scale_factor: f32) -> bool {
        if !self.is_dragging(world, item) {
            debug!("update_drag: {} is not being dragged", item);
            return false;
        }
        let scale = sanitize_scale_factor(scale_factor);
        match world.get_component_mut::<Position>(item) {
            Some(position) => {
                *position += delta / scale;
                true
            }
            None => {
                warn!("update_drag: {} lost its Position", item);
                false
            }
        }
    }

    /// ドラッグ中の食材の下にあるお皿だけハイライトする。見た目用のフック。
    /// ハイライトされたお皿を返す。
    pub fn refresh_hover(
        &self,
        world: &mut World,
        item: Entity,
        pointer: Position,
        hit_test: &dyn HitTest,
    ) -> Option<Entity> {
        if !self.is_dragging(world, item) {
            return None;
        }
        let hovered = find_drop_target(world, hit_test.raycast_all(world, pointer));
        set_plate_highlights(world, hovered);
        hovered
    }

    /// ドラッグ終了。見た目を戻してから、ポインタの下で最初に見つかったお皿に入れる。
    /// お皿が無ければ元のコンテナ・元の位置に戻す。
    pub fn end_drag(
        &self,
        world: &mut World,
        item: Entity,
        pointer: Position,
        hit_test: &dyn HitTest,
        timer: &mut dyn Timer,
    ) -> DropOutcome {
        let Some(dragging_info) = world.remove_component::<DraggingInfo>(item) else {
            warn!("end_drag: DraggingInfo not found for {}. Ignoring drag end.", item);
            return DropOutcome::NotDragging;
        };

        if let Some(sprite) = world.get_component_mut::<Sprite>(item) {
            sprite.opacity = dragging_info.original_opacity;
            sprite.raycast_target = true;
        }
        set_plate_highlights(world, None);

        let hits = hit_test.raycast_all(world, pointer);
        match find_drop_target(world, hits) {
            Some(plate_entity) => {
                if let Some(plate) = world.get_component_mut::<PlateState>(plate_entity) {
                    plate.add_ingredient(timer);
                }
                world.destroy_entity(item);
                info!("end_drag: {} dropped onto plate {}", item, plate_entity);
                DropOutcome::Consumed { plate: plate_entity }
            }
            None => {
                reset_item_position(world, item, &dragging_info);
                DropOutcome::Reverted
            }
        }
    }
}

/// 0 以下や NaN のスケールは設定ミスなので下限値に丸める。
pub fn sanitize_scale_factor(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor >= MIN_SCALE_FACTOR {
        scale_factor
    } else {
        warn!("scale factor {} is invalid, clamping to {}", scale_factor, MIN_SCALE_FACTOR);
        MIN_SCALE_FACTOR
    }
}

fn set_plate_highlights(world: &mut World, hovered: Option<Entity>) {
    for plate_entity in world.get_all_entities_with_component::<PlateState>() {
        if let Some(plate) = world.get_component_mut::<PlateState>(plate_entity) {
            plate.set_highlighted(Some(plate_entity) == hovered);
        }
    }
}

/// 食材をドラッグ開始時のコンテナと位置に戻す。
fn reset_item_position(world: &mut World, item: Entity, dragging_info: &DraggingInfo) {
    world.reparent(item, dragging_info.original_container);
    match world.get_component_mut::<Position>(item) {
        Some(position) => *position = dragging_info.original_position,
        None => warn!("reset_item_position: Position not found for {}", item),
    }
    info!(
        "end_drag: no plate under pointer, {} returned to ({}, {})",
        item, dragging_info.original_position.x, dragging_info.original_position.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Bounds, Container};
    use crate::config::PlateConfig;
    use crate::logic::hit_test::WorldRaycaster;
    use crate::logic::plate::SceneLink;
    use crate::logic::scene::SceneDirector;
    use crate::logic::timer::FrameTimer;
    use std::sync::{Arc, Mutex};

    struct Kitchen {
        world: World,
        controller: DragController,
        tray: Entity,
        plate: Entity,
        item: Entity,
        timer: FrameTimer,
    }

    /// ヒットテストの結果を固定で返すテスト用の実装
    struct FixedHits(Vec<Entity>);

    impl HitTest for FixedHits {
        fn raycast_all(&self, _world: &World, _point: Position) -> Vec<Entity> {
            self.0.clone()
        }
    }

    fn kitchen() -> Kitchen {
        let mut world = World::new();
        let tray = world.create_entity();
        world.add_component(tray, Container::new("tray", 1));
        let overlay = world.create_entity();
        world.add_component(overlay, Container::new("overlay", 100));
        let kitchen = world.create_entity();
        world.add_component(kitchen, Container::new("kitchen", 0));

        let director = Arc::new(Mutex::new(SceneDirector::new(
            vec!["Kitchen".into(), "NextLevel".into()],
            "Kitchen",
        )));
        let plate = world.create_entity();
        world.add_component(plate, Position::new(300.0, 100.0));
        world.add_component(plate, Bounds::new(200.0, 200.0));
        world.add_component(plate, PlateState::new(&PlateConfig::default(), SceneLink::new(director)));
        world.reparent(plate, kitchen);

        let item = spawn_item(&mut world, tray, 40.0, 480.0);

        Kitchen {
            world,
            controller: DragController::new(overlay),
            tray,
            plate,
            item,
            timer: FrameTimer::new(),
        }
    }

    fn spawn_item(world: &mut World, tray: Entity, x: f32, y: f32) -> Entity {
        let item = world.create_entity();
        world.add_component(item, Position::new(x, y));
        world.add_component(item, Bounds::new(72.0, 72.0));
        world.add_component(item, Sprite::new("#e74c3c"));
        world.add_component(item, Draggable::default());
        world.reparent(item, tray);
        item
    }

    #[test]
    fn begin_drag_moves_item_to_overlay_and_fades_it() {
        let mut k = kitchen();
        assert!(k.controller.begin_drag(&mut k.world, k.item, Position::new(50.0, 500.0)));

        assert_eq!(k.world.container_of(k.item), Some(k.controller.overlay()));
        let sprite = k.world.get_component::<Sprite>(k.item).unwrap();
        assert_eq!(sprite.opacity, 0.7);
        assert!(!sprite.raycast_target);
        let info = k.world.get_component::<DraggingInfo>(k.item).unwrap();
        assert_eq!(info.original_position, Position::new(40.0, 480.0));
        assert_eq!(info.original_container, k.tray);
        assert_eq!(info.original_opacity, 1.0);
    }

    #[test]
    fn second_begin_drag_is_ignored() {
        let mut k = kitchen();
        assert!(k.controller.begin_drag(&mut k.world, k.item, Position::ZERO));
        k.controller.update_drag(&mut k.world, k.item, Position::new(10.0, 0.0), 1.0);
        assert!(!k.controller.begin_drag(&mut k.world, k.item, Position::ZERO));

        // 最初の記録がそのまま残ってる
        let info = k.world.get_component::<DraggingInfo>(k.item).unwrap();
        assert_eq!(info.original_position, Position::new(40.0, 480.0));
        assert_eq!(info.original_container, k.tray);
    }

    #[test]
    fn non_draggable_entities_cannot_be_picked_up() {
        let mut k = kitchen();
        assert!(!k.controller.begin_drag(&mut k.world, k.plate, Position::ZERO));
        assert!(!k.controller.is_dragging(&k.world, k.plate));
    }

    #[test]
    fn update_drag_divides_by_scale_factor() {
        let mut k = kitchen();
        k.controller.begin_drag(&mut k.world, k.item, Position::ZERO);
        k.controller.update_drag(&mut k.world, k.item, Position::new(20.0, -10.0), 2.0);
        assert_eq!(
            k.world.get_component::<Position>(k.item),
            Some(&Position::new(50.0, 475.0))
        );
    }

    #[test]
    fn zero_scale_factor_is_clamped() {
        let mut k = kitchen();
        k.controller.begin_drag(&mut k.world, k.item, Position::ZERO);
        k.controller.update_drag(&mut k.world, k.item, Position::new(1.0, 1.0), 0.0);
        k.controller.update_drag(&mut k.world, k.item, Position::new(1.0, 1.0), f32::NAN);
        let pos = k.world.get_component::<Position>(k.item).unwrap();
        assert!(pos.is_finite());
        assert_eq!(sanitize_scale_factor(0.0), MIN_SCALE_FACTOR);
        assert_eq!(sanitize_scale_factor(-3.0), MIN_SCALE_FACTOR);
        assert_eq!(sanitize_scale_factor(1.5), 1.5);
    }

    #[test]
    fn update_without_begin_does_nothing() {
        let mut k = kitchen();
        assert!(!k.controller.update_drag(&mut k.world, k.item, Position::new(5.0, 5.0), 1.0));
        assert_eq!(
            k.world.get_component::<Position>(k.item),
            Some(&Position::new(40.0, 480.0))
        );
    }

    #[test]
    fn drop_outside_plate_reverts_exactly() {
        let mut k = kitchen();
        k.controller.begin_drag(&mut k.world, k.item, Position::new(50.0, 500.0));
        k.controller.update_drag(&mut k.world, k.item, Position::new(123.0, -77.0), 1.0);

        let outcome = k.controller.end_drag(
            &mut k.world,
            k.item,
            Position::new(5.0, 5.0),
            &WorldRaycaster,
            &mut k.timer,
        );
        assert_eq!(outcome, DropOutcome::Reverted);
        assert_eq!(k.world.get_component::<Position>(k.item), Some(&Position::new(40.0, 480.0)));
        assert_eq!(k.world.container_of(k.item), Some(k.tray));
        let sprite = k.world.get_component::<Sprite>(k.item).unwrap();
        assert_eq!(sprite.opacity, 1.0);
        assert!(sprite.raycast_target);
        assert!(!k.controller.is_dragging(&k.world, k.item));
        assert_eq!(k.world.get_component::<PlateState>(k.plate).unwrap().ingredient_count(), 0);
    }

    #[test]
    fn drop_on_plate_consumes_item_and_adds_one_ingredient() {
        let mut k = kitchen();
        k.controller.begin_drag(&mut k.world, k.item, Position::new(50.0, 500.0));
        k.controller.update_drag(&mut k.world, k.item, Position::new(300.0, -300.0), 1.0);

        let outcome = k.controller.end_drag(
            &mut k.world,
            k.item,
            Position::new(400.0, 200.0),
            &WorldRaycaster,
            &mut k.timer,
        );
        assert_eq!(outcome, DropOutcome::Consumed { plate: k.plate });
        assert!(!k.world.is_entity_alive(k.item));
        assert_eq!(k.world.get_component::<PlateState>(k.plate).unwrap().ingredient_count(), 1);
    }

    #[test]
    fn non_plate_hits_do_not_block_the_drop() {
        let mut k = kitchen();
        let other = spawn_item(&mut k.world, k.tray, 0.0, 0.0);
        k.controller.begin_drag(&mut k.world, k.item, Position::ZERO);

        let hits = FixedHits(vec![other, k.item, k.plate]);
        let outcome = k.controller.end_drag(&mut k.world, k.item, Position::ZERO, &hits, &mut k.timer);
        assert_eq!(outcome, DropOutcome::Consumed { plate: k.plate });
        assert!(k.world.is_entity_alive(other), "上に乗ってただけの食材は無事");
    }

    #[test]
    fn end_drag_without_begin_is_reported() {
        let mut k = kitchen();
        let outcome = k.controller.end_drag(
            &mut k.world,
            k.item,
            Position::new(400.0, 200.0),
            &WorldRaycaster,
            &mut k.timer,
        );
        assert_eq!(outcome, DropOutcome::NotDragging);
        assert!(k.world.is_entity_alive(k.item));
    }

    #[test]
    fn hover_highlights_plate_and_end_clears_it() {
        let mut k = kitchen();
        k.controller.begin_drag(&mut k.world, k.item, Position::ZERO);

        let hovered = k.controller.refresh_hover(&mut k.world, k.item, Position::new(350.0, 150.0), &WorldRaycaster);
        assert_eq!(hovered, Some(k.plate));
        assert!(k.world.get_component::<PlateState>(k.plate).unwrap().is_highlighted());

        let hovered = k.controller.refresh_hover(&mut k.world, k.item, Position::new(5.0, 5.0), &WorldRaycaster);
        assert_eq!(hovered, None);
        assert!(!k.world.get_component::<PlateState>(k.plate).unwrap().is_highlighted());

        k.controller.refresh_hover(&mut k.world, k.item, Position::new(350.0, 150.0), &WorldRaycaster);
        k.controller.end_drag(&mut k.world, k.item, Position::new(5.0, 5.0), &WorldRaycaster, &mut k.timer);
        assert!(!k.world.get_component::<PlateState>(k.plate).unwrap().is_highlighted());
    }

    #[test]
    fn three_drops_complete_the_plate() {
        let mut k = kitchen();
        let mut items = vec![k.item];
        items.push(spawn_item(&mut k.world, k.tray, 136.0, 480.0));
        items.push(spawn_item(&mut k.world, k.tray, 232.0, 480.0));

        for item in items {
            k.controller.begin_drag(&mut k.world, item, Position::ZERO);
            let outcome = k.controller.end_drag(
                &mut k.world,
                item,
                Position::new(400.0, 200.0),
                &WorldRaycaster,
                &mut k.timer,
            );
            assert_eq!(outcome, DropOutcome::Consumed { plate: k.plate });
        }
        let plate = k.world.get_component::<PlateState>(k.plate).unwrap();
        assert!(plate.is_complete());
        assert_eq!(k.timer.pending_count(), 1);
    }
}
