// src/ecs/system.rs

use crate::ecs::world::World;

/// System（システム）トレイトだよ！
///
/// ホストのフレームループから毎フレーム 1 回呼ばれて、World の中身を読み書きする。
/// `delta_time` は前のフレームからの経過秒数。フィルのアニメーションとか
/// タイマーを進めるシステムはこれを使うよ。
pub trait System {
    fn run(&mut self, world: &mut World, delta_time: f32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Component;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Elapsed(f32);
    impl Component for Elapsed {}

    // 経過時間を全部のエンティティに足していくだけのダミーシステム
    struct ClockSystem;

    impl System for ClockSystem {
        fn run(&mut self, world: &mut World, delta_time: f32) {
            for entity in world.get_all_entities_with_component::<Elapsed>() {
                if let Some(elapsed) = world.get_component_mut::<Elapsed>(entity) {
                    elapsed.0 += delta_time;
                }
            }
        }
    }

    #[test]
    fn system_receives_delta_time_every_run() {
        let mut world = World::new();
        world.register_component::<Elapsed>();
        let entity = world.create_entity();
        world.add_component(entity, Elapsed(0.0));

        let mut system = ClockSystem;
        system.run(&mut world, 0.25);
        system.run(&mut world, 0.5);

        assert_eq!(world.get_component::<Elapsed>(entity), Some(&Elapsed(0.75)));
    }
}
