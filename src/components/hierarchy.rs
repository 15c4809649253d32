// src/components/hierarchy.rs
//! コンテナ (親) と描画順の管理。トレイ・キッチン・ドラッグ用オーバーレイの 3 つくらいしかないけど、
//! 食材の「今どこに入ってるか」はここで決まるよ。

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;

/// 子エンティティを入れておける箱。`layer` が大きいほど手前に描かれる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub layer: i32,
}

impl Container {
    pub fn new(name: impl Into<String>, layer: i32) -> Self {
        Self {
            name: name.into(),
            layer,
        }
    }
}

impl Component for Container {}

/// このエンティティが入ってるコンテナ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub container: Entity,
}

impl Component for Parent {}

/// 同じコンテナの中での描画順。大きいほど手前。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiblingIndex(pub u32);

impl Component for SiblingIndex {}

/// 親の付け替えと描画順の操作。ドラッグ処理はこのトレイト越しにコンテナを触るよ。
pub trait ContainerTree {
    fn container_of(&self, item: Entity) -> Option<Entity>;

    /// `item` を `container` の中に移して、その中で一番手前に置く。
    fn reparent(&mut self, item: Entity, container: Entity);

    /// 今のコンテナの中で一番手前に持ってくる。
    fn bring_to_front(&mut self, item: Entity);

    /// 描画順のキー (コンテナのレイヤー, 兄弟内の順番)。大きいほど手前。
    fn draw_key(&self, item: Entity) -> (i32, u32);
}

impl World {
    fn children_of(&self, container: Entity) -> Vec<Entity> {
        self.get_all_entities_with_component::<Parent>()
            .into_iter()
            .filter(|&e| {
                self.get_component::<Parent>(e)
                    .map_or(false, |p| p.container == container)
            })
            .collect()
    }

    fn next_sibling_index(&self, container: Entity, excluding: Entity) -> u32 {
        self.children_of(container)
            .into_iter()
            .filter(|&e| e != excluding)
            .filter_map(|e| self.get_component::<SiblingIndex>(e).map(|s| s.0 + 1))
            .max()
            .unwrap_or(0)
    }
}

impl ContainerTree for World {
    fn container_of(&self, item: Entity) -> Option<Entity> {
        self.get_component::<Parent>(item).map(|p| p.container)
    }

    fn reparent(&mut self, item: Entity, container: Entity) {
        if !self.has_component::<Container>(container) {
            warn!("reparent: {} is not a container, keeping {} where it is", container, item);
            return;
        }
        let index = self.next_sibling_index(container, item);
        self.add_component(item, Parent { container });
        self.add_component(item, SiblingIndex(index));
        debug!("reparent: {} -> container {} (sibling {})", item, container, index);
    }

    fn bring_to_front(&mut self, item: Entity) {
        let Some(container) = self.container_of(item) else {
            warn!("bring_to_front: {} has no container", item);
            return;
        };
        let index = self.next_sibling_index(container, item);
        self.add_component(item, SiblingIndex(index));
    }

    fn draw_key(&self, item: Entity) -> (i32, u32) {
        let layer = self
            .container_of(item)
            .and_then(|c| self.get_component::<Container>(c))
            .map_or(0, |c| c.layer);
        let sibling = self
            .get_component::<SiblingIndex>(item)
            .map_or(0, |s| s.0);
        (layer, sibling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, Entity, Entity) {
        let mut world = World::new();
        let tray = world.create_entity();
        world.add_component(tray, Container::new("tray", 0));
        let overlay = world.create_entity();
        world.add_component(overlay, Container::new("overlay", 10));
        (world, tray, overlay)
    }

    #[test]
    fn reparent_appends_as_last_sibling() {
        let (mut world, tray, overlay) = setup();
        let a = world.create_entity();
        let b = world.create_entity();
        world.reparent(a, tray);
        world.reparent(b, tray);

        assert_eq!(world.container_of(a), Some(tray));
        assert_eq!(world.draw_key(a), (0, 0));
        assert_eq!(world.draw_key(b), (0, 1));

        world.reparent(a, overlay);
        assert_eq!(world.container_of(a), Some(overlay));
        assert_eq!(world.draw_key(a), (10, 0));
    }

    #[test]
    fn bring_to_front_moves_above_siblings() {
        let (mut world, tray, _) = setup();
        let a = world.create_entity();
        let b = world.create_entity();
        world.reparent(a, tray);
        world.reparent(b, tray);

        world.bring_to_front(a);
        assert!(world.draw_key(a) > world.draw_key(b));

        // もう一番手前なら順番は変わらない
        let before = world.draw_key(a);
        world.bring_to_front(a);
        assert_eq!(world.draw_key(a), before);
    }

    #[test]
    fn reparent_to_non_container_is_ignored() {
        let (mut world, tray, _) = setup();
        let item = world.create_entity();
        let not_a_container = world.create_entity();
        world.reparent(item, tray);
        world.reparent(item, not_a_container);
        assert_eq!(world.container_of(item), Some(tray));
    }
}
