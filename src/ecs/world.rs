// src/ecs/world.rs

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use log::{debug, error, warn};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// 型ごとのコンポーネントストレージと、その型専用のお掃除関数をまとめたもの。
///
/// `storage` の中身は `HashMap<Entity, T>` を `Box<dyn Any>` で型消去したもの。
/// `remover` があるおかげで、`destroy_entity` は `T` を知らなくても
/// 全ストレージからエンティティを消せるんだ。
struct ComponentStoreEntry {
    storage: Box<dyn Any + Send + Sync>,
    remover: fn(&mut (dyn Any + Send + Sync), Entity),
}

impl ComponentStoreEntry {
    fn new<T: Component>() -> Self {
        let remover: fn(&mut (dyn Any + Send + Sync), Entity) = |storage_any, entity| {
            match storage_any.downcast_mut::<HashMap<Entity, T>>() {
                Some(storage) => {
                    storage.remove(&entity);
                }
                None => error!(
                    "World: remover for {} got a storage of the wrong type",
                    std::any::type_name::<T>()
                ),
            }
        };
        Self {
            storage: Box::new(HashMap::<Entity, T>::new()),
            remover,
        }
    }
}

/// ゲーム世界の全エンティティとコンポーネントを管理する、自作 ECS のコア！
///
/// 食材もお皿もコンテナも全部ここに入ってる。ホスト側は
/// `Arc<Mutex<World>>` で共有して、フレームごとにロックして触るよ。
pub struct World {
    entities: HashSet<Entity>,
    next_entity_id: usize,
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl World {
    pub fn new() -> Self {
        World {
            entities: HashSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを作る。ID は 0 からの連番で、削除されても再利用しない。
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        debug!("World: created entity {}", entity);
        entity
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// エンティティと、それが持ってる全コンポーネントを削除する。
    /// お皿にドロップされた食材はここで消えるよ。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            warn!("World: attempted to destroy non-existent entity {}", entity);
            return false;
        }
        for entry in self.component_stores.values_mut() {
            (entry.remover)(entry.storage.as_mut(), entity);
        }
        debug!("World: destroyed entity {}", entity);
        true
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// コンポーネント型 `T` のストレージを用意する。二重登録しても中身は消さない。
    pub fn register_component<T: Component>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.component_stores.contains_key(&type_id) {
            debug!(
                "World: component type {} already registered",
                std::any::type_name::<T>()
            );
            return;
        }
        self.component_stores
            .insert(type_id, ComponentStoreEntry::new::<T>());
        debug!("World: registered component type {}", std::any::type_name::<T>());
    }

    /// エンティティにコンポーネントを追加 (すでにあれば上書き) するよ。
    /// 死んでるエンティティには何もしない。未登録の型はその場で登録する。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.is_entity_alive(entity) {
            warn!(
                "World: tried to add {} to dead entity {}",
                std::any::type_name::<T>(),
                entity
            );
            return;
        }
        self.register_component::<T>();
        match self.store_mut::<T>() {
            Some(storage) => {
                storage.insert(entity, component);
            }
            None => error!(
                "World: storage downcast failed for {}",
                std::any::type_name::<T>()
            ),
        }
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.store::<T>().and_then(|storage| storage.get(&entity))
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.store_mut::<T>().and_then(|storage| storage.get_mut(&entity))
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>().and_then(|storage| storage.remove(&entity))
    }

    /// `T` を持っている生きたエンティティを ID 順で返す。
    /// HashMap の並びはバラバラなので、ソートして毎回同じ順番にしておく。
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .store::<T>()
            .map(|storage| {
                storage
                    .keys()
                    .copied()
                    .filter(|e| self.is_entity_alive(*e))
                    .collect()
            })
            .unwrap_or_default();
        entities.sort();
        entities
    }

    fn store<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_mut::<HashMap<Entity, T>>())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod world_tests;
