// src/logic/scene.rs
//! シーン遷移の窓口と、シーン一覧 (ビルド順) を管理するディレクター。
//! 実際のページ切り替えはホスト (JS) 側の仕事で、ここでは「どこへ行きたいか」を積むだけ。

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;

/// 名前付きのシーンへの遷移を頼む窓口。
pub trait SceneTransition: Send + Sync {
    /// `target` へ遷移をリクエストする。空文字ならワーニングを出して何もしない。
    fn request(&self, target: &str);
}

/// ホストに渡す「このシーンを開いて」というリクエスト。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub name: String,
    pub index: usize,
    /// 今のシーンの開き直しかどうか
    pub reload: bool,
}

/// シーンの一覧と、今どのシーンにいるかを持つ。
#[derive(Debug)]
pub struct SceneDirector {
    scenes: Vec<String>,
    active: usize,
    pending: VecDeque<SceneRequest>,
}

impl SceneDirector {
    /// `scenes` が空なら "Kitchen" だけの一覧にする。`start` が見つからなければ先頭から始める。
    pub fn new(scenes: Vec<String>, start: &str) -> Self {
        let scenes = if scenes.is_empty() {
            warn!("SceneDirector: empty scene list, falling back to a single 'Kitchen' scene");
            vec!["Kitchen".to_string()]
        } else {
            scenes
        };
        let active = scenes.iter().position(|s| s == start).unwrap_or(0);
        Self {
            scenes,
            active,
            pending: VecDeque::new(),
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.scenes.clone(), &config.start_scene)
    }

    pub fn active_scene(&self) -> &str {
        &self.scenes[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// 名前でシーンを開く。知らない名前なら false。
    pub fn load_by_name(&mut self, name: &str) -> bool {
        if name.is_empty() {
            warn!("SceneDirector: next scene name not set!");
            return false;
        }
        match self.scenes.iter().position(|s| s == name) {
            Some(index) => self.load_by_index(index),
            None => {
                error!("SceneDirector: scene '{}' is not in the scene list {:?}", name, self.scenes);
                false
            }
        }
    }

    /// ビルド順の番号でシーンを開く (0 が最初のシーン)。範囲外なら false。
    pub fn load_by_index(&mut self, index: usize) -> bool {
        let Some(name) = self.scenes.get(index).cloned() else {
            error!(
                "SceneDirector: scene index {} out of range (0..{})",
                index,
                self.scenes.len()
            );
            return false;
        };
        let reload = index == self.active;
        self.active = index;
        info!("SceneDirector: loading scene '{}' (index {})", name, index);
        self.pending.push_back(SceneRequest { name, index, reload });
        true
    }

    /// 今のシーンを開き直す。
    pub fn reload_current(&mut self) {
        let index = self.active;
        self.load_by_index(index);
    }

    /// 溜まってるリクエストを古い順に 1 つ取り出す。ホストが毎フレーム呼ぶよ。
    pub fn take_pending(&mut self) -> Option<SceneRequest> {
        self.pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl SceneTransition for Mutex<SceneDirector> {
    fn request(&self, target: &str) {
        match self.lock() {
            Ok(mut director) => {
                director.load_by_name(target);
            }
            Err(poisoned) => {
                error!("SceneDirector mutex poisoned while requesting '{}'. Recovering...", target);
                poisoned.into_inner().load_by_name(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn director() -> SceneDirector {
        SceneDirector::new(
            vec!["Kitchen".into(), "NextLevel".into(), "Credits".into()],
            "Kitchen",
        )
    }

    #[test]
    fn load_by_name_queues_a_request() {
        let mut director = director();
        assert!(director.load_by_name("NextLevel"));
        assert_eq!(director.active_scene(), "NextLevel");
        assert_eq!(
            director.take_pending(),
            Some(SceneRequest { name: "NextLevel".into(), index: 1, reload: false })
        );
        assert_eq!(director.take_pending(), None);
    }

    #[test]
    fn unknown_or_empty_names_are_ignored() {
        let mut director = director();
        assert!(!director.load_by_name("Dungeon"));
        assert!(!director.load_by_name(""));
        assert_eq!(director.active_scene(), "Kitchen");
        assert_eq!(director.pending_count(), 0);
    }

    #[test]
    fn load_by_index_checks_range() {
        let mut director = director();
        assert!(director.load_by_index(2));
        assert_eq!(director.active_scene(), "Credits");
        assert!(!director.load_by_index(3));
        assert_eq!(director.active_index(), 2);
        assert_eq!(director.pending_count(), 1);
    }

    #[test]
    fn reload_current_marks_request_as_reload() {
        let mut director = director();
        director.reload_current();
        let request = director.take_pending().expect("reload request");
        assert_eq!(request.name, "Kitchen");
        assert!(request.reload);
    }

    #[test]
    fn start_scene_falls_back_to_first() {
        let director = SceneDirector::new(vec!["A".into(), "B".into()], "Missing");
        assert_eq!(director.active_scene(), "A");
        let empty = SceneDirector::new(Vec::new(), "Anything");
        assert_eq!(empty.scene_count(), 1);
    }

    #[test]
    fn shared_director_works_through_the_trait() {
        let shared = Arc::new(Mutex::new(director()));
        let transition: Arc<dyn SceneTransition> = shared.clone();
        transition.request("NextLevel");
        transition.request("");
        let mut director = shared.lock().unwrap();
        assert_eq!(director.pending_count(), 1);
        assert_eq!(director.take_pending().map(|r| r.name), Some("NextLevel".to_string()));
    }
}
