// src/config/settings.rs
//! JS 側から JSON で渡される実行時設定だよ。
//! 全部のフィールドにデフォルトがあるので、`{}` を渡しても動く！

use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::draggable::DEFAULT_DRAG_ALPHA;

/// トレイに並べられる食材の最大数 (レイアウトのスロット数)
pub const MAX_TRAY_SLOTS: usize = 8;

/// ゲージが伸びる向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMethod {
    Vertical,
    Horizontal,
}

/// ゲージが伸び始める端。縦なら Bottom/Top、横なら Left/Right。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillOrigin {
    Bottom,
    Top,
    Left,
    Right,
}

impl FillOrigin {
    pub fn fits(self, method: FillMethod) -> bool {
        matches!(
            (method, self),
            (FillMethod::Vertical, FillOrigin::Bottom | FillOrigin::Top)
                | (FillMethod::Horizontal, FillOrigin::Left | FillOrigin::Right)
        )
    }

    /// その向きで使うデフォルトの端
    pub fn default_for(method: FillMethod) -> Self {
        match method {
            FillMethod::Vertical => FillOrigin::Bottom,
            FillMethod::Horizontal => FillOrigin::Left,
        }
    }
}

/// お皿のフィルゲージの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub method: FillMethod,
    pub origin: FillOrigin,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            method: FillMethod::Vertical,
            origin: FillOrigin::Bottom,
        }
    }
}

/// お皿 1 枚分の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    /// 何個入れたら完成か
    pub capacity: u32,
    /// 1 個あたりのフィル量。未指定なら 1/capacity。
    pub fill_per_unit: Option<f32>,
    /// フィルアニメーションの速さ
    pub fill_speed: f32,
    /// 完成してからシーン遷移するまでの秒数
    pub transition_delay: f32,
    /// 完成したら遷移するシーン名。空文字なら遷移しない。
    pub target_scene: String,
    /// `null` にするとゲージ無しのお皿になる
    pub gauge: Option<GaugeConfig>,
}

impl PlateConfig {
    pub fn fill_per_unit(&self) -> f32 {
        self.fill_per_unit
            .unwrap_or_else(|| 1.0 / self.capacity.max(1) as f32)
    }
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            capacity: 3,
            fill_per_unit: None,
            fill_speed: 0.5,
            transition_delay: 1.0,
            target_scene: "NextLevel".to_string(),
            gauge: Some(GaugeConfig::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// ドラッグ中の不透明度
    pub drag_alpha: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            drag_alpha: DEFAULT_DRAG_ALPHA,
        }
    }
}

/// シーンの並び (ビルド順)。先頭が最初に開くシーン。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scenes: Vec<String>,
    pub start_scene: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scenes: vec!["Kitchen".to_string(), "NextLevel".to_string()],
            start_scene: "Kitchen".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    /// トレイに並べる食材の数
    pub ingredient_count: usize,
    /// 並び順シャッフル用のシード。None ならその都度ランダム。
    pub shuffle_seed: Option<u64>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            ingredient_count: 5,
            shuffle_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub plate: PlateConfig,
    pub drag: DragConfig,
    pub scenes: SceneConfig,
    pub tray: TrayConfig,
}

impl GameSettings {
    /// JSON 文字列から設定を読んで、おかしな値を直したものを返す。
    pub fn from_json(json: &str) -> Result<Self, String> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let settings: GameSettings = serde_json::from_str(trimmed)
            .map_err(|e| format!("Failed to parse game settings: {}", e))?;
        Ok(settings.validated())
    }

    /// 範囲外の値をデフォルトかクランプした値に直す。エラーにはしないで warn を出すだけ。
    pub fn validated(mut self) -> Self {
        let defaults = GameSettings::default();

        if self.plate.capacity == 0 {
            warn!("settings: plate.capacity must be at least 1, using {}", defaults.plate.capacity);
            self.plate.capacity = defaults.plate.capacity;
        }
        if let Some(per_unit) = self.plate.fill_per_unit {
            if !per_unit.is_finite() || per_unit <= 0.0 {
                warn!("settings: plate.fill_per_unit {} is invalid, using 1/capacity", per_unit);
                self.plate.fill_per_unit = None;
            }
        }
        if !self.plate.fill_speed.is_finite() || self.plate.fill_speed <= 0.0 {
            warn!("settings: plate.fill_speed {} is invalid", self.plate.fill_speed);
            self.plate.fill_speed = defaults.plate.fill_speed;
        }
        if !self.plate.transition_delay.is_finite() || self.plate.transition_delay < 0.0 {
            warn!("settings: plate.transition_delay {} is invalid", self.plate.transition_delay);
            self.plate.transition_delay = defaults.plate.transition_delay;
        }
        if !self.drag.drag_alpha.is_finite() {
            self.drag.drag_alpha = defaults.drag.drag_alpha;
        }
        self.drag.drag_alpha = self.drag.drag_alpha.clamp(0.0, 1.0);

        if self.tray.ingredient_count > MAX_TRAY_SLOTS {
            warn!(
                "settings: tray.ingredient_count {} exceeds {} slots",
                self.tray.ingredient_count, MAX_TRAY_SLOTS
            );
            self.tray.ingredient_count = MAX_TRAY_SLOTS;
        }
        if let Some(gauge) = self.plate.gauge.as_mut() {
            if !gauge.origin.fits(gauge.method) {
                let origin = FillOrigin::default_for(gauge.method);
                warn!(
                    "settings: gauge origin {:?} does not fit {:?}, using {:?}",
                    gauge.origin, gauge.method, origin
                );
                gauge.origin = origin;
            }
        }

        if self.scenes.scenes.is_empty() {
            self.scenes = defaults.scenes;
        } else if !self.scenes.scenes.contains(&self.scenes.start_scene) {
            warn!(
                "settings: start_scene '{}' is not in the scene list, starting at '{}'",
                self.scenes.start_scene, self.scenes.scenes[0]
            );
            self.scenes.start_scene = self.scenes.scenes[0].clone();
        }
        // 完成時の遷移先がシーン一覧に無いと遷移できないので、末尾に足しておく
        let target = &self.plate.target_scene;
        if !target.is_empty() && !self.scenes.scenes.contains(target) {
            warn!(
                "settings: target_scene '{}' is not in the scene list, appending it",
                target
            );
            self.scenes.scenes.push(target.clone());
        }
        self
    }
}
