// src/logic/plate.rs
//! お皿の状態管理。食材が入るたびにカウントが増えて、フィルが目標値に向かって
//! なめらかに伸びていく。満杯になったら 1 回だけシーン遷移を予約するよ。

use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::PlateConfig;
pub use crate::config::{FillMethod, FillOrigin};
use crate::ecs::component::Component;
use crate::logic::scene::SceneTransition;
use crate::logic::timer::Timer;

/// フィルアニメーションの補間係数にかける定数
pub const FILL_SMOOTHING: f32 = 5.0;
/// 目標値との差がこれより小さくなったらピッタリ合わせる
pub const FILL_SNAP_EPSILON: f32 = 0.01;

/// お皿の中身を表示するゲージ (見た目のハンドル)。`amount` が今表示してるフィル量。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillGauge {
    pub amount: f32,
    method: FillMethod,
    origin: FillOrigin,
}

impl FillGauge {
    /// 空っぽのゲージ。向きに合わない起点はその向きのデフォルトに直す。
    pub fn new(method: FillMethod, origin: FillOrigin) -> Self {
        let origin = if origin.fits(method) {
            origin
        } else {
            FillOrigin::default_for(method)
        };
        Self {
            amount: 0.0,
            method,
            origin,
        }
    }

    pub fn method(&self) -> FillMethod {
        self.method
    }

    pub fn origin(&self) -> FillOrigin {
        self.origin
    }
}

/// 完成時に呼ぶシーン遷移先への参照。コンポーネントに入れるため Debug を手書きしてる。
#[derive(Clone)]
pub struct SceneLink(Arc<dyn SceneTransition>);

impl SceneLink {
    pub fn new(transition: Arc<dyn SceneTransition>) -> Self {
        Self(transition)
    }

    pub fn request(&self, target: &str) {
        self.0.request(target);
    }
}

impl std::fmt::Debug for SceneLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SceneLink(..)")
    }
}

/// お皿 (ドロップ先) の状態。このコンポーネントを持ってるエンティティだけがドロップを受け付けるよ。
#[derive(Debug, Clone)]
pub struct PlateState {
    config: PlateConfig,
    fill_per_unit: f32,
    ingredient_count: u32,
    target_fill: f32,
    gauge: Option<FillGauge>,
    completed: bool,
    highlighted: bool,
    scene: SceneLink,
}

impl PlateState {
    pub fn new(config: &PlateConfig, scene: SceneLink) -> Self {
        let config = PlateConfig {
            capacity: config.capacity.max(1),
            ..config.clone()
        };
        let gauge = config.gauge.map(|g| FillGauge::new(g.method, g.origin));
        Self {
            fill_per_unit: config.fill_per_unit(),
            config,
            ingredient_count: 0,
            target_fill: 0.0,
            gauge,
            completed: false,
            highlighted: false,
            scene,
        }
    }

    /// 食材を 1 個追加する。満杯を超えた分は数えない。
    /// 初めて満杯になった時だけ、`transition_delay` 秒後のシーン遷移を `timer` に予約する。
    pub fn add_ingredient(&mut self, timer: &mut dyn Timer) {
        self.ingredient_count = (self.ingredient_count + 1).min(self.config.capacity);
        self.update_target_fill();
        info!(
            "Ingredient added! {}/{} Fill: {:.0}%",
            self.ingredient_count,
            self.config.capacity,
            self.target_fill * 100.0
        );

        if self.ingredient_count >= self.config.capacity && !self.completed {
            self.completed = true;
            self.schedule_completion(timer);
        }
    }

    fn update_target_fill(&mut self) {
        self.target_fill = (self.ingredient_count as f32 * self.fill_per_unit).clamp(0.0, 1.0);
    }

    fn schedule_completion(&self, timer: &mut dyn Timer) {
        info!(
            "Plate complete! Loading '{}' in {}s...",
            self.config.target_scene, self.config.transition_delay
        );
        let scene = self.scene.clone();
        let target = self.config.target_scene.clone();
        timer.schedule_once(
            self.config.transition_delay,
            Box::new(move || load_next_scene(&scene, &target)),
        );
    }

    /// 1 フレーム分、表示フィルを目標値に近づける。ゲージが無ければ何もしない。
    /// 行き過ぎることはなくて、差が `FILL_SNAP_EPSILON` 未満になったらピッタリ合わせる。
    pub fn tick(&mut self, delta_time: f32) {
        let target = self.target_fill;
        let Some(gauge) = self.gauge.as_mut() else {
            return;
        };
        if gauge.amount == target || !delta_time.is_finite() || delta_time <= 0.0 {
            return;
        }

        let t = (delta_time * self.config.fill_speed * FILL_SMOOTHING).clamp(0.0, 1.0);
        gauge.amount += (target - gauge.amount) * t;

        if (gauge.amount - target).abs() < FILL_SNAP_EPSILON {
            gauge.amount = target;
            debug!("PlateState: fill settled at {:.3}", target);
        }
    }

    /// カウントとフィルを即座に 0 に戻す。予約済みのシーン遷移は取り消さない。
    pub fn reset(&mut self) {
        self.ingredient_count = 0;
        self.target_fill = 0.0;
        self.completed = false;
        if let Some(gauge) = self.gauge.as_mut() {
            gauge.amount = 0.0;
        }
        info!("PlateState: plate reset");
    }

    pub fn ingredient_count(&self) -> u32 {
        self.ingredient_count
    }

    pub fn capacity(&self) -> u32 {
        self.config.capacity
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// 今表示されてるフィル量。ゲージが無ければ常に 0。
    pub fn fill_amount(&self) -> f32 {
        self.gauge.map_or(0.0, |g| g.amount)
    }

    pub fn target_fill(&self) -> f32 {
        self.target_fill
    }

    pub fn gauge(&self) -> Option<&FillGauge> {
        self.gauge.as_ref()
    }

    pub fn config(&self) -> &PlateConfig {
        &self.config
    }

    /// ドラッグ中の食材が上に乗った/離れた時のハイライト。見た目だけの話。
    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.highlighted != highlighted {
            debug!("PlateState: highlight {}", if highlighted { "on" } else { "off" });
        }
        self.highlighted = highlighted;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

impl Component for PlateState {}

/// 完成時に遅れて呼ばれる処理。
fn load_next_scene(scene: &SceneLink, target: &str) {
    if target.is_empty() {
        warn!("Next scene name not set!");
        return;
    }
    scene.request(target);
}
