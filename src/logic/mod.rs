// src/logic/mod.rs
//! エンジンに依存しないゲームロジック。ドラッグ＆ドロップ、お皿、タイマー、シーン遷移。

pub mod drag;
pub mod plate;
pub mod scene;
pub mod timer;

pub use drag::{DragController, DropOutcome};
pub use hit_test::{find_drop_target, HitTest, WorldRaycaster};
pub use plate::{FillGauge, PlateState, SceneLink};
pub use scene::{SceneDirector, SceneRequest, SceneTransition};
pub use timer::{FrameTimer, ScheduledAction, Timer};
