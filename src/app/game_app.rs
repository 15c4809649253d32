// src/app/game_app.rs

use std::sync::{Arc, Mutex, MutexGuard};

use js_sys::Error;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::app::browser_event_manager::{self, ListenerList};
use crate::app::{renderer, state_getter};
use crate::config::GameSettings;
use crate::session::KitchenSession;

/// JS から見えるゲーム本体。中身は `KitchenSession` で、ここは Canvas とイベントの面倒だけ見る。
#[wasm_bindgen]
pub struct GameApp {
    session: Arc<Mutex<KitchenSession>>,
    listeners: ListenerList,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl GameApp {
    /// `settings_json` が空文字ならデフォルト設定で始める。
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, settings_json: &str) -> Result<GameApp, JsValue> {
        info!("GameApp: initializing...");
        let settings = GameSettings::from_json(settings_json)
            .map_err(|e| JsValue::from(Error::new(&e)))?;
        let (canvas, context) = initialize_canvas(canvas_id)?;

        let session = KitchenSession::new(settings);
        info!("GameApp: ready in scene {}", session.snapshot().active_scene);
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            canvas,
            context,
        })
    }

    #[wasm_bindgen]
    pub fn attach_listeners(&self) -> Result<(), JsValue> {
        browser_event_manager::detach_listeners(&self.listeners)?;
        browser_event_manager::attach_listeners(
            Arc::clone(&self.session),
            self.canvas.clone(),
            &self.listeners,
        )
    }

    #[wasm_bindgen]
    pub fn detach_listeners(&self) -> Result<(), JsValue> {
        browser_event_manager::detach_listeners(&self.listeners)
    }

    /// requestAnimationFrame から毎フレーム呼ぶ。
    /// 別のシーンに移ることになったらそのシーン名を返すので、JS 側で画面を切り替えてね。
    /// 今のシーンの開き直しは Rust 側で済ませるので何も返さない。
    #[wasm_bindgen]
    pub fn tick(&self, delta_time: f32) -> Option<String> {
        let request = self.lock_session().tick(delta_time)?;
        if request.reload {
            info!("GameApp: scene {} reloaded", request.name);
            None
        } else {
            info!("GameApp: moving to scene {} (#{})", request.name, request.index);
            Some(request.name)
        }
    }

    #[wasm_bindgen]
    pub fn render(&self) -> Result<(), JsValue> {
        let session = self.lock_session();
        renderer::render_kitchen(session.world(), &self.canvas, &self.context)
    }

    #[wasm_bindgen]
    pub fn reset_plate(&self) {
        self.lock_session().reset_plate();
    }

    #[wasm_bindgen]
    pub fn ingredient_count(&self) -> u32 {
        self.lock_session()
            .plate()
            .map_or(0, |plate| plate.ingredient_count())
    }

    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.lock_session()
            .plate()
            .map_or(false, |plate| plate.is_complete())
    }

    #[wasm_bindgen]
    pub fn fill_amount(&self) -> f32 {
        self.lock_session()
            .plate()
            .map_or(0.0, |plate| plate.fill_amount())
    }

    #[wasm_bindgen]
    pub fn get_kitchen_state_json(&self) -> Result<JsValue, JsValue> {
        state_getter::get_kitchen_state_json(&self.lock_session())
    }

    #[wasm_bindgen]
    pub fn load_scene_by_name(&self, name: &str) -> Result<bool, JsValue> {
        let session = self.lock_session();
        let mut director = session
            .director()
            .lock()
            .map_err(|e| JsValue::from_str(&format!("Failed to lock scene director: {}", e)))?;
        Ok(director.load_by_name(name))
    }

    #[wasm_bindgen]
    pub fn load_scene_by_index(&self, index: usize) -> Result<bool, JsValue> {
        let session = self.lock_session();
        let mut director = session
            .director()
            .lock()
            .map_err(|e| JsValue::from_str(&format!("Failed to lock scene director: {}", e)))?;
        Ok(director.load_by_index(index))
    }

    #[wasm_bindgen]
    pub fn reload_current_scene(&self) -> Result<(), JsValue> {
        let session = self.lock_session();
        let mut director = session
            .director()
            .lock()
            .map_err(|e| JsValue::from_str(&format!("Failed to lock scene director: {}", e)))?;
        director.reload_current();
        Ok(())
    }
}

impl GameApp {
    fn lock_session(&self) -> MutexGuard<'_, KitchenSession> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("KitchenSession mutex poisoned. Recovering...");
                poisoned.into_inner()
            }
        }
    }
}

impl Drop for GameApp {
    fn drop(&mut self) {
        if let Err(e) = browser_event_manager::detach_listeners(&self.listeners) {
            warn!("GameApp: failed to detach listeners on drop: {:?}", e);
        }
    }
}

/// Canvas 要素と 2D コンテキストを取ってくる。
fn initialize_canvas(canvas_id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let document = web_sys::window()
        .ok_or("Failed to get window")?
        .document()
        .ok_or("Failed to get document")?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("Canvas element '{}' not found", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("Element '{}' is not a canvas", canvas_id)))?;
    let context = canvas
        .get_context("2d")?
        .ok_or("Failed to get 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Context is not CanvasRenderingContext2d"))?;
    Ok((canvas, context))
}
