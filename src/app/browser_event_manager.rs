// src/app/browser_event_manager.rs
//! Handles attaching and detaching browser event listeners (mousedown, mousemove, mouseup).

use std::sync::{Arc, Mutex};

use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, EventTarget, HtmlCanvasElement, MouseEvent};

use crate::components::Position;
use crate::session::KitchenSession;

/// 登録済みのリスナー。外す時に同じクロージャが必要なので、ターゲットとイベント名ごと覚えておく。
pub(crate) struct RegisteredListener {
    target: EventTarget,
    event_name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub(crate) type ListenerList = Arc<Mutex<Vec<RegisteredListener>>>;

/// Canvas の CSS 上のサイズと内部解像度の比。ドラッグ量をこれで割ってキャンバス座標に直す。
pub(crate) fn canvas_scale_factor(canvas: &HtmlCanvasElement) -> f32 {
    let rect = canvas.get_bounding_client_rect();
    if canvas.width() == 0 {
        return 1.0;
    }
    (rect.width() / canvas.width() as f64) as f32
}

/// クライアント座標をキャンバス座標に変換する。
pub(crate) fn to_canvas_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Position {
    let rect = canvas.get_bounding_client_rect();
    let scale = crate::logic::drag::sanitize_scale_factor(canvas_scale_factor(canvas));
    Position::new(
        (event.client_x() as f64 - rect.left()) as f32 / scale,
        (event.client_y() as f64 - rect.top()) as f32 / scale,
    )
}

fn lock_session<'a>(
    session_arc: &'a Arc<Mutex<KitchenSession>>,
) -> std::sync::MutexGuard<'a, KitchenSession> {
    match session_arc.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("KitchenSession mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

fn add_listener(
    listeners: &ListenerList,
    target: EventTarget,
    event_name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
    let mut list = listeners
        .lock()
        .map_err(|e| JsValue::from_str(&format!("Failed to lock listener list: {}", e)))?;
    list.push(RegisteredListener {
        target,
        event_name,
        closure,
    });
    debug!("  Attached {} listener.", event_name);
    Ok(())
}

/// mousedown は Canvas に、mousemove / mouseup は Window に付ける。
/// (ドラッグ中にポインタが Canvas の外に出ても離したことを検知できるように)
pub(crate) fn attach_listeners(
    session_arc: Arc<Mutex<KitchenSession>>,
    canvas: HtmlCanvasElement,
    listeners: &ListenerList,
) -> Result<(), JsValue> {
    info!("Attaching pointer listeners");
    let window = window().ok_or("Failed to get window")?;

    // --- MouseDown Listener ---
    {
        let session_arc = Arc::clone(&session_arc);
        let canvas_clone = canvas.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(mouse_event) = event.dyn_into::<MouseEvent>() {
                let point = to_canvas_position(&canvas_clone, &mouse_event);
                if let Some(item) = lock_session(&session_arc).pointer_down(point) {
                    debug!("mousedown picked up {}", item);
                }
            } else {
                error!("Failed to cast event to MouseEvent in mousedown listener");
            }
        }) as Box<dyn FnMut(Event)>);
        add_listener(listeners, canvas.clone().into(), "mousedown", closure)?;
    }

    // --- MouseMove Listener ---
    {
        let session_arc = Arc::clone(&session_arc);
        let canvas_clone = canvas.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(mouse_event) = event.dyn_into::<MouseEvent>() {
                let mut session = lock_session(&session_arc);
                if session.active_drag().is_none() {
                    return;
                }
                let point = to_canvas_position(&canvas_clone, &mouse_event);
                let delta = Position::new(
                    mouse_event.movement_x() as f32,
                    mouse_event.movement_y() as f32,
                );
                session.pointer_move(point, delta, canvas_scale_factor(&canvas_clone));
            } else {
                error!("Failed to cast event to MouseEvent in mousemove listener");
            }
        }) as Box<dyn FnMut(Event)>);
        add_listener(listeners, window.clone().into(), "mousemove", closure)?;
    }

    // --- MouseUp Listener ---
    {
        let session_arc = Arc::clone(&session_arc);
        let canvas_clone = canvas;
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(mouse_event) = event.dyn_into::<MouseEvent>() {
                let point = to_canvas_position(&canvas_clone, &mouse_event);
                let outcome = lock_session(&session_arc).pointer_up(point);
                debug!("mouseup: {:?}", outcome);
            } else {
                error!("Failed to cast event to MouseEvent in mouseup listener");
            }
        }) as Box<dyn FnMut(Event)>);
        add_listener(listeners, window.into(), "mouseup", closure)?;
    }

    Ok(())
}

/// 付けたリスナーを全部外す。クロージャはここで drop される。
pub(crate) fn detach_listeners(listeners: &ListenerList) -> Result<(), JsValue> {
    let drained: Vec<RegisteredListener> = listeners
        .lock()
        .map_err(|e| JsValue::from_str(&format!("Failed to lock listener list: {}", e)))?
        .drain(..)
        .collect();
    for listener in drained {
        listener.target.remove_event_listener_with_callback(
            listener.event_name,
            listener.closure.as_ref().unchecked_ref(),
        )?;
        debug!("  Detached {} listener.", listener.event_name);
    }
    Ok(())
}
