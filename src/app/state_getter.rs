//! Gets the current kitchen state from the session and converts it to JSON.

use log::{debug, error};
use wasm_bindgen::JsValue;

use crate::session::KitchenSession;

/// キッチンの状態を JSON 文字列にして返す。
pub fn get_kitchen_state_json(session: &KitchenSession) -> Result<JsValue, JsValue> {
    let snapshot = session.snapshot();
    debug!(
        "Collected state for {} ingredients.",
        snapshot.ingredients.len()
    );
    match serde_json::to_string(&snapshot) {
        Ok(json_string) => Ok(JsValue::from_str(&json_string)),
        Err(e) => {
            let error_msg = format!("Failed to serialize kitchen state: {}", e);
            error!("{}", error_msg);
            Err(JsValue::from_str(&error_msg))
        }
    }
}
