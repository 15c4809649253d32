//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

use ecs_wasm_cooking::components::{Bounds, Position};
use ecs_wasm_cooking::config::GameSettings;
use ecs_wasm_cooking::logger;
use ecs_wasm_cooking::logic::DropOutcome;
use ecs_wasm_cooking::session::KitchenSession;

wasm_bindgen_test_configure!(run_in_browser);

fn center(session: &KitchenSession, entity: ecs_wasm_cooking::ecs::Entity) -> Position {
    let world = session.world();
    let origin = *world.get_component::<Position>(entity).unwrap();
    world.get_component::<Bounds>(entity).unwrap().center(origin)
}

#[wasm_bindgen_test]
fn console_logger_can_be_installed_twice() {
    logger::init(log::LevelFilter::Debug);
    logger::init(log::LevelFilter::Debug);
    log::info!("console logger smoke test");
}

#[wasm_bindgen_test]
fn settings_json_configures_the_session() {
    let settings =
        GameSettings::from_json(r#"{"plate":{"capacity":2},"tray":{"shuffle_seed":5}}"#).unwrap();
    let session = KitchenSession::new(settings);
    assert_eq!(session.plate().unwrap().capacity(), 2);
    assert_eq!(session.layout().ingredients.len(), 5);
}

#[wasm_bindgen_test]
fn filling_the_plate_requests_the_next_scene() {
    let settings =
        GameSettings::from_json(r#"{"plate":{"capacity":1},"tray":{"shuffle_seed":9}}"#).unwrap();
    let mut session = KitchenSession::new(settings);
    let item = session.layout().ingredients[0];
    let plate = session.layout().plate;

    let start = center(&session, item);
    let target = center(&session, plate);
    assert_eq!(session.pointer_down(start), Some(item));
    session.pointer_move(target, target - start, 1.0);
    assert_eq!(session.pointer_up(target), DropOutcome::Consumed { plate });

    let request = (0..120).find_map(|_| session.tick(1.0 / 60.0));
    assert_eq!(request.map(|r| r.name), Some("NextLevel".to_string()));
}
