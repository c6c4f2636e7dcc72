//! Browser-side checks for the JavaScript bindings.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use othello::wasm::{WasmGame, wasm_ready};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn ready_can_be_called_twice() {
    assert!(wasm_ready());
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn default_config_starts_with_human_to_move() {
    let game = WasmGame::new(JsValue::UNDEFINED).unwrap();
    let state = game.state().unwrap();

    assert_eq!(get(&state, "phase"), JsValue::from_str("awaitingHumanMove"));
    assert_eq!(get(&state, "blackCount").as_f64(), Some(2.0));
    assert!(get(&state, "lastMove").is_null());
    assert_eq!(game.score(), vec![2, 2]);
}

#[wasm_bindgen_test]
fn config_object_is_honored() {
    let config = Object::new();
    Reflect::set(&config, &"level".into(), &"god".into()).unwrap();
    Reflect::set(&config, &"humanSide".into(), &"white".into()).unwrap();
    Reflect::set(&config, &"seed".into(), &JsValue::from_f64(1.0)).unwrap();

    let mut game = WasmGame::new(config.into()).unwrap();
    let state = game.request_computer_move().unwrap();

    assert_eq!(get(&state, "currentPlayer"), JsValue::from_str("white"));
}

#[wasm_bindgen_test]
fn illegal_move_surfaces_as_error_string() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    let err = game.apply_human_move(0, 0).unwrap_err();

    assert!(err.as_string().unwrap().contains("illegal move"));
}

#[wasm_bindgen_test]
fn legal_moves_are_plain_objects() {
    let game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    let moves = Array::from(&game.legal_moves(JsValue::from_str("black")).unwrap());

    assert_eq!(moves.length(), 4);
    assert_eq!(get(&moves.get(0), "row").as_f64(), Some(2.0));
    assert_eq!(get(&moves.get(0), "col").as_f64(), Some(3.0));
}
