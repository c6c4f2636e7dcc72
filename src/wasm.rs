//! JavaScript bindings. Snapshots cross the boundary as plain objects.

use once_cell::sync::OnceCell;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::Game;
use crate::types::Side;

static LOGGER: OnceCell<()> = OnceCell::new();

/// Installs the console logger on first call.
#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    LOGGER.get_or_init(|| {
        // Fails only when the host already installed a logger.
        let _ = console_log::init_with_level(log::Level::Debug);
    });
    true
}

#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a `GameConfig`-shaped object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let inner = Game::new_game(config).map_err(to_js_error)?;
        Ok(WasmGame { inner })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.state())
    }

    #[wasm_bindgen(js_name = applyHumanMove)]
    pub fn apply_human_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let state = self.inner.apply_human_move(row, col).map_err(to_js_error)?;
        to_js(&state)
    }

    #[wasm_bindgen(js_name = requestComputerMove)]
    pub fn request_computer_move(&mut self) -> Result<JsValue, JsValue> {
        let state = self.inner.request_computer_move().map_err(to_js_error)?;
        to_js(&state)
    }

    #[wasm_bindgen(js_name = expireTurn)]
    pub fn expire_turn(&mut self) -> Result<JsValue, JsValue> {
        let state = self.inner.expire_turn().map_err(to_js_error)?;
        to_js(&state)
    }

    /// `side` is `"black"` or `"white"`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, side: JsValue) -> Result<JsValue, JsValue> {
        let side: Side = serde_wasm_bindgen::from_value(side)?;
        to_js(&self.inner.legal_moves(side))
    }

    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    /// `[black, white]` disc counts.
    pub fn score(&self) -> Vec<u8> {
        let (black, white) = self.inner.score();
        vec![black, white]
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.result())
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        self.inner.reset();
        to_js(&self.inner.state())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    Ok(value.serialize(&serializer)?)
}

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
