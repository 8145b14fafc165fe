use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vaply_player::{check_config, NodePlayer, NodePlayerConfig, Outputs, PlayerProps};

mod console;

pub use console::set_log_level;

/// Embedded node player bound to a host mount target.
#[wasm_bindgen]
pub struct VaplyPlayer {
    core: NodePlayer,
    mount: JsValue,
    on_render: Option<Function>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl VaplyPlayer {
    /// Create a player. `props` is `{ currentAddress?, config }`; `mount` is handed back to the
    /// render callback untouched.
    /// Example:
    ///   new VaplyPlayer(document.getElementById("player"), { config })
    #[wasm_bindgen(constructor)]
    pub fn new(mount: JsValue, props: JsValue) -> Result<VaplyPlayer, JsError> {
        #[cfg(feature = "console_error")]
        console_error_panic_hook::set_once();
        console::init(log::LevelFilter::Warn);

        if jsvalue_is_undefined_or_null(&props) {
            return Err(JsError::new("props error: props are null/undefined"));
        }
        let props: PlayerProps =
            swb::from_value(props).map_err(|e| JsError::new(&format!("props error: {e}")))?;
        let core =
            NodePlayer::from_props(props).map_err(|e| JsError::new(&format!("player error: {e}")))?;
        Ok(VaplyPlayer {
            core,
            mount,
            on_render: None,
        })
    }

    /// Register `callback(mount, frame)`, called after every state change. Pass
    /// undefined/null to remove it.
    #[wasm_bindgen(js_name = onRender)]
    pub fn on_render(&mut self, callback: Option<Function>) {
        self.on_render = callback;
    }

    /// Navigate to `address` (undefined/null starts over at the first node). Returns the events.
    #[wasm_bindgen(js_name = setAddress)]
    pub fn set_address(&mut self, address: Option<String>) -> Result<JsValue, JsError> {
        let out = self
            .core
            .set_address(address.as_deref())
            .map_err(|e| JsError::new(&format!("route error: {e}")))?;
        self.emit(&out)
    }

    /// Content clock tick (seconds). Returns the events.
    #[wasm_bindgen(js_name = timeUpdate)]
    pub fn time_update(&mut self, time: f64) -> Result<JsValue, JsError> {
        let out = self
            .core
            .time_update(time)
            .map_err(|e| JsError::new(&format!("time update error: {e}")))?;
        self.emit(&out)
    }

    #[wasm_bindgen(js_name = closeAnnotation)]
    pub fn close_annotation(&mut self, code: &str) -> Result<JsValue, JsError> {
        let out = self.core.close_annotation(code);
        self.emit(&out)
    }

    /// The media element fired `ended`.
    #[wasm_bindgen(js_name = contentEnded)]
    pub fn content_ended(&mut self) -> Result<JsValue, JsError> {
        let out = self
            .core
            .content_ended()
            .map_err(|e| JsError::new(&format!("route error: {e}")))?;
        self.emit(&out)
    }

    /// Time to assign to the media element for the pending navigation, given its duration.
    /// Returns undefined when the current time should be kept.
    #[wasm_bindgen(js_name = seekTime)]
    pub fn seek_time(&mut self, duration: f64) -> Option<f64> {
        self.core.seek_time(&duration)
    }

    /// Full render state.
    #[wasm_bindgen]
    pub fn frame(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.frame(), "frame")
    }

    #[wasm_bindgen(getter)]
    pub fn address(&self) -> String {
        self.core.address()
    }

    #[wasm_bindgen(getter)]
    pub fn blocked(&self) -> bool {
        self.core.is_blocked()
    }

    #[wasm_bindgen(getter)]
    pub fn mount(&self) -> JsValue {
        self.mount.clone()
    }

    fn emit(&self, out: &Outputs) -> Result<JsValue, JsError> {
        if let Some(callback) = &self.on_render {
            if !out.is_empty() {
                let frame = self.frame()?;
                callback
                    .call2(&JsValue::UNDEFINED, &self.mount, &frame)
                    .map_err(|e| JsError::new(&format!("render callback error: {e:?}")))?;
            }
        }
        to_js(&out.events, "outputs")
    }
}

/// Entry point mirroring the embeddable player's `createPlayer(mount, props)`.
#[wasm_bindgen(js_name = createPlayer)]
pub fn create_player(mount: JsValue, props: JsValue) -> Result<VaplyPlayer, JsError> {
    VaplyPlayer::new(mount, props)
}

/// Decode a configuration and list its non-fatal issues as strings.
#[wasm_bindgen(js_name = checkConfig)]
pub fn check_config_js(config: JsValue) -> Result<JsValue, JsError> {
    let config: NodePlayerConfig =
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?;
    let issues: Vec<String> = check_config(&config)
        .iter()
        .map(ToString::to_string)
        .collect();
    to_js(&issues, "issues")
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
