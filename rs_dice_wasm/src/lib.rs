// rs_dice_wasm/src/lib.rs
// This is the public API for the wasm wrapper of the dice library.

use wasm_bindgen::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_dice::apis::DiceRoller;
use rs_dice::correction::PresentationPose;
use rs_dice::errors::DiceError;

fn to_js(error: DiceError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub struct WasmDiceRoller {
    roller: DiceRoller,
}

#[wasm_bindgen]
impl WasmDiceRoller {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            roller: DiceRoller::new(),
        }
    }

    #[wasm_bindgen]
    pub fn trigger_throw(&mut self, vx: f64, vy: f64, vz: f64, wx: f64, wy: f64, wz: f64) -> Result<(), JsValue> {
        self.roller.trigger_throw((vx, vy, vz), (wx, wy, wz))
            .map_err(to_js)
    }

    /// Pose to draw this frame, if any.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> Option<WasmPose> {
        let atlas = self.roller.atlas().clone();
        self.roller.tick().map(|pose| WasmPose::from_presentation(&pose, &atlas))
    }

    /// Runs a throw to the end and returns the face it landed on.
    #[wasm_bindgen]
    pub fn run_throw(&mut self, vx: f64, vy: f64, vz: f64, wx: f64, wy: f64, wz: f64) -> Result<u32, JsValue> {
        self.roller.run_throw_to_completion((vx, vy, vz), (wx, wy, wz))
            .map(|outcome| outcome.face)
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn steer_to(&mut self, face: u32) -> Result<(), JsValue> {
        self.roller.steer_to(face)
            .map(|_| ())
            .map_err(to_js)
    }

    /// Throws in a random direction and shows `face` once it lands.
    #[wasm_bindgen]
    pub fn roll_with_outcome(&mut self, face: u32) -> Result<u32, JsValue> {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut rng = StdRng::seed_from_u64(seed);
        let steered = self.roller.roll_with_outcome(face, &mut rng).map_err(to_js)?;
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "physics rolled {}, showing {}",
            steered.outcome.face, face
        )));
        Ok(steered.outcome.face)
    }

    #[wasm_bindgen]
    pub fn replay(&mut self) -> Result<(), JsValue> {
        self.roller.replay().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn cancel(&mut self) {
        self.roller.cancel();
    }

    /// Physical face of the resolved throw, if there is one.
    #[wasm_bindgen(getter)]
    pub fn face(&self) -> Option<u32> {
        self.roller.outcome().map(|outcome| outcome.face)
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.roller.throw_state().is_some_and(|state| state.is_running())
    }
}

impl Default for WasmDiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

/// A displayed pose: position, orientation (w, x, y, z) and the face shown on top.
#[wasm_bindgen]
pub struct WasmPose {
    position: (f64, f64, f64),
    orientation: (f64, f64, f64, f64),
    displayed_face: u32,
    physical_face: u32,
}

impl WasmPose {
    fn from_presentation(pose: &PresentationPose, atlas: &rs_dice::faces::FaceAtlas) -> Self {
        let displayed = pose.displayed();
        let q = displayed.orientation;
        WasmPose {
            position: displayed.position,
            orientation: (q.w, q.x, q.y, q.z),
            displayed_face: pose.displayed_face(atlas),
            physical_face: pose.physical_face(atlas),
        }
    }
}

#[wasm_bindgen]
impl WasmPose {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.position.0
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.position.1
    }

    #[wasm_bindgen(getter)]
    pub fn z(&self) -> f64 {
        self.position.2
    }

    #[wasm_bindgen(getter)]
    pub fn qw(&self) -> f64 {
        self.orientation.0
    }

    #[wasm_bindgen(getter)]
    pub fn qx(&self) -> f64 {
        self.orientation.1
    }

    #[wasm_bindgen(getter)]
    pub fn qy(&self) -> f64 {
        self.orientation.2
    }

    #[wasm_bindgen(getter)]
    pub fn qz(&self) -> f64 {
        self.orientation.3
    }

    #[wasm_bindgen(getter)]
    pub fn displayed_face(&self) -> u32 {
        self.displayed_face
    }

    #[wasm_bindgen(getter)]
    pub fn physical_face(&self) -> u32 {
        self.physical_face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_run_throw_lands_on_a_face() {
        let mut roller = WasmDiceRoller::new();
        let face = roller.run_throw(1.0, 0.0, 0.5, 3.0, 0.0, 2.0).unwrap();
        assert!((1..=6).contains(&face));
        assert_eq!(roller.face(), Some(face));
        assert!(!roller.is_running());
    }

    #[wasm_bindgen_test]
    fn test_steering_rejects_unknown_face() {
        let mut roller = WasmDiceRoller::new();
        assert!(roller.steer_to(3).is_err());
        roller.run_throw(1.0, 0.0, 0.5, 3.0, 0.0, 2.0).unwrap();
        assert!(roller.steer_to(9).is_err());
        assert!(roller.steer_to(3).is_ok());
        assert!(roller.tick().is_some());
    }
}
