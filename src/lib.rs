//! Heading Burst core crate.
//!
//! Turns every heading on a page into a toy: clicking one explodes its
//! letters and reassembles them in new colors, sizes and orientation before
//! the heading hops to a fresh spot. The page background picks a random
//! color scheme on load, pulses on click and runs a "wild colors" burst of
//! color flashes, particles and rings on double- or right-click.
//!
//! The effect engines ([`letters::LetterAnimator`], [`backdrop::Backdrop`])
//! are plain Rust over the [`surface::Surface`] trait and a virtual-clock
//! [`timeline::Timeline`]; only `dom` and `page` touch the browser.

use wasm_bindgen::prelude::*;

pub mod backdrop;
pub mod config;
pub mod error;
pub mod letters;
pub mod random;
pub mod surface;
pub mod timeline;

mod dom;
mod logging;
mod page;
mod styles;

pub use config::EffectsConfig;
pub use error::EffectsError;
pub use page::{background_busy, explode_heading, trigger_wild_colors};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the page effects with the default configuration.
#[wasm_bindgen]
pub fn start_effects() -> Result<(), JsValue> {
    page::start(EffectsConfig::default()).map_err(Into::into)
}

/// Start the page effects with a (partial) JSON configuration.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_effects_with_config(json: &str) -> Result<(), JsValue> {
    let config = EffectsConfig::from_json(json)?;
    page::start(config).map_err(Into::into)
}

/// A random background color from one of the six strategies, as `rgb(r, g, b)`.
#[wasm_bindgen]
pub fn random_background_color() -> String {
    let mut rng = random::from_entropy();
    backdrop::generate_color(&mut rng).to_string()
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
