//! Error types surfaced at the page/wasm boundary.
//!
//! Effect handlers never return errors: a failed style write only loses that
//! one visual update. Errors exist for page startup and configuration.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectsError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    /// A DOM call threw; carries the stringified JS exception.
    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("page effects already started")]
    AlreadyStarted,
}

impl EffectsError {
    pub(crate) fn dom(err: JsValue) -> Self {
        EffectsError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<EffectsError> for JsValue {
    fn from(err: EffectsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = EffectsError> = std::result::Result<T, E>;
