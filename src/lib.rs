//! Veridict library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Classify`], [`ZeroShotClassifier`], [`ZeroShotConfig`] - Zero-shot
//!   classification over an NLI checkpoint (stub mode without weights)
//! - [`Classification`], [`LabelScore`] - Classifier output
//! - [`decide`], [`Prediction`], [`Verdict`] - Decision policy
//! - [`gateway`] - Axum router, handlers and handler state
//!
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod policy;

pub use classifier::{
    Classification, Classify, ClassifierError, LabelScore, MAX_SEQ_LEN, NliClassifier,
    ZeroShotClassifier, ZeroShotConfig,
};
#[cfg(any(test, feature = "mock"))]
pub use classifier::MockClassifier;

pub use config::{Config, ConfigError};
pub use constants::{
    HYPOTHESIS_TEMPLATE, LABEL_FAKE, LABEL_TRUTHFUL, MODEL_NAME, TRUTH_THRESHOLD,
    VERIDICT_STATUS_HEADER,
};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use policy::{Prediction, PolicyError, Verdict, decide};
