//! # Sweepy - Sweepstakes TUI
//!
//! A terminal user interface for running office sweepstakes on top of the
//! sweepy backend: create a sweepstake from a betting market, browse open
//! ones, and follow participants' odds as they move.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle, event loop and background requests
//! - **UI**: Layout and rendering logic
//! - **API**: Backend HTTP client behind the [`api::SweepstakeApi`] trait
//! - **State**: Centralized store with a pure reducer
//! - **Operations**: Runs the effects the reducer asks for
//! - **Events**: Input handling and key bindings
//! - **Config**: Layered configuration and theme

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod operations;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
