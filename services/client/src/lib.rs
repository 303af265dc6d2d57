//! services/client/src/lib.rs
//!
//! The PairPad client: REST adapters for the backend ports, the application
//! state, and the flows that drive the forms and the shared dashboard.

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod flows;
pub mod state;
