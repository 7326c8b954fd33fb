//! # Twine cPINN
//!
//! Domain-decomposition models for conservative physics-informed neural
//! networks (cPINNs), built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! A rectangular domain is split into axis-aligned subdomains. Each subdomain
//! gets its own externally trained network, and this crate supplies the
//! bookkeeping around them: adjacency, interface segments, model lookup and
//! composite evaluation.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! Modules in [`support`] are part of the public API, but their APIs are not
//! stable. Model-specific utility code stays in each model's private `core`
//! module until it is useful elsewhere.

pub mod models;
pub mod support;
