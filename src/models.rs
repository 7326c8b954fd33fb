//! Public Twine models.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the domain logic lives. The [`twine_core::Model`] implementation is a
//! thin adapter that delegates to it. Types from `core` that callers need are
//! re-exported from the model module.

pub mod cpinn;
