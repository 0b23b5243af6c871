//! CAD model abstraction layer
//!
//! The coordinator drives any backend through the [`CadModel`] trait;
//! [`create_model`] picks the backend from the settings.

pub mod factory;
pub mod traits;

pub use factory::create_model;
pub use traits::CadModel;
