//! Application layer services implementing business logic.
//!
//! Services sit between HTTP handlers and the domain capability traits: they
//! pick the alias, call storage, and translate domain errors for the API.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Alias creation and resolution

pub mod services;
