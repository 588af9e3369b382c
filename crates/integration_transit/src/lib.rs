//! Transit routing API integration
//!
//! Talks to a third-party public-transit routing API and turns its loosely
//! typed JSON into the domain model.
//!
//! # Architecture
//!
//! - [`wire`] mirrors the upstream JSON exactly, with every field the API
//!   may omit modelled as an `Option`.
//! - [`mapper`] reconstructs [`domain::Route`]s from a [`WireResponse`],
//!   recovering each segment's endpoints from the positional point/move
//!   encoding of the `sections` list.
//! - [`autocomplete`] classifies station/landmark/address suggestions.
//! - [`TransitClient`] is the transport collaborator, implemented over HTTP
//!   by [`HttpTransitClient`].
//!
//! The mappers are pure and never fail: whatever cannot be reconstructed is
//! dropped and the rest is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{HttpTransitClient, TransitClient, TransitConfig, map_response};
//!
//! let client = HttpTransitClient::new(&config)?;
//! let wire = client.search("押上", "三越前", departure).await?;
//! let routes = map_response(&wire);
//! ```

pub mod autocomplete;
mod client;
mod config;
mod error;
pub mod mapper;
pub mod wire;

pub use autocomplete::map_suggestions;
pub use client::{HttpTransitClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use mapper::{map_response, map_response_at};
pub use wire::{WireAutocompleteResponse, WireResponse};
