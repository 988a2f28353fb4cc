//! courtpass-core - Core library for CourtPass
//!
//! This crate contains the session, identity, RPC and catalog logic used by
//! every CourtPass front end. Presentation lives in the front ends; they
//! consume the types and services exported here.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod session;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{FilterState, GiftId, GiftItem, Session, User};
