//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click enrichment and persistence
//!
//! # Click Processing Flow
//!
//! 1. The resolver accepts a redirect request and resolves the link
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] enriches the event (geolocation,
//!    user-agent classification) and persists it via
//!    [`repositories::ClickRepository`]
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts implemented elsewhere.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
