//! API layer: handlers, DTOs, routes, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
