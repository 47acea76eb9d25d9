//! snipbin Web Application
//!
//! Wires the stores, session manager, and middleware pipeline into one
//! router. The pipeline order, outermost first:
//!
//! recovery (catch panics) -> request logging -> deadline -> security
//! headers -> session load -> CSRF guard -> current-user load -> routes
//! (with the route guard on protected ones) -> handler

pub mod middleware;
pub mod router;
