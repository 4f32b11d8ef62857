/*
 * Responsibility
 * - entry points for router-level middleware
 * - each submodule exposes an `apply`-style function
 */
pub mod auth;
pub mod cors;
pub mod http;
