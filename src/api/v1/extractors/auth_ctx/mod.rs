/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the AuthCtx published by the access middleware to handlers
 * - axum-specific code lives in core; the context type itself is owned by
 *   services::auth
 */

mod core;

pub use core::CurrentUser;
