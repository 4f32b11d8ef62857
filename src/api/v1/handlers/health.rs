/*
 * Responsibility
 * - GET /health (liveness; mounted outside the auth middleware)
 */
pub async fn health() -> &'static str {
    "ok"
}
