// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no auth) → Protected (bearer token required)
pub mod protected;
pub mod public;
