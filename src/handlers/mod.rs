// handlers/mod.rs - Handlers by security tier
//
// Public (no session check) → Management (session caller must exist in the
// user directory, or operator bypass is on)
pub mod mgt;
pub mod public;
