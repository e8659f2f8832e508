// handlers/public/mod.rs - Public handlers (no authorization required)

pub mod status;

pub use status::{health, root};
