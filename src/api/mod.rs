pub mod params;

pub use params::{coerce_int, IntParam, RequestParams};
