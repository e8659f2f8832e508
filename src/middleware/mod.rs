pub mod authorize;
pub mod response;

pub use authorize::{authorize_middleware, AuthorizedCaller};
pub use response::{ApiResponse, ApiResult};
