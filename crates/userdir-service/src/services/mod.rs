//! Service layer

mod context;
mod error;
mod session;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use session::SessionService;
