pub mod errors;
pub mod http;
pub mod models;
pub mod service;
pub mod store;

pub use errors::{AppError, AppResult};
pub use http::{build_router, AppState};
pub use service::TaskService;
pub use store::TaskStore;
