pub mod counter;
pub mod error;
pub mod middleware;
pub mod observer;
pub mod registry;

pub use counter::{HTTP_REQUESTS_TOTAL, RequestCounter};
pub use error::MetricsError;
pub use middleware::metrics_middleware;
pub use registry::{Exposition, MetricsRegistry};
