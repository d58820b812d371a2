pub mod cors;
pub mod rate_limit;

pub use cors::build_cors;
pub use rate_limit::RateLimit;
