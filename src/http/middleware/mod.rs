//! Request and response middleware.

mod api_key;
mod rate_limit;
mod security_headers;
mod trim_strings;

pub use api_key::{API_KEY_HEADER, require_api_key, requires_api_key};
pub use rate_limit::{RateDecision, RateLimiter, client_address, rate_limit};
pub use security_headers::{API_VERSION, security_headers};
pub use trim_strings::{MAX_BODY_BYTES, trim_request_strings, trim_strings};
