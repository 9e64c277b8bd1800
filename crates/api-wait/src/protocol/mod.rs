// Protocol types - values exchanged with the browser driver
//
// Architecture:
// - Status codes and methods are closed enums; conversions from raw values fail loudly
// - Responses keep raw driver values so any observed traffic can be represented
// - The matcher turns (endpoint, status, method) into a response predicate

pub mod matcher;
pub mod method;
pub mod response;
pub mod status;

pub use matcher::{ApiMatcher, ResponsePredicate};
pub use method::HttpMethod;
pub use response::Response;
pub use status::StatusCode;
