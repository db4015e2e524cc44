pub mod path;
pub mod request;

pub use path::SubscriptionKeyPath;
pub use request::{ValidatedJson, ValidatedQuery};
