//! LinkedIn API adapters

mod posts;

pub use posts::{
    DEFAULT_API_VERSION, DEFAULT_AUTHOR_NAMESPACE, DEFAULT_BASE_URL, LinkedInCredentials,
    LinkedInPublisher,
};
