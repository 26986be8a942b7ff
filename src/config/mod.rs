//! Configuration module

mod site;

pub use site::GithubConfig;
pub use site::HomeConfig;
pub use site::RootsConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
