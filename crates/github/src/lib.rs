pub mod client;
pub mod error;
pub mod platform;
pub mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, Result};
pub use platform::HostingPlatform;
pub use types::{
    CreateRepoRequest, EnablePagesRequest, PagesSite, PagesSource, RepoConfig, Repository,
};
