//! Client-credentials authentication: credentials, bearer tokens, and the token manager.

pub mod credentials;
pub mod manager;
pub mod token;

pub use credentials::*;
pub use manager::*;
pub use token::*;
