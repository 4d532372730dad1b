//! Collaborators the form controllers call into.
//!
//! Real hosts plug in their backend client and navigation stack; the mock
//! implementations record calls and can be told to fail.

mod accounts;
mod auth;
mod codes;
mod navigation;

pub use accounts::{AccountCreator, MockAccountCreator};
pub use auth::{Authenticator, MockAuthenticator};
pub use codes::{CodeSender, MockCodeSender};
pub use navigation::{MockNavigator, NavigationEvent, Navigator};
