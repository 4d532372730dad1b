pub mod error;
pub mod login;
pub mod signup;

pub use error::{LoginError, SignupError};
pub use login::{CodeAction, LoginController, LoginOutcome, LoginView};
pub use signup::{SignupController, SignupView};
