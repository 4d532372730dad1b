pub mod country;
pub mod login;
pub mod notice;
pub mod registration;
pub mod route;

pub use country::Country;
pub use login::{AuthMethod, CodeRequest, Credential, LoginForm, LoginRequest, Session};
pub use notice::Notice;
pub use registration::{NewAccount, RegistrationForm, SignupField, PASSWORD_MIN_CHARS};
pub use route::Route;
