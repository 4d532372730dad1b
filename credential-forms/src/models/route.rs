/// Screens the controllers can send the host to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    /// Code verification after signup, carrying the international phone number.
    VerifyCode { phone: String },
    Home,
}
