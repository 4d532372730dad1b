/// Short confirmation shown to the person after a successful intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn code_sent() -> Self {
        Self {
            title: "OTP Sent",
            message: "A 6-digit code has been sent to your number.".to_string(),
        }
    }

    pub fn logged_in(method: super::AuthMethod) -> Self {
        Self {
            title: "Login Successful",
            message: format!("Logged in using {}", method),
        }
    }
}
