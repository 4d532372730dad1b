/// Country picked for phone entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, e.g. "IN".
    pub iso_code: String,
    /// Calling code without the leading `+`, e.g. "91".
    pub calling_code: String,
}

impl Default for Country {
    fn default() -> Self {
        Self {
            iso_code: "IN".to_string(),
            calling_code: "91".to_string(),
        }
    }
}

impl Country {
    pub fn new(iso_code: impl Into<String>, calling_code: impl Into<String>) -> Self {
        Self {
            iso_code: iso_code.into(),
            calling_code: calling_code.into(),
        }
    }

    /// `+<calling code><national number>`.
    pub fn international(&self, national_number: &str) -> String {
        format!("+{}{}", self.calling_code, national_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_india() {
        let country = Country::default();
        assert_eq!(country.iso_code, "IN");
        assert_eq!(country.international("9876543210"), "+919876543210");
    }

    #[test]
    fn test_other_country() {
        let country = Country::new("US", "1");
        assert_eq!(country.international("2025550123"), "+12025550123");
    }
}
