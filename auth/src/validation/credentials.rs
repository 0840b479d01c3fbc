use super::errors::ValidationError;

/// Symbols allowed in the local part besides ASCII letters and digits.
const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

const MAX_LABEL_LENGTH: usize = 63;

/// Shape checks for login input, run before any store access.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate login fields.
    ///
    /// Checks, in order: email not blank, email format, password not blank.
    ///
    /// # Errors
    /// * `EmptyField` - Email or password is blank after trimming whitespace
    /// * `InvalidEmailFormat` - Email is not a `local@domain` address
    pub fn validate(&self, email: &str, password: &str) -> Result<(), ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email"));
        }

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        if password.trim().is_empty() {
            return Err(ValidationError::EmptyField("password"));
        }

        Ok(())
    }
}

/// Check an address against the `local@domain` pattern.
///
/// The local part uses ASCII alphanumerics and [`LOCAL_PART_SYMBOLS`]; the
/// domain is dot-separated labels of 1 to 63 alphanumerics or hyphens, with
/// no hyphen at either end of a label.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local)
        && domain.split('.').all(is_valid_label)
        && email_address::EmailAddress::is_valid(email)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
