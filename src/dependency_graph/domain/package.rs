use crate::shared::Result;

/// Maximum length for package names accepted from users
const MAX_PACKAGE_NAME_LENGTH: usize = 128;

/// NewType wrapper for a user-supplied root package name
///
/// Graph node ids coming from providers are opaque and never go through
/// this type; it only guards names typed by users (CLI, config file).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Accepts `[A-Za-z0-9][A-Za-z0-9._-]{0,127}`
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        let mut chars = name.chars();
        let starts_alphanumeric = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
        let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

        if !starts_alphanumeric || !rest_valid {
            anyhow::bail!(
                "Package name '{}' is invalid. Allowed: letters, numbers, '.', '_', '-'; must start with a letter or number.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
