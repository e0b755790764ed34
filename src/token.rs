use std::{env, fmt, fs, path::Path};

use crate::error::ConfigError;

/// Bot token shared between the platform and the application backend.
///
/// Its `Debug` output never includes the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    /// Wraps a token as is.
    pub fn new(token: impl Into<String>) -> Self {
        BotToken(token.into())
    }

    /// Reads the token from the environment variable `name`.
    pub fn from_env(name: &str) -> Result<Self, ConfigError> {
        let raw = env::var(name).map_err(|_| ConfigError::MissingEnv(name.to_string()))?;
        Self::trimmed(&raw)
    }

    /// Reads the token from a file, ignoring surrounding whitespace such as a
    /// trailing newline.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::trimmed(&raw)
    }

    fn trimmed(raw: &str) -> Result<Self, ConfigError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(BotToken(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for BotToken {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_trims() {
        let path = env::temp_dir().join(format!("webapp-init-data-token-{}", std::process::id()));
        fs::write(&path, "  123:ABC\n").unwrap();

        let token = BotToken::from_file(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(token.unwrap(), BotToken::new("123:ABC"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = BotToken::from_file("/nonexistent/webapp-init-data/token.txt").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_env() {
        env::set_var("WEBAPP_INIT_DATA_TEST_TOKEN", "123:ABC\n");
        assert_eq!(
            BotToken::from_env("WEBAPP_INIT_DATA_TEST_TOKEN").unwrap().as_str(),
            "123:ABC"
        );

        env::set_var("WEBAPP_INIT_DATA_TEST_TOKEN", "   ");
        assert!(matches!(
            BotToken::from_env("WEBAPP_INIT_DATA_TEST_TOKEN"),
            Err(ConfigError::EmptyToken)
        ));

        assert!(matches!(
            BotToken::from_env("WEBAPP_INIT_DATA_TEST_TOKEN_UNSET"),
            Err(ConfigError::MissingEnv(name)) if name == "WEBAPP_INIT_DATA_TEST_TOKEN_UNSET"
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = BotToken::new("123:ABC");

        assert_eq!(format!("{token:?}"), "BotToken(<redacted>)");
    }
}
