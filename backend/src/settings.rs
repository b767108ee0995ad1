//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOG_*` environment variables or a config
//! file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Raised when a setting is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Start-up configuration for the blog server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the server keeps its data in
    /// memory.
    pub database_url: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Resolved listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the configured value is
    /// not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "BLOG_BIND_ADDR",
        "BLOG_DATABASE_URL",
        "BLOG_SESSION_KEY_FILE",
        "BLOG_SESSION_ALLOW_EPHEMERAL",
        "BLOG_COOKIE_SECURE",
        "BLOG_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("blog-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(settings.cookie_secure);
        assert!(!settings.session_allow_ephemeral);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOG_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "BLOG_DATABASE_URL",
                Some("postgres://blog@localhost/blog".to_owned()),
            ),
            ("BLOG_SESSION_KEY_FILE", Some("/tmp/blog_key".to_owned())),
            ("BLOG_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("BLOG_COOKIE_SECURE", Some("false".to_owned())),
            ("BLOG_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://blog@localhost/blog")
        );
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/blog_key"));
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn unparseable_bind_address_is_reported() {
        let _guard = lock_env([("BLOG_BIND_ADDR", Some("localhost".to_owned()))]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("not a socket address");
        assert!(matches!(err, SettingsError::InvalidBindAddr { ref value, .. } if value == "localhost"));
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([("BLOG_DATABASE_URL", Some("   ".to_owned()))]);
        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
