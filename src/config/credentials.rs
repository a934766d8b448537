// src/config/credentials.rs
use std::fmt;

use super::consts::{ENV_APP_ID, ENV_PASSWORD, ENV_SERIE};
use crate::api::sign::generate_serie;
use crate::error::Error;

/// Application id, shared secret and session series. Immutable once built.
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    password: String,
    serie: String,
}

impl Credentials {
    /// A missing series is replaced by a fresh random one.
    pub fn new(app_id: &str, password: &str, serie: Option<&str>) -> Self {
        let serie = match serie.map(str::trim) {
            Some(s) if !s.is_empty() => s!(s),
            _ => generate_serie(),
        };
        Self { app_id: s!(app_id), password: s!(password), serie }
    }

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, Error> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set (add it to the environment or .env)")))
        };
        let app_id = required(ENV_APP_ID)?;
        let password = required(ENV_PASSWORD)?;
        let serie = lookup(ENV_SERIE);
        Ok(Self::new(&app_id, &password, serie.as_deref()))
    }

    pub fn app_id(&self) -> &str { &self.app_id }
    pub fn password(&self) -> &str { &self.password }
    pub fn serie(&self) -> &str { &self.serie }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("password", &"***")
            .field("serie", &self.serie)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
    }

    #[test]
    fn missing_password_is_a_config_error() {
        let vars = env(&[(ENV_APP_ID, "SW001")]);
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains(ENV_PASSWORD)));
    }

    #[test]
    fn fixed_serie_is_kept() {
        let vars = env(&[(ENV_APP_ID, "SW001"), (ENV_PASSWORD, "pw"), (ENV_SERIE, "ABCDEFGHIJKLMNO")]);
        let creds = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.serie(), "ABCDEFGHIJKLMNO");
        assert_eq!(creds.app_id(), "SW001");
    }

    #[test]
    fn blank_serie_is_generated() {
        let creds = Credentials::new("SW001", "pw", Some("  "));
        assert_eq!(creds.serie().len(), 15);
        assert!(creds.serie().chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("SW001", "hunter2", None);
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
