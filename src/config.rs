use config::{Config, Environment};
use serde::Deserialize;

/// Process settings, resolved once at startup and passed to handlers via
/// `web::Data` instead of being read from the environment at call sites.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret: String,
    pub session_ttl_min: i64,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let config = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000)?
            .set_default("session_ttl_min", 60)?
            .add_source(Environment::default())
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_applies_defaults_around_required_values() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/starwars_test");
        std::env::set_var("SECRET", "a-test-secret");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.session_ttl_min, 60);
        assert_eq!(settings.database_url, "postgres://localhost/starwars_test");
        assert_eq!(settings.secret, "a-test-secret");
    }
}
