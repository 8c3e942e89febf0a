pub mod env_var {
    use derive_more::Display;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ENV_VAR: EnvVar = load_env();
    }

    /// Backing store selected with `STORAGE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum StorageKind {
        #[default]
        Postgres,
        Memory,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DatabaseEnv {
        pub host: String,
        pub port: u16,
        pub name: String,
        pub user: String,
        pub password: String,
        pub url: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EnvVar {
        pub port: u16,
        pub auth_token: String,
        pub storage: StorageKind,
        /// Present only when `storage` is `Postgres`.
        pub database: Option<DatabaseEnv>,
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        #[display(fmt = "Missing env var {_0}")]
        Missing(&'static str),
        #[display(fmt = "Invalid {_0} '{_1}'")]
        Invalid(&'static str, String),
    }

    impl std::error::Error for ConfigError {}

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<EnvVar, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let parse_port = |key: &'static str| -> Result<u16, ConfigError> {
            let raw = require(key)?;
            raw.parse::<u16>()
                .map_err(|_| ConfigError::Invalid(key, raw))
        };

        let port = parse_port("PORT")?;
        let auth_token = require("AUTH_TOKEN")?;
        let storage = match lookup("STORAGE") {
            None => StorageKind::default(),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "postgres" => StorageKind::Postgres,
                "memory" => StorageKind::Memory,
                _ => return Err(ConfigError::Invalid("STORAGE", raw)),
            },
        };

        let database = match storage {
            StorageKind::Memory => None,
            StorageKind::Postgres => {
                let host = require("DATABASE_HOST")?;
                let port = parse_port("DATABASE_PORT")?;
                let name = require("DATABASE_NAME")?;
                let user = require("DATABASE_USER")?;
                let password = require("DATABASE_PASSWORD")?;
                let url = format!("postgres://{user}:{password}@{host}:{port}/{name}");
                Some(DatabaseEnv {
                    host,
                    port,
                    name,
                    user,
                    password,
                    url,
                })
            }
        };

        Ok(EnvVar {
            port,
            auth_token,
            storage,
            database,
        })
    }

    fn load_env() -> EnvVar {
        match from_lookup(|key| std::env::var(key).ok()) {
            Ok(env) => env,
            Err(err) => panic!("Invalid environment: {err}"),
        }
    }

    /// Process configuration, loaded on first access.
    ///
    /// # Panic
    ///
    /// Panics if a required variable is missing or malformed.
    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }

}
