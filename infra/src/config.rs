//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Defaults of the environment preset (`AppConfig::for_environment`)
//! 2. `config.<environment>.toml` in the configuration directory, if present
//! 3. `WALLET_USERS_*` environment variables, `__` separating nested keys
//!    (e.g. `WALLET_USERS_JWT__SIGNING_METHOD=HS256`)

use std::path::Path;

use ::config::{Config, Environment as EnvSource, File};
use wu_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "WALLET_USERS";

/// Load configuration for the environment named by `WALLET_USERS_ENV`
///
/// A `.env` file in the working directory is loaded first when present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    load_config_from(environment, Path::new("."))
}

/// Load configuration for `environment`, reading its file from `config_dir`
pub fn load_config_from(
    environment: Environment,
    config_dir: &Path,
) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::for_environment(environment);
    let file = config_dir.join(environment.config_file());

    let config = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(file.as_path()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    tracing::info!(
        environment = %app_config.environment,
        signing_method = %app_config.jwt.signing_method,
        ttl_policy = ?app_config.token_ttl.policy,
        "Configuration loaded"
    );

    Ok(app_config)
}
