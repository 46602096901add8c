use crate::ConfigError;
use clap::Parser;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.local)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Load `path` into the process environment.
///
/// Variables already set in the environment win over the file. Returns
/// `Ok(false)` when the file does not exist.
pub fn load_env_file(path: &str) -> Result<bool, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(false);
    }

    dotenv::from_path(path).map_err(|source| ConfigError::EnvFileError {
        path: path.to_string(),
        source,
    })?;

    Ok(true)
}
