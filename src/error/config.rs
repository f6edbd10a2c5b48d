use thiserror::Error;

/// Errors raised while building the application configuration from the
/// environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A URL-valued environment variable failed to parse.
    #[error("Invalid URL in {name}: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },
}
