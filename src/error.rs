//! Error types and handling for the CEP weather service

use thiserror::Error;

/// Failure of one outbound lookup call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// DNS, connection, timeout or body read failures
    #[error("Network error: {0}")]
    Network(String),

    /// The address service answered with a non-success status
    #[error("CEP não encontrado ou inválido")]
    PostalCodeNotFound,

    /// The weather service answered with a non-success status
    #[error("Cidade não encontrada ou inválida")]
    CityNotFound,
}

/// Main error type for the CEP weather service
#[derive(Error, Debug)]
pub enum CepWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// One of the upstream calls failed
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// The address payload could not be decoded
    #[error("Invalid postal code payload: {message}")]
    InvalidPostalCode { message: String },

    /// The address payload decoded but carried no city
    #[error("No city found for postal code")]
    CityMissing,

    /// The weather payload could not be decoded
    #[error("Invalid weather payload: {message}")]
    InvalidCity { message: String },

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CepWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new postal decode error
    pub fn invalid_postal_code<S: Into<String>>(message: S) -> Self {
        Self::InvalidPostalCode {
            message: message.into(),
        }
    }

    /// Create a new weather decode error
    pub fn invalid_city<S: Into<String>>(message: S) -> Self {
        Self::InvalidCity {
            message: message.into(),
        }
    }

    /// Get the message shown on the page.
    ///
    /// Transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CepWeatherError::Lookup(LookupError::Network(_)) => {
                "Erro na requisição: falha ao contatar o serviço externo".to_string()
            }
            CepWeatherError::Lookup(err) => format!("Erro na requisição: {err}"),
            CepWeatherError::InvalidPostalCode { .. } => "CEP inválido".to_string(),
            CepWeatherError::CityMissing => {
                "Cidade não encontrada para o CEP informado.".to_string()
            }
            CepWeatherError::InvalidCity { .. } => "Cidade inválida".to_string(),
            CepWeatherError::Config { .. }
            | CepWeatherError::Render(_)
            | CepWeatherError::Io { .. } => "Erro interno do servidor".to_string(),
        }
    }
}
