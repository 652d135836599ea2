use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Missing input: {0}")]
    MissingField(&'static str),

    #[error("Invalid number for {field}: {value}")]
    NotANumber {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LayoutError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// 入力値起因のエラーか（設定ファイルやI/Oではなく）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidInput { .. }
                | LayoutError::MissingField(_)
                | LayoutError::NotANumber { .. }
        )
    }
}

impl From<toml::de::Error> for LayoutError {
    fn from(err: toml::de::Error) -> Self {
        LayoutError::Config(format!("TOML parse error: {}", err))
    }
}
