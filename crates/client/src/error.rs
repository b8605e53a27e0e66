/// Errors from the Marvedge API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },

    /// An operation needed the signed-in user before one was loaded.
    #[error("Not signed in")]
    NotSignedIn,

    /// The editor already has a save in flight.
    #[error("A save is already in progress")]
    SaveInProgress,
}

impl ClientError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(e) => e.to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::NotSignedIn => "Please log in first".to_string(),
            ClientError::SaveInProgress => self.to_string(),
        }
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::NotSignedIn | ClientError::SaveInProgress => None,
        }
    }
}
