//! Failure type shared by every Entity Store port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by Entity Store adapters.
    pub enum StoreError {
        /// The backing store could not be reached.
        Connection { message: String } => "store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "store conflict: {message}",
    }
}

impl From<StoreError> for crate::domain::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection { message } => {
                tracing::warn!(error = %message, "entity store unavailable");
                Self::service_unavailable("storage is temporarily unavailable")
            }
            StoreError::Query { message } => Self::internal(message),
            StoreError::Conflict { message } => Self::conflict(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("syntax"), ErrorCode::InternalError)]
    #[case(StoreError::conflict("username taken"), ErrorCode::Conflict)]
    fn maps_to_domain_codes(#[case] err: StoreError, #[case] expected: ErrorCode) {
        assert_eq!(crate::domain::Error::from(err).code(), expected);
    }

    #[rstest]
    fn connection_details_are_not_exposed() {
        let err = crate::domain::Error::from(StoreError::connection("10.0.0.5:5432 refused"));
        assert!(!err.message().contains("10.0.0.5"));
    }
}
