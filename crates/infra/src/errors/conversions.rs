//! Conversions from external infrastructure errors into domain errors.

use peopleai_domain::PeopleAiError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PeopleAiError);

impl From<InfraError> for PeopleAiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PeopleAiError> for InfraError {
    fn from(value: PeopleAiError) -> Self {
        InfraError(value)
    }
}

trait IntoPeopleAiError {
    fn into_peopleai(self) -> PeopleAiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PeopleAiError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleAiError for HttpError {
    fn into_peopleai(self) -> PeopleAiError {
        if self.is_timeout() {
            return PeopleAiError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PeopleAiError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return PeopleAiError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        PeopleAiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_peopleai())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → PeopleAiError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleAiError for std::io::Error {
    fn into_peopleai(self) -> PeopleAiError {
        match self.kind() {
            std::io::ErrorKind::NotFound => PeopleAiError::Config(format!("file not found: {self}")),
            std::io::ErrorKind::PermissionDenied => {
                PeopleAiError::Config(format!("permission denied: {self}"))
            }
            _ => PeopleAiError::Internal(format!("I/O failure: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_peopleai())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_timeout_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .mount(&server)
            .await;

        let client = Client::builder().timeout(Duration::from_millis(20)).no_proxy().build().unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();

        let mapped: PeopleAiError = InfraError::from(err).into();
        assert!(matches!(mapped, PeopleAiError::Network(msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn invalid_request_maps_to_invalid_input() {
        let err = Client::new().get("not a url").build().unwrap_err();

        let mapped: PeopleAiError = InfraError::from(err).into();
        assert!(matches!(mapped, PeopleAiError::InvalidInput(msg) if msg.contains("invalid HTTP request")));
    }

    #[test]
    fn io_other_maps_to_internal_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let mapped: PeopleAiError = InfraError::from(err).into();
        assert!(matches!(mapped, PeopleAiError::Internal(msg) if msg.contains("disk on fire")));
    }

    #[test]
    fn io_not_found_maps_to_config_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "peopleai.toml");
        let mapped: PeopleAiError = InfraError::from(err).into();
        assert!(matches!(mapped, PeopleAiError::Config(msg) if msg.contains("peopleai.toml")));
    }
}
