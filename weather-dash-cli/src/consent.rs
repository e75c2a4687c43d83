use async_trait::async_trait;
use inquire::{Confirm, InquireError};
use weather_dash_core::{Coordinates, Geolocator, LocationError};

/// Asks the user before handing the lookup to `inner`.
#[derive(Debug)]
pub struct ConsentGeolocator<G> {
    inner: G,
}

impl<G: Geolocator> ConsentGeolocator<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: Geolocator> Geolocator for ConsentGeolocator<G> {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let answer = Confirm::new("Allow weather-dash to look up your approximate location?")
            .with_default(true)
            .with_help_message("Your public IP address is sent to the geolocation service.")
            .prompt();

        if consent_outcome(answer)? {
            self.inner.current_position().await
        } else {
            Err(LocationError::PermissionDenied)
        }
    }
}

fn consent_outcome(answer: Result<bool, InquireError>) -> Result<bool, LocationError> {
    match answer {
        Ok(allowed) => Ok(allowed),
        Err(InquireError::NotTTY) => Err(LocationError::Unsupported),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(LocationError::Position(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_terminal_means_unsupported() {
        assert!(matches!(consent_outcome(Err(InquireError::NotTTY)), Err(LocationError::Unsupported)));
    }

    #[test]
    fn cancelling_the_prompt_declines() {
        assert!(matches!(consent_outcome(Err(InquireError::OperationCanceled)), Ok(false)));
        assert!(matches!(consent_outcome(Ok(false)), Ok(false)));
        assert!(matches!(consent_outcome(Ok(true)), Ok(true)));
    }
}
