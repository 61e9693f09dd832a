use reqwest::Client;
use smart_ambulance_core::service::{
    decode_health, decode_response, service_url, EmergencyPayload, ServiceHealth, EMERGENCY_PATH,
    HEALTH_PATH,
};
use smart_ambulance_core::{EmergencyRequest, EmergencyResult, RequestError};
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport for the hospital routing service.
#[derive(Debug, Clone)]
pub struct HttpEmergencyClient {
    http: Client,
    base_url: String,
}

impl HttpEmergencyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(network_failure)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /emergency` with the origin. Any HTTP status is decoded; only
    /// transport failures become `NetworkFailure`.
    pub async fn find_nearest_hospital(
        &self,
        request: &EmergencyRequest,
    ) -> Result<EmergencyResult, RequestError> {
        let url = service_url(&self.base_url, EMERGENCY_PATH);
        debug!(%url, origin = %request.origin, "posting emergency request");

        let response = self
            .http
            .post(&url)
            .json(&EmergencyPayload::from(request))
            .send()
            .await
            .map_err(network_failure)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_failure)?;
        debug!(status, bytes = body.len(), "emergency response received");

        decode_response(status, &body)
    }

    pub async fn check_health(&self) -> Result<ServiceHealth, RequestError> {
        let url = service_url(&self.base_url, HEALTH_PATH);
        let response = self.http.get(&url).send().await.map_err(network_failure)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_failure)?;

        let health = decode_health(status, &body)?;
        info!(%url, status = %health.status, "service health checked");
        Ok(health)
    }
}

fn network_failure(error: reqwest::Error) -> RequestError {
    RequestError::NetworkFailure(error.to_string())
}
