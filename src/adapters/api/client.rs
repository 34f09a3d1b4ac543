//! HTTP client for the metering API
//!
//! This module implements [`MeterSource`] on top of the remote REST service.
//! Requests are issued once; there is no retry loop, a failed call surfaces
//! to the caller as an [`ApiError`].

use super::models::{error_message, MeterDto, NoteRequest, PageBody};
use crate::adapters::source::{MeterPage, MeterSource, PageRequest};
use crate::config::ApiConfig;
use crate::domain::{
    ApiError, ConsumptionPeriod, ExternalData, FairwattError, MeterId, MeterRecord, Result,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Metering API client
///
/// # Example
///
/// ```no_run
/// use fairwatt::adapters::{ApiClient, MeterSource, PageRequest};
/// use fairwatt::config::ApiConfig;
///
/// # async fn example() -> fairwatt::domain::Result<()> {
/// let client = ApiClient::new(&ApiConfig::default())?;
/// let page = client.fetch_page(PageRequest::new(1, 25)).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    base_url: Url,
    client: Client,
    bearer: Option<String>,
}

impl ApiClient {
    /// Creates a client from the `[api]` configuration section
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the metering API");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            FairwattError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        let bearer = config
            .access_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
            .map(|token| format!("Bearer {}", token.expose_secret()));

        Ok(Self {
            base_url,
            client,
            bearer,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FairwattError::Configuration(format!("Invalid endpoint '{path}': {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer {
            Some(value) => request.header("Authorization", value),
            None => request,
        }
    }

    /// GET `path`, with `is_daily` when a period is given, decoded as JSON
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        period: Option<ConsumptionPeriod>,
    ) -> Result<T> {
        let mut url = self.endpoint(path)?;
        if let Some(period) = period {
            url.query_pairs_mut()
                .append_pair("is_daily", &period.is_daily().to_string());
        }
        tracing::debug!(url = %url, "Fetching analytics");

        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, &body).into())
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw)
        .map_err(|e| FairwattError::Configuration(format!("Invalid api.base_url '{raw}': {e}")))
}

fn map_transport_error(err: reqwest::Error) -> FairwattError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string()).into()
    } else {
        ApiError::ConnectionFailed(err.to_string()).into()
    }
}

fn map_status(status: StatusCode, body: &str) -> ApiError {
    let message = error_message(body);
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::UnprocessableEntity { message },
        s if s.is_client_error() => ApiError::ClientError {
            status: s.as_u16(),
            message,
        },
        s => ApiError::ServerError {
            status: s.as_u16(),
            message,
        },
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    serde_json::from_str(&body)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected body: {e}")).into())
}

#[async_trait]
impl MeterSource for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<MeterPage> {
        let mut url = self.endpoint("api/v1/meters")?;
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("per_page", &request.per_page.to_string());

        tracing::debug!(url = %url, "Fetching meter page");

        let response = self.send(self.client.get(url)).await?;
        let body: PageBody = read_json(response).await?;

        let (items, total) = match body {
            PageBody::Items(items) => (items, None),
            PageBody::Envelope { items, total } => (items, total),
        };

        let records: Vec<MeterRecord> = items
            .into_iter()
            .filter_map(|dto| match dto.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(page = request.page, error = %e, "Skipping meter record");
                    None
                }
            })
            .collect();
        crate::log_fetch_complete!(request.page, records.len(), total);

        Ok(MeterPage { records, total })
    }

    async fn fetch_meter(&self, id: MeterId) -> Result<MeterRecord> {
        let url = self.endpoint(&format!("api/v1/meters/{id}"))?;
        let response = self.send(self.client.get(url)).await.map_err(|e| match e {
            FairwattError::Api(ApiError::NotFound(_)) => {
                FairwattError::NotFound(format!("Meter {id} does not exist"))
            }
            other => other,
        })?;
        let dto: MeterDto = read_json(response).await?;
        Ok(dto.into_record()?)
    }

    async fn save_note(&self, id: MeterId, note: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/v1/meters/{id}/note"))?;
        self.send(self.client.put(url).json(&NoteRequest { note }))
            .await?;
        tracing::info!(meter_id = %id, "Note saved");
        Ok(())
    }

    async fn questionable_clients(&self) -> Result<u64> {
        self.get_json("api/v1/questionableClients", None).await
    }

    async fn average_facility_consumption(&self, period: ConsumptionPeriod) -> Result<f64> {
        self.get_json("api/v1/averageFacilityConsumption", Some(period))
            .await
    }

    async fn average_flat_consumption(
        &self,
        facility_id: i64,
        period: ConsumptionPeriod,
    ) -> Result<f64> {
        self.get_json(
            &format!("api/v1/averageFlatConsumption/{facility_id}"),
            Some(period),
        )
        .await
    }

    async fn monthly_consumption(&self) -> Result<Vec<f64>> {
        self.get_json("api/v1/averageMonthConsumption", None).await
    }

    async fn external_data(&self, id: MeterId) -> Result<ExternalData> {
        let data: ExternalData = self.get_json(&format!("api/v1/external-data/{id}"), None).await?;
        tracing::info!(
            meter_id = %id,
            listings = data.avito.len(),
            places = data.maps.len(),
            tax_record = data.fns.is_some(),
            "External data collected"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        format!("metering API at {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_appends_slash() {
        let url = normalize_base_url("https://meters.example.com/svc").unwrap();
        assert_eq!(url.as_str(), "https://meters.example.com/svc/");
        assert_eq!(
            url.join("api/v1/meters").unwrap().as_str(),
            "https://meters.example.com/svc/api/v1/meters"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            map_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[{"msg":"bad"}]}"#),
            ApiError::UnprocessableEntity { ref message } if message == "bad"
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, ""),
            ApiError::ClientError { status: 403, .. }
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError { status: 502, .. }
        ));
    }
}
