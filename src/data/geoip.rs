use std::{future::Future, time::Duration};

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use tracing::{debug, warn};

use crate::{
    cli::Cli,
    data::{error::get_json, geocode::GeocodeClient},
    domain::weather::Location,
};

/// Name used when a position could not be named.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Source of the "current location" used when no city is given.
pub trait LocationProvider {
    fn current_location(&self) -> impl Future<Output = Result<Location>> + Send;
}

/// Approximates the device position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    client: Client,
    url: String,
}

impl IpLocationProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.ip_location_url.clone())
    }
}

impl LocationProvider for IpLocationProvider {
    async fn current_location(&self) -> Result<Location> {
        let response: IpApiResponse = get_json(self.client.get(&self.url))
            .await
            .context("location lookup failed")?;
        response.into_location()
    }
}

/// Current position from `provider`, named through reverse geocoding when the
/// provider could not name it.
pub async fn locate<P: LocationProvider>(
    provider: &P,
    geocoder: &GeocodeClient,
) -> Result<Location> {
    let position = provider.current_location().await?;
    if position.name != UNKNOWN_PLACE {
        return Ok(position);
    }
    match geocoder.reverse(position.latitude, position.longitude).await {
        Ok(Some(named)) => {
            debug!(name = %named.name, "current location named by reverse geocoding");
            Ok(named)
        }
        Ok(None) => Ok(position),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "reverse geocoding failed");
            Ok(position)
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    country_code: Option<String>,
    region: Option<String>,
}

impl IpApiResponse {
    fn into_location(self) -> Result<Location> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(anyhow!("location lookup returned no coordinates"));
        };
        let name = self
            .city
            .filter(|city| !city.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string());
        Ok(Location {
            name,
            country: self.country_code,
            state: self.region,
            latitude,
            longitude,
        })
    }
}
