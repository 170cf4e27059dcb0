use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    cli::Cli,
    data::error::get_json,
    domain::weather::{GeocodeResolution, Location},
};

/// Queries shorter than this are answered locally with no results.
pub const MIN_QUERY_CHARS: usize = 2;
pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.geo_url.clone(), cli.api_key().unwrap_or_default())
    }

    /// City search for the search sheet, at most [`SEARCH_LIMIT`] results in
    /// provider order.
    pub async fn search(&self, query: &str) -> Result<Vec<Location>> {
        let query = query.trim();
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let limit = SEARCH_LIMIT.to_string();
        let results: Vec<GeoResult> = get_json(
            self.client.get(format!("{}/direct", self.base_url)).query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ]),
        )
        .await
        .context("city search request failed")?;

        Ok(results.into_iter().map(GeoResult::into_location).collect())
    }

    /// Picks a location for a city given on the command line.
    pub async fn resolve(&self, city: String) -> Result<GeocodeResolution> {
        let results = self.search(&city).await?;
        if results.is_empty() {
            return Ok(GeocodeResolution::NotFound(city));
        }

        let mut ranked = rank_locations(results, &city);
        let top = ranked.remove(0);
        if let Some(second) = ranked.first()
            && is_ambiguous(&top, second)
        {
            let mut options = vec![top.location];
            options.extend(ranked.into_iter().map(|s| s.location).take(SEARCH_LIMIT - 1));
            return Ok(GeocodeResolution::NeedsDisambiguation(options));
        }

        Ok(GeocodeResolution::Selected(top.location))
    }

    /// Name for a coordinate pair; `None` when the provider knows no place there.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Location>> {
        let results: Vec<GeoResult> = get_json(
            self.client.get(format!("{}/reverse", self.base_url)).query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ]),
        )
        .await
        .context("reverse geocoding request failed")?;

        Ok(results.into_iter().next().map(|entry| Location {
            latitude: lat,
            longitude: lon,
            ..entry.into_location()
        }))
    }
}

#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl GeoResult {
    fn into_location(self) -> Location {
        Location {
            name: self.name,
            country: self.country,
            state: self.state,
            latitude: self.lat,
            longitude: self.lon,
        }
    }
}

#[derive(Debug, Clone)]
struct ScoredLocation {
    location: Location,
    exact_name_match: bool,
    api_order: usize,
}

fn rank_locations(results: Vec<Location>, city: &str) -> Vec<ScoredLocation> {
    let normalized_city = normalize(city);
    let mut scored = results
        .into_iter()
        .enumerate()
        .map(|(api_order, location)| ScoredLocation {
            exact_name_match: normalize(&location.name) == normalized_city,
            location,
            api_order,
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| {
        b.exact_name_match
            .cmp(&a.exact_name_match)
            .then_with(|| a.api_order.cmp(&b.api_order))
    });
    scored
}

/// Two exact name matches in different countries or states cannot be told
/// apart without asking.
fn is_ambiguous(top: &ScoredLocation, second: &ScoredLocation) -> bool {
    top.exact_name_match
        && second.exact_name_match
        && (top.location.country != second.location.country
            || top.location.state != second.location.state)
}
