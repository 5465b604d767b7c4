use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::model::{DistanceResult, GeoPoint};
use crate::utils::error::Result;
use crate::utils::validation::{validate_latitude, validate_longitude};

pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org/route/v1/driving";

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    /// Fail fast when the engine host is unreachable.
    pub connect_timeout: Duration,
    /// Bounds the whole request even if the connection succeeds but the
    /// response stalls.
    pub request_timeout: Duration,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(3),
        }
    }
}

/// Outcome of a single routing-engine call. Matched exhaustively by the
/// orchestrator; the adapter itself never retries.
#[derive(Debug)]
pub enum RoutingOutcome {
    Success(DistanceResult),
    /// Coordinates failed validation; no network call was made.
    InvalidInput,
    RateLimited,
    Timeout(reqwest::Error),
    ServiceError {
        status: Option<StatusCode>,
        cause: Option<reqwest::Error>,
    },
    MalformedResponse(serde_json::Error),
    /// The engine answered but found no road route between the points.
    Unreachable,
}

/// Client for an OSRM-compatible routing engine.
///
/// Holds one pooled `reqwest::Client`, built once and shared; cloning is
/// cheap and clones share the pool, so one instance serves concurrent
/// callers without locking. Dropping an in-flight `route_distance` future
/// aborts the underlying request.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

// Covers both engine endpoint shapes: the route list returned by /route and
// the distance/duration matrix returned by /table. Unknown fields are
// ignored; matrix cells are null for disconnected pairs.
#[derive(Debug, Deserialize, Default)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmClient {
    pub fn new(config: &OsrmConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Performs exactly one routing call between `from` and `to`.
    pub async fn route_distance(&self, from: &GeoPoint, to: &GeoPoint) -> RoutingOutcome {
        if !Self::coordinates_valid(from) || !Self::coordinates_valid(to) {
            return RoutingOutcome::InvalidInput;
        }

        // The engine wants longitude,latitude pairs, the reverse of our
        // field order.
        let url = format!(
            "{}/{},{};{},{}?overview=false",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );

        tracing::debug!("Requesting route: {}", url);

        let response = match self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::warn!("Routing engine did not respond in time: {}", e);
                return RoutingOutcome::Timeout(e);
            }
            Err(e) => {
                tracing::error!("Transport failure talking to routing engine: {}", e);
                return RoutingOutcome::ServiceError {
                    status: None,
                    cause: Some(e),
                };
            }
        };

        let status = response.status();
        tracing::debug!("Routing engine response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Routing engine rate limit hit (429)");
            return RoutingOutcome::RateLimited;
        }
        if status != StatusCode::OK {
            return RoutingOutcome::ServiceError {
                status: Some(status),
                cause: None,
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return RoutingOutcome::Timeout(e),
            Err(e) => {
                return RoutingOutcome::ServiceError {
                    status: Some(status),
                    cause: Some(e),
                }
            }
        };

        match serde_json::from_str::<OsrmResponse>(&body) {
            Ok(parsed) => Self::classify_payload(&parsed),
            Err(e) => {
                tracing::error!("Unparseable routing engine payload: {}", e);
                RoutingOutcome::MalformedResponse(e)
            }
        }
    }

    fn classify_payload(parsed: &OsrmResponse) -> RoutingOutcome {
        if let Some(route) = parsed.routes.first() {
            return RoutingOutcome::Success(DistanceResult {
                distance_meters: route.distance,
                duration_seconds: route.duration,
            });
        }

        if let (Some(distances), Some(durations)) = (&parsed.distances, &parsed.durations) {
            let distance = distances.first().and_then(|row| row.get(1)).copied().flatten();
            let duration = durations.first().and_then(|row| row.get(1)).copied().flatten();
            if let (Some(distance), Some(duration)) = (distance, duration) {
                if distance > 0.0 {
                    return RoutingOutcome::Success(DistanceResult {
                        distance_meters: distance,
                        duration_seconds: duration,
                    });
                }
            }
        }

        // Parseable body, no usable route: the points are not connected on
        // the road network.
        RoutingOutcome::Unreachable
    }

    fn coordinates_valid(point: &GeoPoint) -> bool {
        validate_latitude(point.latitude).is_ok() && validate_longitude(point.longitude).is_ok()
    }
}
