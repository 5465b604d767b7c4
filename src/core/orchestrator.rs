use crate::adapters::osrm::{OsrmClient, RoutingOutcome};
use crate::core::ranker::rank_nearest;
use crate::domain::model::{DistanceResult, GeoPoint};
use crate::domain::ports::{CandidateFilter, CandidateSource, Page};
use crate::utils::error::{ResolveError, Result};

/// What to do when the single routing call fails or finds no route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// One routing call per resolution, full stop.
    #[default]
    Never,
    /// One extra call against the runner-up candidate. Bounded at one so a
    /// bad day at the routing engine cannot turn into a call per candidate.
    NextCandidate,
}

#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub top_k: usize,
    pub page_size: usize,
    pub fallback: FallbackPolicy,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            top_k: 3,
            page_size: 50,
            fallback: FallbackPolicy::Never,
        }
    }
}

/// Ties the candidate source, the local ranking and the routing engine into
/// one bounded operation: however many candidates the source returns, at
/// most two routing calls leave this process (one, unless a fallback is
/// configured and needed).
pub struct ProximityOrchestrator<S: CandidateSource> {
    source: S,
    routing: OsrmClient,
    policy: SelectionPolicy,
}

impl<S: CandidateSource> ProximityOrchestrator<S> {
    pub fn new(source: S, routing: OsrmClient, policy: SelectionPolicy) -> Self {
        Self {
            source,
            routing,
            policy,
        }
    }

    /// Resolves the nearest available item to the user and the road
    /// distance to reach it.
    pub async fn resolve_nearest(&self, user_lat: f64, user_lon: f64) -> Result<DistanceResult> {
        let origin = GeoPoint::new(user_lat, user_lon)?;

        let candidates = self
            .source
            .search(
                &CandidateFilter::available_only(),
                Page::first(self.policy.page_size),
            )
            .await?;
        tracing::debug!("Fetched {} candidates for ranking", candidates.len());

        let ranked = rank_nearest(&candidates, &origin, self.policy.top_k);
        let Some(best) = ranked.first() else {
            return Err(ResolveError::NoCandidates);
        };

        tracing::info!(
            "Closest candidate {} at an estimated {:.2} km, asking the routing engine",
            best.item.item_id,
            best.estimated_km
        );

        let mut outcome = self.routing.route_distance(&origin, &best.point).await;

        if self.policy.fallback == FallbackPolicy::NextCandidate && Self::worth_retrying(&outcome) {
            if let Some(second) = ranked.get(1) {
                tracing::warn!(
                    "Routing against {} failed, trying runner-up {}",
                    best.item.item_id,
                    second.item.item_id
                );
                outcome = self.routing.route_distance(&origin, &second.point).await;
            }
        }

        Self::map_outcome(outcome)
    }

    /// Road distance between two arbitrary points, skipping candidate
    /// lookup and ranking. Diagnostics path for exercising the routing
    /// adapter alone.
    pub async fn direct_distance(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<DistanceResult> {
        let from = GeoPoint::new(lat1, lon1)?;
        let to = GeoPoint::new(lat2, lon2)?;
        Self::map_outcome(self.routing.route_distance(&from, &to).await)
    }

    fn worth_retrying(outcome: &RoutingOutcome) -> bool {
        matches!(
            outcome,
            RoutingOutcome::Unreachable
                | RoutingOutcome::RateLimited
                | RoutingOutcome::Timeout(_)
                | RoutingOutcome::ServiceError { .. }
        )
    }

    fn map_outcome(outcome: RoutingOutcome) -> Result<DistanceResult> {
        match outcome {
            RoutingOutcome::Success(result) => Ok(result),
            // No road route exists between the points. A real answer, not
            // a fault; callers see the zero-valued result.
            RoutingOutcome::Unreachable => Ok(DistanceResult::ZERO),
            RoutingOutcome::RateLimited => Err(ResolveError::RoutingUnavailable {
                message: "routing engine rate limit reached".to_string(),
            }),
            RoutingOutcome::Timeout(cause) => Err(ResolveError::RoutingUnavailable {
                message: format!("routing engine timed out: {}", cause),
            }),
            RoutingOutcome::ServiceError { status, cause } => {
                let message = match (status, cause) {
                    (Some(status), _) => format!("routing engine returned {}", status),
                    (None, Some(cause)) => format!("transport failure: {}", cause),
                    (None, None) => "transport failure".to_string(),
                };
                Err(ResolveError::RoutingUnavailable { message })
            }
            RoutingOutcome::MalformedResponse(cause) => Err(ResolveError::InternalError {
                message: format!("unparseable routing engine response: {}", cause),
            }),
            RoutingOutcome::InvalidInput => Err(ResolveError::InternalError {
                message: "routing engine rejected validated coordinates".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::osrm::OsrmConfig;
    use crate::domain::model::Item;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct StaticSource {
        items: Vec<Item>,
    }

    #[async_trait]
    impl CandidateSource for StaticSource {
        async fn search(&self, filter: &CandidateFilter, page: Page) -> Result<Vec<Item>> {
            let filtered: Vec<Item> = self
                .items
                .iter()
                .filter(|item| filter.available.map_or(true, |a| item.available == a))
                .cloned()
                .collect();
            Ok(filtered.into_iter().take(page.size).collect())
        }
    }

    fn item_at(id: &str, lat: f64, lon: f64) -> Item {
        Item {
            item_id: id.to_string(),
            name: format!("Bike {}", id),
            available: true,
            latitude: lat,
            longitude: lon,
            ..Item::default()
        }
    }

    fn orchestrator(
        server: &MockServer,
        items: Vec<Item>,
        fallback: FallbackPolicy,
    ) -> ProximityOrchestrator<StaticSource> {
        let routing = OsrmClient::new(&OsrmConfig {
            base_url: server.url("/route/v1/driving"),
            connect_timeout: Duration::from_millis(500),
            request_timeout: Duration::from_millis(500),
        })
        .unwrap();

        ProximityOrchestrator::new(
            StaticSource { items },
            routing,
            SelectionPolicy {
                top_k: 3,
                page_size: 50,
                fallback,
            },
        )
    }

    #[tokio::test]
    async fn test_routes_to_the_geometrically_closest_candidate() {
        let server = MockServer::start();
        // The reference point sits exactly on the first candidate, so the
        // routing call must target it, not the one 21 km west.
        let mock = server.mock(|when, then| {
            when.method(GET).path_contains("-1.16,52.95;-1.16,52.95");
            then.status(200)
                .json_body(serde_json::json!({"routes": [{"distance": 0.0, "duration": 0.0}]}));
        });

        let orchestrator = orchestrator(
            &server,
            vec![
                item_at("near", 52.95, -1.16),
                item_at("far", 52.92, -1.47),
            ],
            FallbackPolicy::Never,
        );

        let result = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap();

        mock.assert();
        assert_eq!(result, DistanceResult::ZERO);
    }

    #[tokio::test]
    async fn test_empty_candidate_set_fails_without_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let orchestrator = orchestrator(&server, vec![], FallbackPolicy::Never);
        let err = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::NoCandidates));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_unavailable_items_do_not_count_as_candidates() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let mut rented_out = item_at("rented", 52.95, -1.16);
        rented_out.available = false;

        let orchestrator = orchestrator(&server, vec![rented_out], FallbackPolicy::Never);
        let err = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::NoCandidates));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_invalid_reference_coordinate_fails_without_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let orchestrator = orchestrator(
            &server,
            vec![item_at("near", 52.95, -1.16)],
            FallbackPolicy::Never,
        );
        let err = orchestrator.resolve_nearest(191.0, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidInput { .. }));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_rate_limited_surfaces_as_routing_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(429);
        });

        let orchestrator = orchestrator(
            &server,
            vec![item_at("near", 52.95, -1.16)],
            FallbackPolicy::Never,
        );
        let err = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::RoutingUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_maps_to_zero_result_not_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .json_body(serde_json::json!({"code": "Ok", "routes": []}));
        });

        let orchestrator = orchestrator(
            &server,
            vec![item_at("near", 52.95, -1.16)],
            FallbackPolicy::Never,
        );
        let result = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap();

        assert!(result.is_unreachable());
    }

    #[tokio::test]
    async fn test_malformed_response_surfaces_as_internal_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("<html>surprise</html>");
        });

        let orchestrator = orchestrator(
            &server,
            vec![item_at("near", 52.95, -1.16)],
            FallbackPolicy::Never,
        );
        let err = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::InternalError { .. }));
    }

    #[tokio::test]
    async fn test_next_candidate_fallback_tries_the_runner_up_once() {
        let server = MockServer::start();
        // First-ranked candidate has no road route; the runner-up does.
        let first = server.mock(|when, then| {
            when.method(GET).path_contains(";-1.16,52.95");
            then.status(200)
                .json_body(serde_json::json!({"code": "Ok", "routes": []}));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path_contains(";-1.21,52.94");
            then.status(200)
                .json_body(serde_json::json!({"routes": [{"distance": 5120.0, "duration": 640.0}]}));
        });

        let orchestrator = orchestrator(
            &server,
            vec![
                item_at("island", 52.95, -1.16),
                item_at("runner-up", 52.94, -1.21),
            ],
            FallbackPolicy::NextCandidate,
        );

        let result = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap();

        first.assert();
        second.assert();
        assert_eq!(result.distance_meters, 5120.0);
    }

    #[tokio::test]
    async fn test_never_policy_does_not_touch_the_runner_up() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).path_contains(";-1.16,52.95");
            then.status(200)
                .json_body(serde_json::json!({"code": "Ok", "routes": []}));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path_contains(";-1.21,52.94");
            then.status(200)
                .json_body(serde_json::json!({"routes": [{"distance": 5120.0, "duration": 640.0}]}));
        });

        let orchestrator = orchestrator(
            &server,
            vec![
                item_at("island", 52.95, -1.16),
                item_at("runner-up", 52.94, -1.21),
            ],
            FallbackPolicy::Never,
        );

        let result = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap();

        first.assert();
        second.assert_hits(0);
        assert!(result.is_unreachable());
    }

    #[tokio::test]
    async fn test_fallback_is_bounded_at_one_extra_call() {
        let server = MockServer::start();
        // Every candidate is rate-limited; only two calls may leave.
        let all = server.mock(|when, then| {
            when.method(GET);
            then.status(429);
        });

        let orchestrator = orchestrator(
            &server,
            vec![
                item_at("a", 52.95, -1.16),
                item_at("b", 52.94, -1.21),
                item_at("c", 52.92, -1.47),
            ],
            FallbackPolicy::NextCandidate,
        );

        let err = orchestrator.resolve_nearest(52.95, -1.16).await.unwrap_err();

        assert!(matches!(err, ResolveError::RoutingUnavailable { .. }));
        all.assert_hits(2);
    }

    #[tokio::test]
    async fn test_direct_distance_bypasses_candidate_lookup() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path_contains("-1.16,52.95;-1.47,52.92");
            then.status(200)
                .json_body(serde_json::json!({"routes": [{"distance": 23750.1, "duration": 1842.0}]}));
        });

        // Deliberately no candidates: direct_distance must not need any.
        let orchestrator = orchestrator(&server, vec![], FallbackPolicy::Never);
        let result = orchestrator
            .direct_distance(52.95, -1.16, 52.92, -1.47)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result.distance_meters, 23750.1);
    }
}
