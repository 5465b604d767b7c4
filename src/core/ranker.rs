use crate::core::haversine::haversine_km;
use crate::domain::model::{GeoPoint, Item};

/// An item annotated with its straight-line distance from the reference
/// point. Derived per ranking call; the underlying item is copied, never
/// mutated, so the same candidate list can serve concurrent rankings.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub item: Item,
    pub point: GeoPoint,
    pub estimated_km: f64,
}

/// Orders candidates by estimated distance from `origin`, closest first,
/// keeping at most `top_k`.
///
/// Items without a usable position are dropped, not treated as distance
/// zero. Ties keep input order (the sort is stable), so repeated calls on
/// identical input produce identical output.
pub fn rank_nearest(items: &[Item], origin: &GeoPoint, top_k: usize) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = items
        .iter()
        .filter_map(|item| {
            let point = item.geo_point()?;
            Some(RankedCandidate {
                item: item.clone(),
                point,
                estimated_km: haversine_km(origin, &point),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.estimated_km.total_cmp(&b.estimated_km));
    ranked.truncate(top_k);
    ranked
}
