//! Greedy station placement.
//!
//! One step of best-response greedy: every uncovered asset is tried as a
//! station site, scored by how many uncovered assets an inner-radius buffer
//! around it would reach, and the first strictly-best site wins. Calling it
//! again takes another step against the updated model.

use crate::{
    AssetId, BufferRing, Coordinate, CoverageModel, GeometryProvider, Result, StationCategory,
    StationPlacement,
};
use serde::Serialize;

/// A scored candidate site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    /// Asset whose coordinate is the site
    pub asset: AssetId,
    /// Site position
    pub coordinate: Coordinate,
    /// Uncovered assets a buffer here would reach, the candidate included
    pub score: usize,
}

/// Result of evaluating candidate sites without placing anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SiteSearch {
    /// Every asset is already covered
    AllCovered,
    /// No candidate scored above zero
    NoCandidate,
    /// Highest-scoring site, earliest on ties
    Best(Candidate),
}

/// Result of [`CoverageModel::suggest_new_station`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Every asset is already covered; nothing was placed
    AllCovered,
    /// No suitable uncovered cluster; nothing was placed
    NoCandidate,
    /// A suggested station was placed
    Placed {
        /// Winning site
        candidate: Candidate,
        /// What the placement added
        placement: StationPlacement,
    },
}

/// Scores every uncovered asset as a station site and returns the best.
///
/// Candidates are visited in asset order and only a strictly greater score
/// replaces the current best, so ties go to the earliest asset.
pub fn find_best_site<G: GeometryProvider>(model: &CoverageModel<G>) -> Result<SiteSearch> {
    let uncovered: Vec<_> = model.uncovered_assets().collect();
    if uncovered.is_empty() {
        return Ok(SiteSearch::AllCovered);
    }

    let uncovered_points: Vec<Coordinate> = uncovered.iter().map(|a| a.coordinate).collect();
    let score = |site: &Coordinate| -> Result<usize> {
        let hypothetical = model.build_buffer(site, BufferRing::Inner)?;
        Ok(model
            .geometry()
            .points_within_polygon(&uncovered_points, &hypothetical)
            .len())
    };

    #[cfg(feature = "parallel")]
    let scores: Vec<Result<usize>> = {
        use rayon::prelude::*;
        uncovered_points.par_iter().map(score).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let scores: Vec<Result<usize>> = uncovered_points.iter().map(score).collect();

    let mut best: Option<Candidate> = None;
    let mut max_score = 0;
    for (asset, score) in uncovered.iter().zip(scores) {
        let score = score?;
        if score > max_score {
            max_score = score;
            best = Some(Candidate {
                asset: asset.id,
                coordinate: asset.coordinate,
                score,
            });
        }
    }

    Ok(best.map_or(SiteSearch::NoCandidate, SiteSearch::Best))
}

impl<G: GeometryProvider> CoverageModel<G> {
    /// Runs one greedy step and places a suggested station at the winner.
    ///
    /// The station is named `Suggested Station (covers N)` where `N` is the
    /// winning score.
    pub fn suggest_new_station(&mut self) -> Result<PlacementOutcome> {
        match find_best_site(self)? {
            SiteSearch::AllCovered => Ok(PlacementOutcome::AllCovered),
            SiteSearch::NoCandidate => Ok(PlacementOutcome::NoCandidate),
            SiteSearch::Best(candidate) => {
                let placement = self.add_station(
                    candidate.coordinate,
                    format!("Suggested Station (covers {})", candidate.score),
                    StationCategory::Suggested,
                )?;
                tracing::info!(
                    asset = candidate.asset.0,
                    score = candidate.score,
                    latitude = candidate.coordinate.latitude,
                    longitude = candidate.coordinate.longitude,
                    "Suggested station placed"
                );
                Ok(PlacementOutcome::Placed { candidate, placement })
            }
        }
    }
}
