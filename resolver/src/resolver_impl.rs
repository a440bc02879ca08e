//! Stuff+ resolution: remote model first, local formula on any failure

use shared::scoring::{calculate_stuff_plus, local_result, stuff_plus_to_percentile};
use shared::{PitchInput, PredictResponse, ScreenshotScore, ServiceId, StuffPlusResult, service_debug, service_warn};

use crate::error::{ResolverError, ResolverResult};
use crate::traits::ScoringClient;
use crate::types::{Resolution, ScreenshotUpload};

/// Resolves a pitch into a score. Resolution never fails.
///
/// Every call is independent: no retry, no backoff, no caching. Concurrent
/// calls may finish in any order.
pub struct StuffPlusResolver<C: ScoringClient> {
    client: C,
}

impl<C: ScoringClient> StuffPlusResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve and report which branch answered
    pub async fn resolve_detailed(&self, input: &PitchInput) -> Resolution {
        match self.client.predict(input).await {
            Ok(response) => {
                let result = merge_remote(response, input);
                service_debug!(
                    ServiceId::current(),
                    pitch_type = %input.pitch_type,
                    stuff_plus = result.stuff_plus,
                    "Remote Stuff+ resolved"
                );
                Resolution::Remote(result)
            }
            Err(ResolverError::Offline) => Resolution::Fallback(local_result(input)),
            Err(err) => {
                service_warn!(
                    ServiceId::current(),
                    error = %err,
                    pitch_type = %input.pitch_type,
                    "Failed to fetch Stuff+, using local formula"
                );
                Resolution::Fallback(local_result(input))
            }
        }
    }

    /// Resolve a pitch. The caller cannot tell which branch answered.
    pub async fn resolve(&self, input: &PitchInput) -> StuffPlusResult {
        self.resolve_detailed(input).await.into_result()
    }

    /// Score a screenshot. Unlike [`Self::resolve`], failures are returned.
    pub async fn score_screenshot(&self, upload: ScreenshotUpload) -> ResolverResult<ScreenshotScore> {
        self.client.upload_screenshot(upload).await
    }

    pub fn describe(&self) -> String {
        self.client.describe()
    }
}

/// Fill in whatever the remote answer left out.
///
/// A missing percentile is bucketed from the Stuff+ in effect, which is the
/// remote value when present and the local formula otherwise.
pub fn merge_remote(response: PredictResponse, input: &PitchInput) -> StuffPlusResult {
    let stuff_plus = response.stuff_plus.unwrap_or_else(|| calculate_stuff_plus(input));
    let percentile = response
        .percentile
        .unwrap_or_else(|| stuff_plus_to_percentile(stuff_plus));

    StuffPlusResult { stuff_plus, percentile }
}
