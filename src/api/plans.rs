use axum::Json;

use super::{ApiError, ApiResponse, EvaluateRequest, EvaluateResponse};
use crate::plans::{PlanTier, PricingPlan, pricing_plans};
use crate::policy::{self, denial_message};
use crate::quality::VideoQuality;

/// GET /plans
pub async fn list_plans() -> Json<ApiResponse<Vec<PricingPlan>>> {
    Json(ApiResponse::success(pricing_plans()))
}

/// POST /plans/evaluate
/// Runs the download policy on raw labels without touching any account.
/// Unknown tiers or qualities are a 400; a denial is a normal 200 result.
pub async fn evaluate(
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<ApiResponse<EvaluateResponse>>, ApiError> {
    let plan: PlanTier = payload.plan.parse()?;
    let quality: VideoQuality = payload.quality.parse()?;

    let decision = policy::evaluate(plan, payload.current_downloads, quality);
    let reason = decision.denial_reason();

    Ok(Json(ApiResponse::success(EvaluateResponse {
        plan,
        current_downloads: payload.current_downloads,
        quality,
        allowed: decision.is_allowed(),
        reason,
        message: reason.map(|r| denial_message(plan, r)),
    })))
}
