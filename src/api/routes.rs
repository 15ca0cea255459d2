//! HTTP route handlers for Axum.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::{
    api::types::{ClassifyRequest, HealthDto, ResolveDto, SelectDto},
    catalog::Catalog,
    classify::ClassificationResult,
    error::RouterError,
    report::{self, Report},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

fn reject(err: RouterError) -> (StatusCode, String) {
    let status = match &err {
        RouterError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => {
            warn!(error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

/// Body errors, including null text fields, are client errors.
fn bad_body(rejection: JsonRejection) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, rejection.body_text())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".into(),
        ai_enabled: state.use_ai && state.selector.has_suggester(),
    })
}

pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.selector.classifier().catalog().clone())
}

pub async fn classify(
    State(state): State<AppState>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<ClassificationResult> {
    let Json(body) = body.map_err(bad_body)?;
    Ok(Json(state.selector.classify(&body.input)))
}

pub async fn select(
    State(state): State<AppState>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<SelectDto> {
    let Json(body) = body.map_err(bad_body)?;
    let use_ai = body.use_ai.unwrap_or(state.use_ai);
    let result = state.selector.select_detailed(&body.input, use_ai).await;
    Ok(Json(SelectDto {
        asset: result.asset,
        provenance: result.provenance,
    }))
}

pub async fn resolve(
    State(state): State<AppState>,
    Json(report): Json<Report>,
) -> ApiResult<ResolveDto> {
    let asset = report::resolve_report(&state.selector, &report, state.use_ai)
        .await
        .map_err(reject)?;
    Ok(Json(ResolveDto {
        summary_id: report.summary_id,
        asset,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{api::router, catalog::AssetId, classify::Provenance, select::Selector};

    fn app() -> Router {
        router(AppState {
            selector: Selector::default(),
            use_ai: false,
        })
    }

    async fn post(uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn classify_reports_provenance() {
        let (status, body) = post(
            "/classify",
            r#"{ "summary_text": "Localized pain and stiffness in the right hand.", "diagnoses": [] }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["asset"], "region_hand");
        assert_eq!(json["provenance"], "contextual-pain-match");
    }

    #[tokio::test]
    async fn select_returns_asset() {
        let (status, body) = post(
            "/select",
            r#"{ "summary_text": "Elevated HbA1c.", "diagnoses": ["Type 2 Diabetes Mellitus"], "use_ai": true }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let dto: SelectDto = serde_json::from_slice(&body).unwrap();
        assert_eq!(dto.asset, AssetId::Pancreas);
    }

    #[tokio::test]
    async fn null_summary_is_bad_request() {
        let (status, body) = post("/select", r#"{ "summary_text": null, "diagnoses": [] }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("summary_text"));
    }

    #[tokio::test]
    async fn missing_or_null_diagnoses_are_bad_requests() {
        let (status, body) = post("/classify", r#"{ "summary_text": "Asthma." }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("diagnoses must not be null"));

        let (status, _) =
            post("/select", r#"{ "summary_text": "", "diagnoses": null, "use_ai": false }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post("/classify", "{ not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn use_ai_flag_sits_beside_flattened_input() {
        let (status, body) = post(
            "/select",
            r#"{ "use_ai": false, "diagnoses": ["Chronic kidney disease"], "summary_text": "" }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let dto: SelectDto = serde_json::from_slice(&body).unwrap();
        assert_eq!(dto.asset, AssetId::Kidneys);
        assert_eq!(dto.provenance, Provenance::DiagnosisMatch);
    }

    #[tokio::test]
    async fn resolve_prefers_precomputed_asset() {
        let (status, body) = post(
            "/reports/resolve",
            r#"{ "summary_id": "abc", "summary_text": "", "diagnoses": [], "animation_asset": "brain" }"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let dto: ResolveDto = serde_json::from_slice(&body).unwrap();
        assert_eq!(dto.summary_id.as_deref(), Some("abc"));
        assert_eq!(dto.asset, AssetId::Brain);
    }

    #[tokio::test]
    async fn catalog_lists_rules() {
        let request = Request::get("/catalog").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["fallback"], "fallback_uncertain");
        assert!(json["rules"].as_array().unwrap().len() > 50);
    }
}
