use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use models::{Proverb, ProverbInput, ProverbQuery};
use tracing::info;

use crate::{errors::JsonApiError, metrics, routes::AppState};

/// Create/update body, accepted as JSON or as an urlencoded form post.
#[derive(Debug)]
pub struct ProverbPayload(pub ProverbInput);

#[async_trait]
impl<S> FromRequest<S> for ProverbPayload
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(input) = Form::<ProverbInput>::from_request(req, state)
                .await
                .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
            Ok(Self(input))
        } else {
            let Json(input) = Json::<ProverbInput>::from_request(req, state)
                .await
                .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
            Ok(Self(input))
        }
    }
}

/// Numeric `{id}` path segment. Anything else is a JSON 400.
#[derive(Debug, Clone, Copy)]
pub struct ProverbId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for ProverbId
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state)
            .await
            .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
        Ok(Self(id))
    }
}

#[utoipa::path(
    get, path = "/proverbs", tag = "proverbs",
    params(
        ("category" = Option<String>, Query, description = "Exact category, case-insensitive"),
        ("search" = Option<String>, Query, description = "Substring of the Dari, Pashto or English text, case-insensitive")
    ),
    responses(
        (status = 200, description = "Filtered collection", body = [crate::openapi::ProverbDoc]),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn list_proverbs(
    State(state): State<AppState>,
    Query(query): Query<ProverbQuery>,
) -> Result<Json<Vec<Proverb>>, JsonApiError> {
    let proverbs = state.proverbs.list(&query).await?;
    Ok(Json(proverbs))
}

#[utoipa::path(
    get, path = "/proverbs/random", tag = "proverbs",
    responses(
        (status = 200, description = "One proverb picked uniformly", body = crate::openapi::ProverbDoc),
        (status = 404, description = "Collection is empty")
    )
)]
pub async fn random_proverb(State(state): State<AppState>) -> Result<Json<Proverb>, JsonApiError> {
    Ok(Json(state.proverbs.random().await?))
}

#[utoipa::path(
    get, path = "/proverbs/{id}", tag = "proverbs",
    params(("id" = u64, Path, description = "Proverb id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProverbDoc),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "Proverb not found")
    )
)]
pub async fn get_proverb(
    State(state): State<AppState>,
    ProverbId(id): ProverbId,
) -> Result<Json<Proverb>, JsonApiError> {
    Ok(Json(state.proverbs.get(id).await?))
}

#[utoipa::path(
    post, path = "/proverbs", tag = "proverbs",
    request_body = crate::openapi::ProverbInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProverbDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_proverb(
    State(state): State<AppState>,
    ProverbPayload(input): ProverbPayload,
) -> Result<Response, JsonApiError> {
    let created = state.proverbs.create(input).await?;
    metrics::CREATED_TOTAL.inc();
    let location = format!("/proverbs/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

#[utoipa::path(
    put, path = "/proverbs/{id}", tag = "proverbs",
    params(("id" = u64, Path, description = "Proverb id")),
    request_body = crate::openapi::ProverbInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProverbDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Proverb not found")
    )
)]
pub async fn update_proverb(
    State(state): State<AppState>,
    ProverbId(id): ProverbId,
    ProverbPayload(input): ProverbPayload,
) -> Result<Json<Proverb>, JsonApiError> {
    let updated = state.proverbs.update(id, input).await?;
    metrics::UPDATED_TOTAL.inc();
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/proverbs/{id}", tag = "proverbs",
    params(("id" = u64, Path, description = "Proverb id")),
    responses((status = 204, description = "Removed, or was not there"))
)]
pub async fn delete_proverb(
    State(state): State<AppState>,
    ProverbId(id): ProverbId,
) -> Result<StatusCode, JsonApiError> {
    if state.proverbs.delete(id).await? {
        metrics::DELETED_TOTAL.inc();
    } else {
        info!(id, "delete of absent proverb ignored");
    }
    Ok(StatusCode::NO_CONTENT)
}
