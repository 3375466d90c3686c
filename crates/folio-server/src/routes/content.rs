//! Content record route handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use folio_core::{ContentDraft, ContentId, ContentRecord, Error};
use folio_store::Upload;

use crate::context::AppContext;
use crate::error::AppError;

/// Name of the multipart part carrying the image upload.
const IMAGE_FIELD: &str = "image";

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Query parameters for listing content.
///
/// `skip` and `limit` are kept as raw text so out-of-range values can be
/// clamped instead of rejected (see [`parse_count`]).
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContentParams {
    /// Only return records of this type. Empty means no filter.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Number of matching records to skip. Negative values count as 0.
    #[serde(alias = "offset")]
    #[param(value_type = Option<i64>)]
    pub skip: Option<String>,
    /// Maximum number of records to return (server default: 10).
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

/// Multipart body for create. Text fields may also be sent here.
#[derive(Debug, utoipa::ToSchema)]
pub struct CreateContentForm {
    /// Image file; only the extension of its file name is kept.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// Body returned after a successful delete.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// POST /content/
#[utoipa::path(
    post,
    path = "/content/",
    params(ContentDraft),
    request_body(content = CreateContentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Content created", body = ContentRecord),
        (status = 400, description = "Missing required field or malformed body"),
        (status = 500, description = "Asset could not be stored")
    )
)]
pub async fn create_content(
    State(ctx): State<AppContext>,
    draft: Result<Query<ContentDraft>, QueryRejection>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let Query(mut draft) = draft.map_err(query_error)?;
    let mut upload = None;

    if is_multipart(request.headers()) {
        let mut multipart = Multipart::from_request(request, &ctx)
            .await
            .map_err(|e| Error::Validation(format!("invalid multipart body: {}", e.body_text())))?;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = field.bytes().await.map_err(multipart_error)?;
                // An empty file input still submits a nameless, empty part.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                upload = Some(Upload { filename, data });
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                if !draft.set(&name, value) {
                    tracing::debug!("Ignoring unknown form field {name:?}");
                }
            }
        }
    }

    let input = draft.validate()?;
    let record = ctx.content.create(input, upload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /content/
#[utoipa::path(
    get,
    path = "/content/",
    params(ListContentParams),
    responses(
        (status = 200, description = "Matching content in creation order",
            body = Vec<ContentRecord>),
        (status = 400, description = "skip or limit is not an integer")
    )
)]
pub async fn list_content(
    State(ctx): State<AppContext>,
    params: Result<Query<ListContentParams>, QueryRejection>,
) -> Result<Json<Vec<ContentRecord>>, AppError> {
    let Query(params) = params.map_err(query_error)?;

    let type_filter = params.content_type.as_deref().filter(|t| !t.is_empty());
    let skip = parse_count("skip", params.skip.as_deref())?.unwrap_or(0);
    let limit = parse_count("limit", params.limit.as_deref())?
        .unwrap_or(ctx.config.content.default_limit);

    Ok(Json(ctx.content.list(type_filter, skip, limit)))
}

/// GET /content/:id
#[utoipa::path(
    get,
    path = "/content/{id}",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content details", body = ContentRecord),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ContentRecord>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(ctx.content.get(id)?))
}

/// DELETE /content/:id
#[utoipa::path(
    delete,
    path = "/content/{id}",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content deleted", body = DeleteResponse),
        (status = 404, description = "Content not found"),
        (status = 500, description = "Asset could not be removed")
    )
)]
pub async fn delete_content(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(&id)?;
    ctx.content.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Content deleted".into(),
    }))
}

/// Ids are opaque to clients, so anything unparseable is simply unknown.
fn parse_id(raw: &str) -> Result<ContentId, Error> {
    raw.parse().map_err(|_| Error::not_found("content", raw))
}

/// Parse a pagination count.
///
/// Any integer is accepted: negatives clamp to 0 and values too large for
/// `usize` clamp to `usize::MAX`, so the window simply comes back empty.
/// A missing or blank value yields `None`.
fn parse_count(name: &str, raw: Option<&str>) -> Result<Option<usize>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Validation(format!("{name} must be an integer, got {raw:?}")));
    }

    if negative {
        return Ok(Some(0));
    }
    Ok(Some(digits.parse().unwrap_or(usize::MAX)))
}

/// Media types are case-insensitive, so `Multipart/Form-Data` counts too.
fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.get(..MULTIPART_FORM_DATA.len()))
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART_FORM_DATA))
}

fn query_error(e: QueryRejection) -> Error {
    Error::Validation(format!("invalid query string: {}", e.body_text()))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    Error::Validation(format!("invalid multipart body: {}", e.body_text()))
}
