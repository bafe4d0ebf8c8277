//! Flower Routes
//!
//! Routes:
//! - GET|POST /plant/ - Plant a flower, or return to the one this browser owns
//! - GET /f/:flower_id/ - View a flower
//!
//! `/plant` and `/f/:flower_id` permanently redirect to the slashed form.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{any, get},
    Extension, Router,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::middleware::{owner_cookie, read_owner_cookie, OwnerCookie};
use crate::services::{render_flower, PlantOutcome};
use crate::{AppState, Error, Result};

/// Build flower routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/plant/",
            get(plant_flower)
                .post(plant_flower)
                .layer(middleware::from_fn(read_owner_cookie)),
        )
        .route("/plant", any(|| async { Redirect::permanent("/plant/") }))
        .route("/f/:flower_id/", get(view_flower))
        .route("/f/:flower_id", get(append_slash))
}

/// Path of the view page for a flower.
pub fn flower_url(flower_id: &str) -> String {
    format!("/f/{}/", flower_id)
}

// ============================================================================
// Path Extractors
// ============================================================================

/// Flower id taken from the path.
///
/// Only the canonical hyphenated lowercase form is accepted. Anything else,
/// including other spellings of a valid UUID, is treated as an unmatched
/// route (404).
#[derive(Debug, Clone, Copy)]
pub struct FlowerIdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for FlowerIdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::NotFound("Flower not found".into()))?;

        match Uuid::parse_str(&raw) {
            Ok(id) if id.hyphenated().to_string() == raw => Ok(Self(id)),
            _ => Err(Error::NotFound(format!("Flower not found: {}", raw))),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Plant a flower.
///
/// GET|POST /plant/
///
/// If the `flower_owner` cookie matches an existing flower, redirects to it
/// without creating anything. Otherwise plants a new flower, sets the
/// ownership cookie and redirects to the new flower's page.
#[axum::debug_handler]
async fn plant_flower(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerCookie>,
    jar: CookieJar,
) -> Result<Response> {
    let outcome = state.flowers.plant(owner.token()).await?;

    match outcome {
        PlantOutcome::Existing(flower) => Ok(found(&flower_url(&flower.id))),
        PlantOutcome::Planted(flower) => {
            let location = flower_url(&flower.id);
            let jar = jar.add(owner_cookie(flower.owner_token, crate::config()));
            Ok((jar, found(&location)).into_response())
        }
    }
}

/// View a flower.
///
/// GET /f/:flower_id/
///
/// Open to anyone holding the id; ownership is not checked.
#[axum::debug_handler]
async fn view_flower(
    State(state): State<AppState>,
    FlowerIdPath(flower_id): FlowerIdPath,
) -> Result<Html<String>> {
    let flower = state.flowers.get(flower_id).await?;
    Ok(Html(render_flower(&flower)?))
}

/// GET /f/:flower_id
async fn append_slash(FlowerIdPath(flower_id): FlowerIdPath) -> Redirect {
    Redirect::permanent(&flower_url(&flower_id.to_string()))
}
