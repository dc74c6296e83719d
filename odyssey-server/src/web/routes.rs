//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::catalogue::CatalogueError;
use crate::domain::{Leg, Path, Planet, Pricelist, Selection};
use crate::search::{
    Objective, SearchRequest, preview_removal, route_metrics, search, validate_connections,
};
use crate::store::{BookingSegment, BookingUpdate, NewBooking, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/planets", get(planets))
        .route("/api/pricelist", get(pricelist))
        .route("/api/search", post(search_itineraries))
        .route("/api/gap-preview", post(gap_preview))
        .route("/api/bookings", post(create_booking).get(list_bookings))
        .route("/api/bookings/:id", put(update_booking).delete(delete_booking))
        .route("/api/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Planets and carriers available in the active pricelist.
async fn planets(State(state): State<AppState>) -> Result<Json<PlanetsResponse>, AppError> {
    let pricelist = state.active_pricelist().await?;
    Ok(Json(PlanetsResponse::from_pricelist(&pricelist)))
}

/// Summary of the active pricelist snapshot.
async fn pricelist(State(state): State<AppState>) -> Result<Json<PricelistResponse>, AppError> {
    let pricelist = state.active_pricelist().await?;
    Ok(Json(PricelistResponse::from_pricelist(&pricelist)))
}

/// Search for itineraries between two planets.
async fn search_itineraries(
    State(state): State<AppState>,
    Json(req): Json<SearchApiRequest>,
) -> Result<Json<SearchApiResponse>, AppError> {
    let from = Planet::new(&req.from).map_err(|_| AppError::BadRequest {
        message: format!("Invalid origin planet: {:?}", req.from),
    })?;
    let to = Planet::new(&req.to).map_err(|_| AppError::BadRequest {
        message: format!("Invalid destination planet: {:?}", req.to),
    })?;
    let objective: Objective = req.objective.parse().map_err(|_| AppError::BadRequest {
        message: format!("Invalid objective: {:?}", req.objective),
    })?;

    let pricelist = state.active_pricelist().await?;

    let request = SearchRequest {
        from,
        to,
        objective,
        carriers: req.carriers.map(|c| c.into_iter().collect()),
    };

    let result = search(pricelist.legs(), &request, &state.limits);
    Ok(Json(SearchApiResponse::from_result(&result)))
}

/// Preview the removal of one chosen offer from a route.
async fn gap_preview(
    State(state): State<AppState>,
    Json(req): Json<GapPreviewRequest>,
) -> Result<Json<GapPreviewResponse>, AppError> {
    let pricelist = state.active_pricelist().await?;

    let path = resolve_path(&pricelist, &req.leg_ids)?;
    let selection = resolve_selection(&path, &req.offer_ids)?;

    let preview = preview_removal(&path, &selection, req.remove_index);
    Ok(Json(GapPreviewResponse::new(
        &preview.selection,
        preview.validation,
        &preview.segments,
    )))
}

/// Book a fully selected route.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>), AppError> {
    let first_name = req.first_name.trim();
    let last_name = req.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::BadRequest {
            message: "Passenger first and last name are required".to_string(),
        });
    }

    if req.offer_ids.len() != req.leg_ids.len() {
        return Err(AppError::BadRequest {
            message: format!(
                "Expected {} offer ids, got {}",
                req.leg_ids.len(),
                req.offer_ids.len()
            ),
        });
    }

    let pricelist = state.active_pricelist().await?;
    let path = resolve_path(&pricelist, &req.leg_ids)?;

    let offer_ids: Vec<Option<String>> = req.offer_ids.iter().cloned().map(Some).collect();
    let selection = resolve_selection(&path, &offer_ids)?;

    for (_, offer) in selection.chosen() {
        if !offer.is_chronological() {
            return Err(AppError::BadRequest {
                message: format!("Offer {} has an arrival before its departure", offer.id),
            });
        }
    }

    validate_connections(&selection, false).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let metrics = route_metrics(&path, &selection);
    let segments: Vec<BookingSegment> = path
        .legs()
        .iter()
        .enumerate()
        .filter_map(|(i, leg)| {
            selection.slot(i).map(|offer| BookingSegment {
                from: leg.from().as_str().to_string(),
                to: leg.to().as_str().to_string(),
                carrier: offer.carrier.clone(),
                price: offer.price,
                departure: offer.departure,
                arrival: offer.arrival,
            })
        })
        .collect();

    let booking = state
        .store
        .create_booking(NewBooking {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            segments,
            total_price: metrics.price,
            total_hours: metrics.hours,
            total_distance_km: metrics.distance_km,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookingDto::from_booking(&booking))))
}

/// List bookings, optionally filtered to one passenger.
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Json<BookingsResponse> {
    let bookings = match (query.first_name, query.last_name) {
        (Some(first), Some(last)) => state.store.bookings_by_passenger(&first, &last).await,
        _ => state.store.bookings().await,
    };

    Json(BookingsResponse {
        bookings: bookings.iter().map(BookingDto::from_booking).collect(),
    })
}

/// Change a booking's passenger details.
async fn update_booking(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingDto>, AppError> {
    let update = booking_update(&req)?;

    match state.store.update_booking(&id, update).await {
        Some(booking) => Ok(Json(BookingDto::from_booking(&booking))),
        None => Err(AppError::NotFound {
            message: format!("Booking {} not found", id),
        }),
    }
}

/// Delete a booking.
async fn delete_booking(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_booking(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("Booking {} not found", id),
        })
    }
}

/// Store counters.
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store.stats().await;
    Json(StatsResponse::from_stats(&stats))
}

/// Resolve leg ids against the pricelist into a connected path.
fn resolve_path(pricelist: &Pricelist, leg_ids: &[String]) -> Result<Path, AppError> {
    let legs: Vec<Arc<Leg>> = leg_ids
        .iter()
        .map(|id| {
            pricelist
                .leg_by_id(id)
                .cloned()
                .ok_or_else(|| AppError::BadRequest {
                    message: format!("Unknown leg id: {}", id),
                })
        })
        .collect::<Result<_, _>>()?;

    Path::new(legs).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Resolve per-slot offer ids against the path's legs.
fn resolve_selection(path: &Path, offer_ids: &[Option<String>]) -> Result<Selection, AppError> {
    if offer_ids.len() != path.hops() {
        return Err(AppError::BadRequest {
            message: format!(
                "Expected {} offer slots, got {}",
                path.hops(),
                offer_ids.len()
            ),
        });
    }

    let mut slots = Vec::with_capacity(offer_ids.len());
    for (leg, slot) in path.legs().iter().zip(offer_ids) {
        match slot {
            None => slots.push(None),
            Some(id) => {
                let offer = leg.offer_by_id(id).ok_or_else(|| AppError::BadRequest {
                    message: format!("Unknown offer id {} on leg {}", id, leg.id()),
                })?;
                slots.push(Some(offer.clone()));
            }
        }
    }

    Ok(Selection::from_slots(slots))
}

/// Validate an update request into store fields: provided names must not
/// be blank, and at least one field must change.
fn booking_update(req: &UpdateBookingRequest) -> Result<BookingUpdate, AppError> {
    let mut update = BookingUpdate::default();

    if let Some(first) = &req.first_name {
        let first = first.trim();
        if first.is_empty() {
            return Err(AppError::BadRequest {
                message: "Passenger first name cannot be blank".to_string(),
            });
        }
        update.first_name = Some(first.to_string());
    }
    if let Some(last) = &req.last_name {
        let last = last.trim();
        if last.is_empty() {
            return Err(AppError::BadRequest {
                message: "Passenger last name cannot be blank".to_string(),
            });
        }
        update.last_name = Some(last.to_string());
    }

    if update.first_name.is_none() && update.last_name.is_none() {
        return Err(AppError::BadRequest {
            message: "Nothing to update".to_string(),
        });
    }

    Ok(update)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<CatalogueError> for AppError {
    fn from(e: CatalogueError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NoActivePricelist => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        error!(status = %status, message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Offer, parse_instant};

    fn planet(name: &str) -> Planet {
        Planet::new(name).unwrap()
    }

    fn offer(id: &str, dep: &str, arr: &str) -> Offer {
        Offer::new(
            id,
            "Spacegenix",
            100.0,
            parse_instant(dep).unwrap(),
            parse_instant(arr).unwrap(),
        )
    }

    fn sample_pricelist() -> Pricelist {
        Pricelist::new(
            "pl-1",
            parse_instant("2024-03-16T00:00:00Z").unwrap(),
            vec![
                Arc::new(
                    Leg::new(
                        "l1",
                        planet("Earth"),
                        planet("Mars"),
                        1000.0,
                        vec![offer("o1", "2024-03-15T08:00:00Z", "2024-03-15T12:00:00Z")],
                    )
                    .unwrap(),
                ),
                Arc::new(
                    Leg::new(
                        "l2",
                        planet("Mars"),
                        planet("Jupiter"),
                        2000.0,
                        vec![offer("o2", "2024-03-15T14:00:00Z", "2024-03-15T18:00:00Z")],
                    )
                    .unwrap(),
                ),
            ],
        )
    }

    #[test]
    fn resolve_path_valid_route() {
        let pl = sample_pricelist();
        let path = resolve_path(&pl, &["l1".to_string(), "l2".to_string()]).unwrap();
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn resolve_path_unknown_leg_is_bad_request() {
        let pl = sample_pricelist();
        let result = resolve_path(&pl, &["nope".to_string()]);
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn resolve_path_disconnected_route_is_bad_request() {
        let pl = sample_pricelist();
        // l2 then l1 does not connect.
        let result = resolve_path(&pl, &["l2".to_string(), "l1".to_string()]);
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn resolve_selection_fills_slots() {
        let pl = sample_pricelist();
        let path = resolve_path(&pl, &["l1".to_string(), "l2".to_string()]).unwrap();

        let selection =
            resolve_selection(&path, &[Some("o1".to_string()), None]).unwrap();
        assert_eq!(selection.slot(0).unwrap().id, "o1");
        assert!(selection.slot(1).is_none());
    }

    #[test]
    fn resolve_selection_rejects_length_mismatch() {
        let pl = sample_pricelist();
        let path = resolve_path(&pl, &["l1".to_string(), "l2".to_string()]).unwrap();

        let result = resolve_selection(&path, &[Some("o1".to_string())]);
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn resolve_selection_rejects_offer_from_wrong_leg() {
        let pl = sample_pricelist();
        let path = resolve_path(&pl, &["l1".to_string(), "l2".to_string()]).unwrap();

        // o2 lives on l2, not l1.
        let result = resolve_selection(&path, &[Some("o2".to_string()), None]);
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn booking_update_trims_provided_names() {
        let update = booking_update(&UpdateBookingRequest {
            first_name: Some("  Grace ".to_string()),
            last_name: None,
        })
        .unwrap();

        assert_eq!(update.first_name.as_deref(), Some("Grace"));
        assert!(update.last_name.is_none());
    }

    #[test]
    fn blank_update_name_is_bad_request() {
        let result = booking_update(&UpdateBookingRequest {
            first_name: Some("   ".to_string()),
            last_name: Some("Hopper".to_string()),
        });
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn empty_update_is_bad_request() {
        let result = booking_update(&UpdateBookingRequest {
            first_name: None,
            last_name: None,
        });
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
