use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::ratings as rating_db;
use crate::db::services as service_db;
use crate::error::ApiError;
use crate::locks::EntityLocks;
use crate::models::contracts::Status;
use crate::models::notifications::{NewNotification, NotificationKind};
use crate::models::ratings::{CreateRating, PartyRole, RatingResponse, UpdateRating};
use crate::notify;

/// POST /api/ratings — rate the other party of a completed contract.
///
/// All preconditions are checked before any write; the recompute of the
/// service's and the rated user's derived averages runs under their entity
/// locks (service first, then user) so concurrent recomputes cannot
/// interleave and leave a stale projection.
pub async fn create_rating(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    locks: web::Data<Arc<EntityLocks>>,
    body: web::Json<CreateRating>,
) -> Result<HttpResponse, ApiError> {
    let rater_id = user.0.id;
    let input = body.into_inner();

    if !(1..=5).contains(&input.rating_value) {
        return Err(ApiError::validation("Rating value must be between 1 and 5"));
    }

    let contract = contract_db::get_contract_by_id(db.get_ref(), input.contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {} not found", input.contract_id)))?;

    if contract.status != Status::Completed {
        return Err(ApiError::validation(
            "Ratings are only allowed on completed contracts",
        ));
    }
    if input.service_id != contract.service_id {
        return Err(ApiError::validation(
            "service_id does not match the contract's service",
        ));
    }

    // Roles come from contract membership, never from the request body.
    let rater_role = if rater_id == contract.client_id {
        PartyRole::Client
    } else if rater_id == contract.provider_id {
        PartyRole::Provider
    } else {
        return Err(ApiError::forbidden(
            "Only contract participants can leave a rating",
        ));
    };

    let (expected_rated, rated_role) = match rater_role {
        PartyRole::Client => (contract.provider_id, PartyRole::Provider),
        PartyRole::Provider => (contract.client_id, PartyRole::Client),
    };
    if input.rated_id != expected_rated {
        return Err(ApiError::validation(
            "You can only rate the other party of the contract",
        ));
    }

    // A client rates the provider through the service they contracted; the
    // rated provider must actually own that service.
    if rater_role == PartyRole::Client {
        let service = service_db::get_service_by_id(db.get_ref(), contract.service_id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found("The service for this contract no longer exists")
            })?;
        if service.user_id != input.rated_id {
            return Err(ApiError::validation(
                "The rated provider does not own the contracted service",
            ));
        }
    }

    let service_id = contract.service_id;
    let rated_id = input.rated_id;

    // Lock order: service before rated user, everywhere.
    let service_lock = locks.for_entity(service_id).await;
    let _service_guard = service_lock.lock().await;
    let user_lock = locks.for_entity(rated_id).await;
    let _user_guard = user_lock.lock().await;

    if rating_db::rating_exists(db.get_ref(), input.contract_id, rater_id, rated_id).await? {
        return Err(ApiError::conflict(
            "You have already rated this party for this contract",
        ));
    }

    let rating = rating_db::insert_rating(
        db.get_ref(),
        input,
        rater_id,
        rating_db::ResolvedRoles {
            rater_role,
            rated_role,
        },
    )
    .await?;

    rating_db::recompute_service_rating(db.get_ref(), service_id).await?;
    rating_db::recompute_user_rating(db.get_ref(), rated_id).await?;

    drop(_user_guard);
    drop(_service_guard);

    notify::emit(
        db.get_ref(),
        NewNotification {
            user_id: rated_id,
            title: "New rating received".to_string(),
            message: format!("You received a {}-star rating", rating.rating_value),
            kind: NotificationKind::SystemAlert,
            related_id: Some(rating.id),
        },
    )
    .await;

    Ok(HttpResponse::Created().json(RatingResponse::from(rating)))
}

/// GET /api/ratings/service/{service_id} — ratings left on a service
/// (public; anonymous raters are elided).
pub async fn get_ratings_by_service(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let service_id = path.into_inner();
    let ratings = rating_db::get_ratings_by_service(db.get_ref(), service_id).await?;
    let response: Vec<RatingResponse> = ratings.into_iter().map(RatingResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/ratings/user/{user_id} — ratings received by a user (public).
pub async fn get_ratings_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let ratings = rating_db::get_ratings_by_rated_user(db.get_ref(), user_id).await?;
    let response: Vec<RatingResponse> = ratings.into_iter().map(RatingResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/ratings/{id} — a single rating (public).
pub async fn get_rating(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let rating = rating_db::get_rating_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Rating {id} not found")))?;
    Ok(HttpResponse::Ok().json(RatingResponse::from(rating)))
}

/// PUT /api/ratings/{id} — update a rating (original rater or admin).
pub async fn update_rating(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    locks: web::Data<Arc<EntityLocks>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRating>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();

    if let Some(value) = input.rating_value {
        if !(1..=5).contains(&value) {
            return Err(ApiError::validation("Rating value must be between 1 and 5"));
        }
    }

    let rating = rating_db::get_rating_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Rating {id} not found")))?;

    if rating.rater_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden("You can only update your own ratings"));
    }

    let service_lock = locks.for_entity(rating.service_id).await;
    let _service_guard = service_lock.lock().await;
    let user_lock = locks.for_entity(rating.rated_id).await;
    let _user_guard = user_lock.lock().await;

    let updated = rating_db::update_rating(db.get_ref(), id, input).await?;

    rating_db::recompute_service_rating(db.get_ref(), updated.service_id).await?;
    rating_db::recompute_user_rating(db.get_ref(), updated.rated_id).await?;

    Ok(HttpResponse::Ok().json(RatingResponse::from(updated)))
}

/// DELETE /api/ratings/{id} — delete a rating (original rater or admin).
pub async fn delete_rating(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    locks: web::Data<Arc<EntityLocks>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let rating = rating_db::get_rating_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Rating {id} not found")))?;

    if rating.rater_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden("You can only delete your own ratings"));
    }

    let service_lock = locks.for_entity(rating.service_id).await;
    let _service_guard = service_lock.lock().await;
    let user_lock = locks.for_entity(rating.rated_id).await;
    let _user_guard = user_lock.lock().await;

    rating_db::delete_rating(db.get_ref(), id).await?;

    rating_db::recompute_service_rating(db.get_ref(), rating.service_id).await?;
    rating_db::recompute_user_rating(db.get_ref(), rating.rated_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Rating {id} deleted"),
    })))
}
