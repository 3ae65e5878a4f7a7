use sea_orm::*;
use uuid::Uuid;

use crate::db::{services as service_db, users as user_db};
use crate::models::ratings::{self, CreateRating, PartyRole, UpdateRating};

/// Everything the handler resolved before insert: roles derived from the
/// contract, never taken from the request.
#[derive(Debug, Clone)]
pub struct ResolvedRoles {
    pub rater_role: PartyRole,
    pub rated_role: PartyRole,
}

/// Insert a new rating.
pub async fn insert_rating(
    db: &DatabaseConnection,
    input: CreateRating,
    rater_id: Uuid,
    roles: ResolvedRoles,
) -> Result<ratings::Model, DbErr> {
    let new_rating = ratings::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(input.contract_id),
        service_id: Set(input.service_id),
        rater_id: Set(rater_id),
        rated_id: Set(input.rated_id),
        rating_value: Set(input.rating_value),
        comment: Set(input.comment),
        is_anonymous: Set(input.is_anonymous.unwrap_or(false)),
        rater_role: Set(roles.rater_role),
        rated_role: Set(roles.rated_role),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_rating.insert(db).await
}

/// Fetch a single rating by ID.
pub async fn get_rating_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<ratings::Model>, DbErr> {
    ratings::Entity::find_by_id(id).one(db).await
}

/// Fetch all ratings left on a service.
pub async fn get_ratings_by_service(
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<Vec<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::ServiceId.eq(service_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all ratings received by a user.
pub async fn get_ratings_by_rated_user(
    db: &DatabaseConnection,
    rated_id: Uuid,
) -> Result<Vec<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::RatedId.eq(rated_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .all(db)
        .await
}

/// Check for an existing rating for this (contract, rater, rated) triple.
/// One party may rate the other at most once per contract.
pub async fn rating_exists(
    db: &DatabaseConnection,
    contract_id: Uuid,
    rater_id: Uuid,
    rated_id: Uuid,
) -> Result<bool, DbErr> {
    let count = ratings::Entity::find()
        .filter(ratings::Column::ContractId.eq(contract_id))
        .filter(ratings::Column::RaterId.eq(rater_id))
        .filter(ratings::Column::RatedId.eq(rated_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Update an existing rating's mutable fields.
pub async fn update_rating(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateRating,
) -> Result<ratings::Model, DbErr> {
    let rating = ratings::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Rating not found".to_string()))?;

    let mut active: ratings::ActiveModel = rating.into();

    if let Some(value) = input.rating_value {
        active.rating_value = Set(value);
    }
    if let Some(comment) = input.comment {
        active.comment = Set(Some(comment));
    }
    if let Some(is_anonymous) = input.is_anonymous {
        active.is_anonymous = Set(is_anonymous);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a rating by ID.
pub async fn delete_rating(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    ratings::Entity::delete_by_id(id).exec(db).await
}

/// Arithmetic mean rounded to one decimal place, plus the contributing
/// count. An empty set resets the projection to (0.0, 0).
pub fn summarize(values: &[i16]) -> (f64, i32) {
    if values.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = values.iter().map(|v| *v as i64).sum();
    let mean = sum as f64 / values.len() as f64;
    ((mean * 10.0).round() / 10.0, values.len() as i32)
}

/// Recompute a service's derived rating fields from a full scan of its
/// ratings. Callers hold the service's entity lock.
pub async fn recompute_service_rating(
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<(), DbErr> {
    let values: Vec<i16> = get_ratings_by_service(db, service_id)
        .await?
        .into_iter()
        .map(|r| r.rating_value)
        .collect();

    let (average, count) = summarize(&values);
    service_db::set_rating(db, service_id, average, count).await?;
    Ok(())
}

/// Recompute a user's derived rating fields from a full scan of the ratings
/// they received. Callers hold the user's entity lock.
pub async fn recompute_user_rating(db: &DatabaseConnection, rated_id: Uuid) -> Result<(), DbErr> {
    let values: Vec<i16> = get_ratings_by_rated_user(db, rated_id)
        .await?
        .into_iter()
        .map(|r| r.rating_value)
        .collect();

    let (average, count) = summarize(&values);
    user_db::set_rating(db, rated_id, average, count).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::summarize;

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        // 4, 5, 5 -> 4.666... -> 4.7
        assert_eq!(summarize(&[4, 5, 5]), (4.7, 3));
        // 1, 2 -> 1.5
        assert_eq!(summarize(&[1, 2]), (1.5, 2));
        // single value passes through
        assert_eq!(summarize(&[3]), (3.0, 1));
    }

    #[test]
    fn empty_set_resets_projection() {
        assert_eq!(summarize(&[]), (0.0, 0));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 4, 5 -> 4.5 stays 4.5; 1,1,2 -> 1.333 -> 1.3
        assert_eq!(summarize(&[4, 5]).0, 4.5);
        assert_eq!(summarize(&[1, 1, 2]).0, 1.3);
    }
}
