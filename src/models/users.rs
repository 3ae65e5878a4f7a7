use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User account type stored as a lowercase string in the database.
///
/// "both" accounts act as client or provider depending on which side of a
/// contract they are on; the contract's ID fields decide, not this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserType {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "provider")]
    Provider,
    #[sea_orm(string_value = "both")]
    Both,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AccountStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// SeaORM entity for the `users` table.
///
/// `rating_average` and `rating_count` are a derived projection over the
/// ratings table; only the rating aggregator writes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub user_type: UserType,
    pub status: AccountStatus,
    #[sea_orm(column_type = "Double")]
    pub rating_average: f64,
    pub rating_count: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::services::Entity")]
    Services,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body for POST /api/auth/register and the admin POST /api/users.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: Option<UserType>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// Body for POST /api/auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Body for PUT /api/users/{id}. The derived rating fields are not
/// writable through this surface; `user_type` and `status` changes are
/// restricted to admins in the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub user_type: Option<UserType>,
    pub status: Option<AccountStatus>,
}

/// A safe user representation for API responses (never leaks the hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub user_type: UserType,
    pub status: AccountStatus,
    pub rating_average: f64,
    pub rating_count: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            address: m.address,
            bio: m.bio,
            profile_picture: m.profile_picture,
            user_type: m.user_type,
            status: m.status,
            rating_average: m.rating_average,
            rating_count: m.rating_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Login/register response: profile plus a freshly minted bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}
