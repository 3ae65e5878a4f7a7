pub mod auth;
pub mod categories;
pub mod contracts;
pub mod favorites;
pub mod messages;
pub mod notifications;
pub mod ratings;
pub mod service_images;
pub mod services;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login are public; /me requires a token) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::get_users))
            .route("", web::post().to(users::create_user))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    );

    // ── Category routes (reads public, mutations admin-only) ──
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(categories::get_categories))
            .route("", web::post().to(categories::create_category))
            .route("/{id}", web::get().to(categories::get_category))
            .route("/{id}", web::put().to(categories::update_category))
            .route("/{id}", web::delete().to(categories::delete_category)),
    );

    // ── Service routes (reads public, mutations owner/admin) ──
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(services::get_services))
            .route("", web::post().to(services::create_service))
            .route("/{id}", web::get().to(services::get_service))
            .route("/{id}", web::put().to(services::update_service))
            .route("/{id}", web::delete().to(services::delete_service))
            .route(
                "/{service_id}/images",
                web::post().to(service_images::add_service_image),
            )
            .route(
                "/{service_id}/images",
                web::get().to(service_images::get_service_images),
            ),
    );
    cfg.service(
        web::scope("/service-images")
            .route("/{id}", web::put().to(service_images::update_service_image))
            .route(
                "/{id}",
                web::delete().to(service_images::delete_service_image),
            ),
    );

    // ── Contract routes (all protected — the lifecycle engine lives here) ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}", web::delete().to(contracts::delete_contract))
            .route("/{id}/status", web::put().to(contracts::update_status))
            .route(
                "/{id}/negotiate-price",
                web::put().to(contracts::negotiate_price),
            ),
    );

    // ── Rating routes (reads public, writes protected) ──
    cfg.service(
        web::scope("/ratings")
            .route("", web::post().to(ratings::create_rating))
            .route(
                "/service/{service_id}",
                web::get().to(ratings::get_ratings_by_service),
            )
            .route("/user/{user_id}", web::get().to(ratings::get_ratings_by_user))
            .route("/{id}", web::get().to(ratings::get_rating))
            .route("/{id}", web::put().to(ratings::update_rating))
            .route("/{id}", web::delete().to(ratings::delete_rating)),
    );

    // ── Message routes (poll-based; literal paths before the {id} catch-all) ──
    cfg.service(
        web::scope("/messages")
            .route("", web::post().to(messages::send_message))
            .route(
                "/my-conversations",
                web::get().to(messages::get_my_conversations),
            )
            .route("/mark-read", web::put().to(messages::mark_messages_read))
            .route(
                "/contract/{contract_id}",
                web::get().to(messages::get_contract_messages),
            )
            .route(
                "/{other_user_id}",
                web::get().to(messages::get_conversation),
            ),
    );

    // ── Notification routes (all protected) ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route(
                "/mark-all-read",
                web::put().to(notifications::mark_all_notifications_read),
            )
            .route(
                "/{id}/read",
                web::put().to(notifications::mark_notification_read),
            )
            .route(
                "/{id}",
                web::delete().to(notifications::delete_notification),
            ),
    );

    // ── Favorite routes (all protected) ──
    cfg.service(
        web::scope("/favorites")
            .route("", web::get().to(favorites::get_favorites))
            .route("", web::post().to(favorites::add_favorite))
            .route("/check/{service_id}", web::get().to(favorites::check_favorite))
            .route("/{id}", web::delete().to(favorites::remove_favorite)),
    );
}
