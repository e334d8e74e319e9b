// src/router.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas do painel do admin (papel "admin" exigido em cada handler)
    let admin_routes = Router::new()
        .route("/complaints"
               ,get(handlers::admin::list_complaints)
        )
        .route("/complaints/summary"
               ,get(handlers::admin::complaints_summary)
        )
        .route("/complaints/{id}"
               ,axum::routing::delete(handlers::admin::delete_complaint)
        )
        .route("/complaints/{id}/assignment"
               ,put(handlers::admin::assign_officer)
        )
        .route("/officers"
               ,post(handlers::admin::create_officer)
               .get(handlers::admin::list_officers)
        )
        .route("/officers/{id}"
               ,put(handlers::admin::edit_officer)
               .delete(handlers::admin::delete_officer)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas do painel do oficial (qualquer usuário autenticado)
    let officer_routes = Router::new()
        .route("/complaints"
               ,get(handlers::officer::list_assigned)
        )
        .route("/complaints/summary"
               ,get(handlers::officer::assigned_summary)
        )
        .route("/complaints/sync"
               ,post(handlers::officer::sync_assigned)
        )
        .route("/complaints/{id}"
               ,get(handlers::officer::view_complaint)
        )
        .route("/complaints/{id}/advance"
               ,post(handlers::officer::advance_status)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/admin", admin_routes)
        .nest("/api/officer", officer_routes)
        .with_state(app_state)
}
