use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    controller::{admin, application, auth, department, faction, integration, site, ticket, user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Public site metadata
        .route("/api/settings", get(site::public_settings))
        // Authentication and account linking
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/auth/confirm_email/{token}", get(auth::confirm_email))
        .route("/api/auth/forgot_password", post(auth::forgot_password))
        .route("/api/auth/reset_password/{token}", post(auth::reset_password))
        .route("/api/auth/minecraft", post(auth::link_minecraft))
        .route("/api/auth/discord/login", get(auth::discord_login))
        .route("/api/auth/discord/callback", get(auth::discord_callback))
        // Public profiles and factions
        .route("/api/user/whitelisted", get(user::whitelisted_users))
        .route("/api/user/refresh_minecraft", post(user::refresh_minecraft))
        .route("/api/user/{query}", get(user::get_profile))
        .route("/api/faction", get(faction::list))
        .route("/api/faction/{id}", get(faction::get))
        // Whitelist applications
        .route("/api/application", post(application::submit))
        .route("/api/application/mine", get(application::mine))
        // Tickets
        .route("/api/ticket", post(ticket::create))
        .route("/api/ticket/mine", get(ticket::mine))
        .route("/api/ticket/departments", get(ticket::departments))
        .route("/api/ticket/{id}", get(ticket::view))
        .route("/api/ticket/{id}/reply", post(ticket::reply))
        .route("/api/ticket/{id}/close", post(ticket::close))
        .route("/api/ticket/{id}/open", post(ticket::reopen))
        .route("/api/ticket/{id}/department", post(ticket::change_department))
        .route("/api/ticket/{id}/status", post(ticket::change_status))
        // Admin back-office
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/users", get(admin::users_data))
        .route("/api/admin/audit-logs", get(admin::audit_logs_data))
        .route("/api/admin/tickets", get(admin::tickets))
        .route("/api/admin/applications", get(admin::applications))
        .route("/api/admin/application/{id}", get(admin::view_application))
        .route(
            "/api/admin/application/{id}/accept",
            post(admin::accept_application),
        )
        .route(
            "/api/admin/application/{id}/reject",
            post(admin::reject_application),
        )
        .route("/api/admin/user/{id}/whitelist", post(admin::whitelist_user))
        .route(
            "/api/admin/user/{id}/unwhitelist",
            post(admin::unwhitelist_user),
        )
        .route("/api/admin/user/{id}/ban", post(admin::ban_user))
        .route("/api/admin/user/{id}/unban", post(admin::unban_user))
        .route("/api/admin/user/{id}/roles", post(admin::set_roles))
        .route("/api/admin/user/{id}/command", post(admin::queue_command))
        .route("/api/admin/faction", post(admin::create_faction))
        .route("/api/admin/settings", get(admin::get_settings))
        .route("/api/admin/settings", put(admin::update_settings))
        .route(
            "/api/admin/settings/applications",
            post(admin::toggle_applications),
        )
        // Department administration
        .route("/api/admin/department", get(department::list))
        .route("/api/admin/department", post(department::create))
        .route("/api/admin/department/{id}", get(department::get))
        .route("/api/admin/department/{id}", put(department::update))
        .route("/api/admin/department/{id}", delete(department::delete))
        .route("/api/admin/department/{id}/hide", post(department::hide))
        .route("/api/admin/department/{id}/unhide", post(department::unhide))
        .route("/api/admin/department/{id}/disable", post(department::disable))
        .route("/api/admin/department/{id}/enable", post(department::enable))
        // Integration API for game servers and companion binaries
        .route(
            "/api/integration/minecraft/auth",
            post(integration::minecraft_auth_intake),
        )
        .route(
            "/api/integration/minecraft/{uuid}/allow",
            get(integration::allow_connection),
        )
        .route(
            "/api/integration/server-status",
            post(integration::update_server_status),
        )
        .route(
            "/api/integration/server-status/latest",
            get(integration::latest_server_status),
        )
}
