use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    handlers::{auth, category, channel, footer, health, slider, upload::UPLOAD_BODY_LIMIT},
    state::AppState,
};

pub fn create_routes(state: AppState) -> Router {
    // 1. Auth
    let auth_routes = Router::new()
        .route("/api/login", post(auth::login_handler))
        .route("/api/register", post(auth::register_handler));

    // 2. Image-backed resources (uploads get a bigger body limit)
    let image_routes = Router::new()
        .route(
            "/api/sliders",
            get(slider::list_sliders_handler).post(slider::create_slider_handler),
        )
        .route("/api/sliders/:id", delete(slider::delete_slider_handler))
        .route(
            "/api/channels",
            get(channel::list_channels_handler).post(channel::create_channel_handler),
        )
        .route("/api/channels/:id", delete(channel::delete_channel_handler))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    // 3. Plain CRUD
    let content_routes = Router::new()
        .route(
            "/api/categories",
            get(category::list_categories_handler).post(category::create_category_handler),
        )
        .route("/api/categories/:id", delete(category::delete_category_handler))
        .route("/api/footer-links", get(footer::get_footer_links_handler))
        .route(
            "/api/footer-links/:section",
            put(footer::update_footer_section_handler),
        )
        .route("/health", get(health::health_handler));

    let mut router = Router::new()
        .merge(auth_routes)
        .merge(image_routes)
        .merge(content_routes);

    // 4. Uploaded files, only when they live on local disk
    if let Some(mount) = &state.uploads {
        router = router.nest_service(&mount.url_prefix, ServeDir::new(&mount.dir));
    }

    router.with_state(state)
}
