mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::JOURNAL_TITLE;

use std::sync::Arc;

use axum::{
    routing::{delete, get, put, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

/// Shared request state: the store handle plus the discovery listing.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Sorted, deduplicated route patterns, served by `/endpoints`.
    pub endpoints: Arc<Vec<String>>,
}

pub fn create_router(db: Database) -> Router {
    // One route table feeds both axum registration and the /endpoints
    // discovery listing, so the two cannot drift apart.
    let routes: Vec<(&'static str, MethodRouter<AppState>)> = vec![
        ("/hello", get(handlers::hello)),
        ("/endpoints", get(handlers::endpoints)),
        ("/title", get(handlers::journal_title)),
        // People
        ("/people", get(handlers::read_people)),
        ("/people/create", put(handlers::create_person)),
        ("/people/update", put(handlers::update_person)),
        ("/people/add_role", put(handlers::add_role)),
        ("/people/delete_role", delete(handlers::delete_role)),
        ("/people/masthead", get(handlers::masthead)),
        ("/people/form", get(handlers::people_form)),
        (
            "/people/{id}",
            get(handlers::read_one_person).delete(handlers::delete_person),
        ),
        // Text pages
        ("/text", get(handlers::read_text)),
        ("/text/create", put(handlers::create_text)),
        ("/text/update", put(handlers::update_text)),
        ("/text/form", get(handlers::text_form)),
        (
            "/text/{page_number}",
            get(handlers::read_one_text).delete(handlers::delete_text),
        ),
        // Manuscripts
        ("/manuscript", get(handlers::read_manuscripts)),
        ("/manuscript/create", put(handlers::create_manuscript)),
        ("/manuscript/update", put(handlers::update_manuscript)),
        ("/manuscript/form", get(handlers::manuscript_form)),
        (
            "/manuscript/{title}",
            get(handlers::read_one_manuscript).delete(handlers::delete_manuscript),
        ),
    ];

    let mut endpoints: Vec<String> = routes.iter().map(|(path, _)| (*path).to_string()).collect();
    endpoints.sort();
    endpoints.dedup();

    let state = AppState {
        db,
        endpoints: Arc::new(endpoints),
    };

    let mut router = Router::new();
    for (path, handler) in routes {
        router = router.route(path, handler);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
