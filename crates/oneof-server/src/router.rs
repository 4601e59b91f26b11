use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::SearchSchema;

#[derive(Clone)]
struct AppState {
    schema: SearchSchema,
    path: Arc<str>,
}

/// `POST path` executes GraphQL requests, `GET path` serves GraphiQL.
pub fn router(schema: SearchSchema, path: &str) -> Router {
    let state = AppState {
        schema,
        path: Arc::from(path),
    };

    Router::new()
        .route(path, get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner();
    tracing::debug!(operation_name = ?request.operation_name, "executing GraphQL request");

    let response = state.schema.execute(request).await;

    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request failed");
    }

    response.into()
}

async fn graphiql(State(state): State<AppState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.path).finish())
}
