//! # REST API Routes
//!
//! Axum routes for the country lookups.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Router,
};

use super::errors::{ApiError, ApiResult};
use super::handler::{CountryHandler, Listing, Single};
use super::parser::{parse_fields, PageLimits, QueryOptions, RawQuery};
use crate::store::CountryStore;

/// REST API server state
pub struct RestServer<S: CountryStore> {
    handler: CountryHandler<S>,
    limits: PageLimits,
}

impl<S: CountryStore + 'static> RestServer<S> {
    pub fn new(handler: CountryHandler<S>, limits: PageLimits) -> Self {
        Self { handler, limits }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/all", get(all_handler::<S>))
            .route("/alpha", get(alpha_batch_handler::<S>))
            .route("/alpha/", get(|| missing("code")))
            .route("/alpha/:code", get(alpha_handler::<S>))
            .route("/name", get(|| missing("name")))
            .route("/name/", get(|| missing("name")))
            .route("/name/:name", get(name_handler::<S>))
            .route("/currency", get(|| missing("currency")))
            .route("/currency/", get(|| missing("currency")))
            .route("/currency/:currency", get(currency_handler::<S>))
            .route("/lang", get(|| missing("language")))
            .route("/lang/", get(|| missing("language")))
            .route("/lang/:language", get(language_handler::<S>))
            .route("/capital", get(|| missing("capital")))
            .route("/capital/", get(|| missing("capital")))
            .route("/capital/:name", get(capital_handler::<S>))
            .with_state(state)
    }

    fn options(&self, raw: &RawQuery) -> ApiResult<QueryOptions> {
        QueryOptions::parse(raw, &self.limits)
    }
}

/// Shared state type
type ServerState<S> = Arc<RestServer<S>>;

/// Routes hit with an empty identifying segment
async fn missing(param: &'static str) -> ApiError {
    ApiError::MissingParameter(param)
}

/// Query string, with a malformed one reported as an `ApiError`
type QueryParams = Result<Query<RawQuery>, QueryRejection>;

/// Single path segment, with a malformed one reported as an `ApiError`
type Segment = Result<Path<String>, PathRejection>;

async fn all_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    query: QueryParams,
) -> ApiResult<Listing> {
    let Query(raw) = query?;
    let opts = server.options(&raw)?;
    server.handler.all(&opts)
}

async fn alpha_batch_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    query: QueryParams,
) -> ApiResult<Listing> {
    let Query(raw) = query?;
    let opts = server.options(&raw)?;
    server.handler.by_codes(raw.code.as_deref(), &opts)
}

async fn alpha_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    code: Segment,
    query: QueryParams,
) -> ApiResult<Single> {
    let (Path(code), Query(raw)) = (code?, query?);
    let projection = parse_fields(raw.fields.as_deref())?;
    server.handler.by_code(Some(&code), projection)
}

async fn name_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    name: Segment,
    query: QueryParams,
) -> ApiResult<Listing> {
    let (Path(name), Query(raw)) = (name?, query?);
    let opts = server.options(&raw)?;
    server.handler.by_name(Some(&name), &opts)
}

async fn currency_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    currency: Segment,
    query: QueryParams,
) -> ApiResult<Listing> {
    let (Path(currency), Query(raw)) = (currency?, query?);
    let opts = server.options(&raw)?;
    server.handler.by_currency(Some(&currency), &opts)
}

async fn language_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    language: Segment,
    query: QueryParams,
) -> ApiResult<Listing> {
    let (Path(language), Query(raw)) = (language?, query?);
    let opts = server.options(&raw)?;
    server.handler.by_language(Some(&language), &opts)
}

async fn capital_handler<S: CountryStore + 'static>(
    State(server): State<ServerState<S>>,
    name: Segment,
    query: QueryParams,
) -> ApiResult<Single> {
    let (Path(name), Query(raw)) = (name?, query?);
    let projection = parse_fields(raw.fields.as_deref())?;
    server.handler.by_capital(Some(&name), projection)
}
