use std::{env, net::SocketAddr, sync::Arc};

use axum::routing::get;
use employee_service::{
    api::{self, handler::employee, state::EmployeeAppState},
    config::{ConfigSource, ServiceConfig},
    domain::service::EmployeeService,
    infrastructure::client::HttpEmployeeClient,
};
use reqwest::Url;
use tokio::net::TcpListener;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        employee::find_all,
        employee::search_by_name,
        employee::find_by_id,
        employee::highest_salary,
        employee::top_ten_highest_earning_names,
        employee::create,
        employee::delete,
    ),
    tags(
        (name = "Employees", description = "Employee records served from the upstream employee service"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    let config_path =
        env::var("EMPLOYEE_CONFIG_PATH").unwrap_or_else(|_| "employee.toml".to_string());
    let (config, source) =
        ServiceConfig::load(&config_path).expect("Failed to load service config");

    let _guard = shared::telemetry::init_telemetry("employee-service", &config.telemetry);

    match source {
        ConfigSource::File => tracing::info!(?config, "Loaded service config from {config_path}"),
        ConfigSource::Defaults => {
            tracing::info!("Config file not found at {config_path}, using defaults");
        }
    }

    let base_url =
        Url::parse(&config.upstream.base_url).expect("upstream base_url must be a valid URL");
    let client = HttpEmployeeClient::new(base_url, config.upstream.timeout())
        .expect("Failed to build HTTP client");
    tracing::info!(base_url = %client.base_url(), "Using upstream employee service");

    let employee_service = Arc::new(EmployeeService::new(Arc::new(client)));
    let state = Arc::new(EmployeeAppState { employee_service });

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build governor config");

    let app = api::routes(state)
        .route(
            "/headpat",
            get(|| async {
                axum::Json(shared::responses::HeadpatResponse {
                    message: "nyaa~! all systems operational, senpai! (=^-w-^=)",
                })
            }),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Rate limiting (per-IP)
        .layer(GovernorLayer::new(governor_conf))
        // tracing log (turn request into info level)
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(tower_http::LatencyUnit::Millis),
                ),
        );

    let address = config.bind_address();
    tracing::info!("employee-service listening on {address}");

    let listener = TcpListener::bind(&address).await.expect("Failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shared::shutdown::shutdown_signal())
    .await
    .expect("Oppsie! Server crashed!");

    tracing::info!("employee-service shut down");
}
