//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    CartService, CatalogService, CheckoutService, InventoryService, OrderService,
};
use crate::domain::vehicle::SegmentImages;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    admin, cart, checkout, health, metrics as metrics_api, orders, vehicles,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub carts: Arc<CartService>,
    pub checkout: Arc<CheckoutService>,
    pub orders: Arc<OrderService>,
    pub inventory: Arc<InventoryService>,
    /// ISO code appended to formatted amounts
    pub currency: Arc<str>,
    pub auth: AuthState,
    /// Set when backed by a database, pinged by `/health`
    pub db: Option<DatabaseConnection>,
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        images: SegmentImages,
        currency: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repos.clone())),
            carts: Arc::new(CartService::new(repos.clone())),
            checkout: Arc::new(CheckoutService::new(repos.clone())),
            orders: Arc::new(OrderService::new(repos.clone())),
            inventory: Arc::new(InventoryService::new(repos.clone(), images)),
            currency: currency.into(),
            auth: AuthState { jwt_config, repos },
            db: None,
            metrics: None,
            started_at: Arc::new(Instant::now()),
        }
    }

    pub fn with_database(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        cart::get_cart,
        cart::add_to_cart,
        cart::cart_count,
        cart::remove_from_cart,
        checkout::checkout,
        orders::list_my_orders,
        admin::list_fleet,
        admin::fleet_stats,
        admin::create_vehicle,
        admin::update_vehicle,
        admin::delete_vehicle,
        admin::list_all_orders,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::StorageHealth,
            vehicles::VehicleDto,
            cart::AddToCartRequest,
            cart::CartItemCreated,
            cart::CartItemDto,
            cart::CartDto,
            cart::CartCountDto,
            orders::OrderDto,
            orders::OrderItemDto,
            admin::VehicleRequest,
            admin::FleetStatsDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Vehicles", description = "Public catalog of bookable vehicles"),
        (name = "Cart", description = "The caller's pending reservations"),
        (name = "Checkout", description = "Turn the cart into an order"),
        (name = "Orders", description = "The caller's booking history"),
        (name = "Admin", description = "Fleet management and all orders, admin role required"),
    ),
    info(
        title = "Luxe Rental Storefront API",
        version = "1.0.0",
        description = "Catalog, cart and checkout for a luxury car rental storefront",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/vehicles", get(vehicles::list_vehicles))
        .route("/api/v1/vehicles/{id}", get(vehicles::get_vehicle));

    let protected_routes = Router::new()
        .route("/api/v1/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route("/api/v1/cart/count", get(cart::cart_count))
        .route("/api/v1/cart/{id}", delete(cart::remove_from_cart))
        .route("/api/v1/checkout", post(checkout::checkout))
        .route("/api/v1/orders", get(orders::list_my_orders))
        .route(
            "/api/v1/admin/vehicles",
            get(admin::list_fleet).post(admin::create_vehicle),
        )
        .route("/api/v1/admin/vehicles/stats", get(admin::fleet_stats))
        .route(
            "/api/v1/admin/vehicles/{id}",
            put(admin::update_vehicle).delete(admin::delete_vehicle),
        )
        .route("/api/v1/admin/orders", get(admin::list_all_orders))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_api::prometheus_metrics))
        .merge(public_routes)
        .merge(protected_routes)
        .route_layer(middleware::from_fn(metrics_api::http_metrics_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartRepository;
    use crate::domain::checkout::{CheckoutStore, CheckoutUnitOfWork};
    use crate::domain::identity::{Role, RoleRepository};
    use crate::domain::order::{Order, OrderItem, OrderRepository};
    use crate::domain::vehicle::{Vehicle, VehicleDraft, VehicleRepository};
    use crate::domain::{DomainError, DomainResult};
    use async_trait::async_trait;
    use crate::infrastructure::crypto::jwt::{create_token, TokenClaims};
    use crate::infrastructure::storage::InMemoryStorage;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    struct Harness {
        store: InMemoryStorage,
        router: Router,
        jwt: JwtConfig,
    }

    impl Harness {
        fn new() -> Self {
            let store = InMemoryStorage::new();
            Self::with_repos(store.clone(), Arc::new(store))
        }

        fn with_repos(store: InMemoryStorage, repos: Arc<dyn RepositoryProvider>) -> Self {
            let jwt = JwtConfig {
                secret: "router-test-secret".into(),
                ..JwtConfig::default()
            };
            let state = AppState::new(
                repos,
                jwt.clone(),
                SegmentImages::default(),
                "USD",
            );
            Self {
                router: create_api_router(state),
                store,
                jwt,
            }
        }

        fn token(&self, user: Uuid) -> String {
            let claims = TokenClaims::new(user, Duration::hours(1), &self.jwt);
            create_token(&claims, &self.jwt).unwrap()
        }

        async fn seed(&self, name: &str) -> Vehicle {
            let fields = VehicleDraft {
                name: name.into(),
                brand: "Aston Martin".into(),
                segment: "sports".into(),
                description: None,
                price_per_day: dec!(650),
                horsepower: Some(671),
                top_speed: Some(202),
                acceleration: Some("3.2s".into()),
                image_url: None,
            }
            .into_fields(&SegmentImages::default())
            .unwrap();
            self.store.vehicles().save(Vehicle::new(fields)).await.unwrap()
        }

        async fn call(
            &self,
            method: Method,
            uri: &str,
            user: Option<Uuid>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }
    }

    fn amount(value: &Value) -> Decimal {
        value.as_str().and_then(|s| s.parse().ok()).unwrap_or(Decimal::MIN)
    }

    fn cart_body(vehicle_id: Uuid) -> Value {
        json!({
            "vehicle_id": vehicle_id,
            "pickup_date": "2025-09-10",
            "pickup_location": "Geneva",
            "return_date": "2025-09-12",
            "return_location": "Geneva"
        })
    }

    #[tokio::test]
    async fn health_reports_memory_store() {
        let h = Harness::new();
        let (status, body) = h.call(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"]["backend"], "memory");
    }

    #[tokio::test]
    async fn catalog_is_public() {
        let h = Harness::new();
        let v = h.seed("DB12").await;

        let (status, body) = h.call(Method::GET, "/api/v1/vehicles", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], v.id.to_string());
        assert_eq!(amount(&body["data"][0]["price_per_day"]), dec!(650));

        let (status, _) = h
            .call(Method::GET, "/api/v1/vehicles?segment=sports", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = h
            .call(Method::GET, "/api/v1/vehicles?segment=boat", None, None)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_vehicle_is_404() {
        let h = Harness::new();
        let uri = format!("/api/v1/vehicles/{}", Uuid::new_v4());
        let (status, body) = h.call(Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Vehicle not found");
    }

    #[tokio::test]
    async fn cart_requires_a_token() {
        let h = Harness::new();
        let (status, _) = h.call(Method::GET, "/api/v1/cart", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = h.call(Method::POST, "/api/v1/checkout", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cart_to_order_flow() {
        let h = Harness::new();
        let v = h.seed("Vantage").await;
        let user = Uuid::new_v4();

        let (status, body) = h
            .call(Method::POST, "/api/v1/cart", Some(user), Some(cart_body(v.id)))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["rental_days"], 2);

        let (_, body) = h.call(Method::GET, "/api/v1/cart/count", Some(user), None).await;
        assert_eq!(body["data"]["count"], 1);

        let (_, body) = h.call(Method::GET, "/api/v1/cart", Some(user), None).await;
        assert_eq!(amount(&body["data"]["items"][0]["subtotal"]), dec!(1300));
        assert_eq!(body["data"]["total_display"], "1300.00 USD");

        let (status, body) = h.call(Method::POST, "/api/v1/checkout", Some(user), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(amount(&body["data"]["total_amount"]), dec!(1300));
        assert_eq!(body["data"]["items"][0]["vehicle_name"], "Vantage");

        let (_, body) = h.call(Method::GET, "/api/v1/cart/count", Some(user), None).await;
        assert_eq!(body["data"]["count"], 0);

        let (_, body) = h.call(Method::GET, "/api/v1/orders", Some(user), None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        let (_, body) = h.call(Method::GET, "/api/v1/vehicles", None, None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

        let (status, body) = h.call(Method::POST, "/api/v1/checkout", Some(user), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Your cart is empty");
    }

    /// Store whose checkout unit of work cannot claim vehicles
    struct ClaimFails(InMemoryStorage);

    struct ClaimFailsUow(Box<dyn CheckoutUnitOfWork>);

    #[async_trait]
    impl CheckoutUnitOfWork for ClaimFailsUow {
        async fn insert_order(&mut self, order: &Order) -> DomainResult<()> {
            self.0.insert_order(order).await
        }
        async fn insert_order_items(&mut self, items: &[OrderItem]) -> DomainResult<()> {
            self.0.insert_order_items(items).await
        }
        async fn remove_cart_items(&mut self, user_id: Uuid, ids: &[Uuid]) -> DomainResult<u64> {
            self.0.remove_cart_items(user_id, ids).await
        }
        async fn claim_vehicle(&mut self, _vehicle_id: Uuid) -> DomainResult<bool> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn commit(self: Box<Self>) -> DomainResult<()> {
            self.0.commit().await
        }
        async fn rollback(self: Box<Self>) -> DomainResult<()> {
            self.0.rollback().await
        }
    }

    #[async_trait]
    impl CheckoutStore for ClaimFails {
        async fn begin(&self) -> DomainResult<Box<dyn CheckoutUnitOfWork>> {
            Ok(Box::new(ClaimFailsUow(self.0.checkout().begin().await?)))
        }
    }

    impl RepositoryProvider for ClaimFails {
        fn vehicles(&self) -> &dyn VehicleRepository {
            self.0.vehicles()
        }
        fn carts(&self) -> &dyn CartRepository {
            self.0.carts()
        }
        fn orders(&self) -> &dyn OrderRepository {
            self.0.orders()
        }
        fn roles(&self) -> &dyn RoleRepository {
            self.0.roles()
        }
        fn checkout(&self) -> &dyn CheckoutStore {
            self
        }
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_is_conflict() {
        let h = Harness::new();
        let (status, body) = h
            .call(Method::POST, "/api/v1/checkout", Some(Uuid::new_v4()), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Your cart is empty");
        assert!(h.store.orders().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_are_listed_newest_first_with_items() {
        let h = Harness::new();
        let user = Uuid::new_v4();

        let mut placed = Vec::new();
        for name in ["Rapide", "Virage"] {
            let v = h.seed(name).await;
            h.call(Method::POST, "/api/v1/cart", Some(user), Some(cart_body(v.id)))
                .await;
            let (status, body) = h.call(Method::POST, "/api/v1/checkout", Some(user), None).await;
            assert_eq!(status, StatusCode::CREATED);
            placed.push(body["data"]["id"].clone());
        }

        let (status, body) = h.call(Method::GET, "/api/v1/orders", Some(user), None).await;
        assert_eq!(status, StatusCode::OK);
        let orders = body["data"].as_array().cloned().unwrap_or_default();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0]["id"], placed[1]);
        assert_eq!(orders[1]["id"], placed[0]);
        assert_eq!(orders[0]["items"][0]["vehicle_name"], "Virage");
        assert_eq!(orders[1]["items"][0]["vehicle_name"], "Rapide");
        assert_eq!(amount(&orders[0]["items"][0]["subtotal"]), dec!(1300));

        let (_, body) = h.call(Method::GET, "/api/v1/orders", Some(Uuid::new_v4()), None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn mid_checkout_failure_is_generic_500_and_rolled_back() {
        let store = InMemoryStorage::new();
        let h = Harness::with_repos(store.clone(), Arc::new(ClaimFails(store)));
        let v = h.seed("One-77").await;
        let user = Uuid::new_v4();
        h.call(Method::POST, "/api/v1/cart", Some(user), Some(cart_body(v.id)))
            .await;

        let (status, body) = h.call(Method::POST, "/api/v1/checkout", Some(user), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to place order");
        assert!(!body.to_string().contains("database is locked"));

        let (_, body) = h.call(Method::GET, "/api/v1/cart/count", Some(user), None).await;
        assert_eq!(body["data"]["count"], 1);
        let (_, body) = h.call(Method::GET, "/api/v1/orders", Some(user), None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
        let (_, body) = h.call(Method::GET, "/api/v1/vehicles", None, None).await;
        assert_eq!(body["data"][0]["id"], v.id.to_string());
    }

    #[tokio::test]
    async fn invalid_window_is_rejected() {
        let h = Harness::new();
        let v = h.seed("DBS").await;
        let mut body = cart_body(v.id);
        body["return_date"] = json!("2025-09-01");

        let (status, _) = h
            .call(Method::POST, "/api/v1/cart", Some(Uuid::new_v4()), Some(body))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut body = cart_body(v.id);
        body["pickup_location"] = json!("");
        let (status, _) = h
            .call(Method::POST, "/api/v1/cart", Some(Uuid::new_v4()), Some(body))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn cart_items_of_other_users_are_not_found() {
        let h = Harness::new();
        let v = h.seed("Valour").await;
        let owner = Uuid::new_v4();
        let (_, body) = h
            .call(Method::POST, "/api/v1/cart", Some(owner), Some(cart_body(v.id)))
            .await;
        let item_id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/cart/{}", item_id);
        let (status, _) = h.call(Method::DELETE, &uri, Some(Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = h.call(Method::DELETE, &uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_routes_check_role() {
        let h = Harness::new();
        let customer = Uuid::new_v4();
        let admin = Uuid::new_v4();
        h.store.roles().grant(admin, Role::Admin).await.unwrap();

        let request = json!({
            "name": "Cullinan",
            "brand": "Rolls-Royce",
            "segment": "suv",
            "price_per_day": "1800.00"
        });

        let (status, _) = h
            .call(Method::POST, "/api/v1/admin/vehicles", Some(customer), Some(request.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = h
            .call(Method::POST, "/api/v1/admin/vehicles", Some(admin), Some(request))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["segment"], "suv");
        assert!(!body["data"]["image_url"].as_str().unwrap_or_default().is_empty());

        let (_, body) = h
            .call(Method::GET, "/api/v1/admin/vehicles/stats", Some(admin), None)
            .await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["available"], 1);

        let (status, _) = h
            .call(Method::GET, "/api/v1/admin/orders", Some(customer), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_404() {
        let h = Harness::new();
        let (status, _) = h.call(Method::GET, "/metrics", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
