use axum::{routing::get, Router};
use bson::doc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::app_conf::AppConfig;
use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::Role;
use crate::repository::product_repo::MongoProductRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::product_router::product_router;
use crate::router::user_router::user_router;
use crate::service::product_service::ProductServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::ServiceError;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
    pub product_service: Arc<ProductServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        // One shared client for every repository, opened here and dropped at
        // shutdown. A failed ping is logged, not fatal: the process stays up
        // and data operations fail until the database is reachable.
        let db = mongo_config
            .connect()
            .await
            .expect("Failed to build MongoDB client");
        match db.run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => info!("MongoDB connected"),
            Err(e) => error!(
                "MongoDB connection error: {} (data operations will fail until it is reachable)",
                e
            ),
        }

        let user_repo = Arc::new(MongoUserRepository::new(&db));
        if let Err(e) = user_repo.ensure_indexes().await {
            warn!("Failed to create user indexes: {e}");
        }
        let product_repo = Arc::new(MongoProductRepository::new(&db));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));
        let product_service = Arc::new(ProductServiceImpl::new(product_repo));

        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
        });

        let mut app = App {
            config,
            router: Router::new(),
            user_service,
            product_service,
        };
        app.router = app.create_router(auth_state);
        app.create_first_admin_user().await;
        app
    }

    fn create_router(&self, auth_state: Arc<AuthState>) -> Router {
        Router::new()
            .merge(user_router(self.user_service.clone()))
            .merge(product_router(self.product_service.clone(), auth_state))
            .route("/health", get(|| async { "OK" }))
            // Browser frontends are served from another origin.
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                info!("Admin user config not set, skipping bootstrap: {e}");
                return;
            }
        };

        match self
            .user_service
            .register(
                &admin_conf.username,
                &admin_conf.email,
                &admin_conf.password,
                Role::Admin,
            )
            .await
        {
            Ok(_) => info!("First admin user created."),
            Err(ServiceError::Conflict(_)) => {
                info!("Admin user already exists, skipping creation.")
            }
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
