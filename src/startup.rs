//! src/startup.rs

use crate::authentication::{reject_anonymous_users, reject_non_admin_users, AdminCredentials};
use crate::configuration::{DatabaseSettings, Settings};
use crate::dataset::DatasetStore;
use crate::error::DeskResult;
use crate::page::Page;
use crate::routes::{
    admin_delete_user, admin_login, admin_login_form, admin_panel, admin_update_user, dashboard,
    health_check, home, log_out, login, login_form, profile_form, register, register_form,
    save_profile, upload_dataset,
};
use crate::utils::see_other;
use actix_multipart::form::MultipartFormConfig;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, dev::Server, error::InternalError, web, web::Data, App, HttpServer};
use actix_web_flash_messages::{storage::CookieMessageStore, FlashMessage, FlashMessagesFramework};
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
    store: Data<DatasetStore>,
}

impl Application {
    pub async fn build(configuration: Settings) -> DeskResult<Self> {
        let connection_pool = get_connection_pool(&configuration.database);
        sqlx::migrate!("./migrations")
            .run(&connection_pool)
            .await
            .context("Failed to migrate the database.")?;
        let admin = AdminCredentials::from_settings(&configuration.admin)?;
        let store = Data::new(DatasetStore::new());

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).context("Failed to bind address.")?;
        let port = listener
            .local_addr()
            .context("Failed to read local address.")?
            .port();
        tracing::info!(
            base_url = %configuration.application.base_url,
            port,
            admin.username = admin.username(),
            "Starting datadesk"
        );
        let server = run(
            listener,
            connection_pool,
            admin,
            store.clone(),
            configuration.application.hmac_secret,
            configuration.application.max_upload_bytes,
        )
        .context("Failed to start the http server.")?;

        Ok(Self {
            port,
            server,
            store,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Uploads shared with the cleanup worker.
    pub fn dataset_store(&self) -> Data<DatasetStore> {
        self.store.clone()
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(configuration.max_connections)
        .connect_lazy_with(configuration.connect_options())
}

fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    admin: AdminCredentials,
    store: Data<DatasetStore>,
    hmac_secret: Secret<String>,
    max_upload_bytes: usize,
) -> Result<Server, std::io::Error> {
    // Wrap shared state in smart pointers
    let db_pool = Data::new(db_pool);
    let admin = Data::new(admin);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/register", web::get().to(register_form))
            .route("/register", web::post().to(register))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(log_out))
            .service(
                web::scope("/app")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/dashboard/upload", web::post().to(upload_dataset))
                    .route("/profile", web::get().to(profile_form))
                    .route("/profile", web::post().to(save_profile)),
            )
            .service(
                web::scope("/admin")
                    .route("/login", web::get().to(admin_login_form))
                    .route("/login", web::post().to(admin_login))
                    .service(
                        web::scope("/users")
                            .wrap(from_fn(reject_non_admin_users))
                            .route("", web::get().to(admin_panel))
                            .route("/update", web::post().to(admin_update_user))
                            .route("/delete", web::post().to(admin_delete_user)),
                    ),
            )
            .app_data(db_pool.clone())
            .app_data(admin.clone())
            .app_data(store.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(max_upload_bytes)
                    .memory_limit(max_upload_bytes)
                    .error_handler(|err, _req| {
                        tracing::warn!(error.message = %err, "Rejected upload");
                        FlashMessage::error(
                            "Error uploading the file. Please check its size and try again.",
                        )
                        .send();
                        InternalError::from_response(err, see_other(Page::Main.path())).into()
                    }),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
