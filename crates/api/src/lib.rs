mod error;
mod job_schedulers;
mod notification;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use error::MailerError;
use job_schedulers::start_send_reminders_job;
use masterclass_mailer_infra::MailerContext;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    cfg.service(
        web::scope("/api")
            .configure(reminder::configure_routes)
            .configure(notification::configure_routes),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| MailerError::BadClientData(err.to_string()).into())
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: MailerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: MailerContext) {
        start_send_reminders_job(context);
    }

    async fn configure_server(context: MailerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let workers = context.config.workers;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port {} with {} workers", port, workers);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(json_config())
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(workers)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
