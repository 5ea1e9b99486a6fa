use actix_web::{web, HttpResponse};
use masterclass_mailer_api_structs::get_service_health::*;
use masterclass_mailer_infra::MailerContext;

async fn status(ctx: web::Data<MailerContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse::healthy(ctx.sys.now()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(status));
}
