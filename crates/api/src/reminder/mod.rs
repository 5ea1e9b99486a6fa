pub mod send_reminders;

use actix_web::web;
use send_reminders::send_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cron/send-reminders", web::get().to(send_reminders_controller));
}
