mod send_purchase_confirmation;
mod send_registration_email;

use actix_web::web;
use send_purchase_confirmation::send_purchase_confirmation_controller;
use send_registration_email::send_registration_email_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/send-purchase-confirmation",
        web::post().to(send_purchase_confirmation_controller),
    );
    cfg.route(
        "/send-registration-email",
        web::post().to(send_registration_email_controller),
    );
}

/// Value of a required request field, blank values count as missing
fn required_field(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}
