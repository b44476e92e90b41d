pub mod health;

use actix_web::web;

/// Liveness routes served next to the polling loop
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check));
}
