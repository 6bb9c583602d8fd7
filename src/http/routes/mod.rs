/// Route modules
pub mod activity;
pub mod health;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health::healthz))
        .route("/readyz", web::get().to(health::readyz))
        .route("/version", web::get().to(health::version))
        .service(
            web::scope("/api").service(
                web::resource("/activity")
                    .route(web::get().to(activity::activity_get))
                    .route(web::post().to(activity::activity_post)),
            ),
        );
}
