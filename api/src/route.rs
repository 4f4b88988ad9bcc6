//! referral reward settlement service

pub mod referral;
pub mod utils;

use actix_cors::Cors;
use actix_web::{http, middleware, App, HttpServer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    common::log::init_logger();
    let service: String = format!("0.0.0.0:{}", common::env::CONF.api_port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
                    .allowed_header(http::header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .configure(referral::configure_routes)
    })
    .bind(service)?
    .run()
    .await
}
