pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live};
pub use quiz_handler::{
    get_quiz, index, list_languages, restart_quiz, select_language, submit_answer,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(list_languages)
        .service(get_quiz)
        .service(select_language)
        .service(submit_answer)
        .service(restart_quiz)
        .service(health_check)
        .service(health_check_live);
}
