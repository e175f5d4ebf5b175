pub mod completion_client;
pub mod question_parser;
pub mod quiz_service;
