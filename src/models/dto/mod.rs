pub mod quiz_view;
pub mod request;
