pub mod models;
pub mod stream_selector;
pub mod url_source;
