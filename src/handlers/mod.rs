mod auth;
mod health;
mod librarian;
mod metrics;
mod newsletter;
mod tracking;

pub use auth::magic_link_handler;
pub use health::health_handler;
pub use librarian::librarian_handler;
pub use metrics::metrics_handler;
pub use newsletter::subscribe_handler;
pub use tracking::click_handler;
