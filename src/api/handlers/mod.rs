//! HTTP request handlers.

mod health;
mod qr;
mod redirect;
mod shorten;

pub use health::health_handler;
pub use qr::qr_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
