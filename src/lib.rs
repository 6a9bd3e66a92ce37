/// Rebuild - prompt-to-page generator
///
/// Core library providing the generation endpoint: a prompt goes to an
/// upstream text-generation API and comes back as an `{html, css, js}` bundle.

pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
