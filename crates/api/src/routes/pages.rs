//! Page serving.
//!
//! The built front end lives in `STATIC_DIR`. Any path that is not an API
//! route or an existing asset gets `index.html`, so client-side routes such
//! as `/dashboard` and `/create-tour` load the app shell.

use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;

/// Static asset service with the `index.html` fallback.
pub fn service(config: &ServerConfig) -> ServeDir<ServeFile> {
    let index = config.static_dir.join("index.html");
    ServeDir::new(&config.static_dir).fallback(ServeFile::new(index))
}
