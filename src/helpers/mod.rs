//! Helper functions shared by the views, the CLI and the server

mod date;
mod url;

pub use date::*;
pub use url::*;
