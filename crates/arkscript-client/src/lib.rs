//! Client side of the arkscript server.
//!
//! The server keeps a working set of uploaded input files, runs scripts
//! against them and exposes the files a script writes for download.
//! [`ScriptServer`] is the seam; [`HttpServer`] talks to a real server and
//! [`Session`] tracks the input and output file lists across calls.

pub mod error;
pub mod files;
pub mod http;
pub mod server;
pub mod session;

pub use error::{ClientError, Result};
pub use http::HttpServer;
pub use server::ScriptServer;
pub use session::Session;
