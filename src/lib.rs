//! Upcoming contests and user ratings from Niuke, AtCoder and Codeforces,
//! rendered as short chat messages.

pub use adapter::{Adapter, AtcoderAdapter, CodeforcesAdapter, NiukeAdapter};
pub use binding::{resolve_handle, HandleBindings, MemoryBindings};
pub use client::AcmClient;
pub use config::{ClientConfig, Credentials};
pub use cursor::{find_cursor, select_backward};
pub use error::{AcmError, ErrorKind, Result};
pub use model::*;
pub use text::sanitize_name;
pub use time::TimeFormatter;
pub use transport::{HttpResponse, Transport};

pub mod adapter;
pub mod binding;
mod client;
pub mod config;
mod cursor;
mod error;
pub mod model;
pub mod scraper;
mod text;
mod time;
pub mod transport;
