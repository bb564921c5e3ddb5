mod contest;
mod platform;
mod profile;

pub use contest::*;
pub use platform::*;
pub use profile::*;
