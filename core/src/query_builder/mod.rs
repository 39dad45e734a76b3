pub mod args;
pub mod bind;
pub mod params;
pub mod placeholder;
pub mod template;
mod util;

pub use args::{Argument, SqlParams};
pub use bind::{prepare, Binder, Prepared, UnusedParameters};
pub use params::Params;
pub use placeholder::Placeholder;
pub use template::{Substitutions, Syntax, Template};
