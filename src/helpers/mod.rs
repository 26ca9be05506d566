//! Helper functions shared by the page renderers and the shell
//!
//! Small, pure string builders: HTML snippets, date display, and
//! `{contact.*}` substitution.

mod date;
mod html;
mod template;

pub use date::*;
pub use html::*;
pub use template::*;
