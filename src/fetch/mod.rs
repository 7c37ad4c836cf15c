//! Redirect-chain resolution.
//!
//! - `attempt`: one HEAD probe or GET fallback with its own deadline
//! - `redirects`: the hop-by-hop resolver built on top of it
//! - `request`: request headers and response header extraction

mod attempt;
mod redirects;
mod request;

pub use redirects::{resolve_location, RedirectResolver, ResolverSettings};

#[cfg(test)]
mod tests;
