//! # Router Module
//!
//! The router module resolves incoming requests to handler identifiers and
//! generates URLs back from identifiers and arguments.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding the registry of [`RouteDefinition`](crate::route::RouteDefinition)s,
//!   indexed by handler identifier and by domain filter
//! - Normalising the request base URL when it carries a registered subdomain
//! - Matching requests against domain buckets in priority order
//! - Decomposing handler identifiers into language, controller and action
//! - Building friendly URLs, falling back to query-string URLs
//!
//! ## Architecture
//!
//! 1. **Registration**: each definition is stored once behind an `Arc` and
//!    referenced from both indices, preserving registration order.
//!
//! 2. **Matching**: domain buckets are visited in descending key order, so
//!    `shop` is tried before `blog`, and both before the catch-all bucket of
//!    routes without a domain filter. The first definition that matches wins.
//!
//! 3. **Link generation**: definitions registered for the identifier are
//!    scanned in order for one whose argument shape fits; it renders its
//!    reverse template. Otherwise the link is `?controller=<identifier>&<args>`.
//!
//! ## Example
//!
//! ```rust
//! use bidirouter::request::{QueryArgs, Request};
//! use bidirouter::router::Router;
//! use bidirouter::route::RouteDefinition;
//!
//! let mut router = Router::new();
//! router.register(RouteDefinition::new(None, r"/link{n:\d}/", "app:main:show").unwrap());
//!
//! let mut request = Request::new("localhost", "/link7/");
//! router.match_request(&mut request).unwrap();
//! assert_eq!(request.handler_id.as_deref(), Some("app:main:show"));
//! assert_eq!(request.query_arg("n"), Some("7"));
//!
//! let mut args = QueryArgs::new();
//! args.insert("n".to_string(), "7".to_string());
//! assert_eq!(router.make(Some("app:main:show"), &args, false, false), "./link7/");
//! assert_eq!(router.make(Some("no:such:id"), &QueryArgs::new(), false, false), "?controller=no_such_id");
//! ```

mod core;
mod identifier;
#[cfg(test)]
mod tests;

pub use core::{RouteContext, Router};
pub use identifier::{Identifier, IdentifierFormat};
