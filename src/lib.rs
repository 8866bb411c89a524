//! # bidirouter
//!
//! **bidirouter** is a bidirectional HTTP request router. Given a request
//! (domain, path, scheme, method) it resolves the handler that should serve
//! it and extracts typed path arguments; given a handler identifier and
//! arguments it produces the corresponding URL.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - compiles `{name:charclass}` route patterns into an
//!   anchored matcher and a reverse template
//! - **[`route`]** - route definitions: one compiled pattern plus domain,
//!   scheme and method filters, default and required arguments
//! - **[`router`]** - the registry, domain bucket priority, identifier
//!   resolution and link generation with query-string fallback
//! - **[`request`]** - the per-request record the router reads and fills in
//! - **[`runtime_config`]** / **[`logging`]** - configuration and tracing setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Bucket as Domain buckets<br/>(descending)
//!     participant Route as RouteDefinition
//!
//!     Caller->>Router: match_request(&mut request)
//!     Router->>Router: Strip registered subdomain<br/>from base URL
//!     alt handler id already set
//!         Router->>Router: Resolve lang / controller / action
//!         Router-->>Caller: Ok
//!     end
//!     loop each bucket, each definition
//!         Router->>Route: matches(request)
//!         Route-->>Router: bool (+ arguments)
//!     end
//!     alt no definition matched
//!         Router-->>Caller: Err(RouteNotFound)
//!     end
//!     Router->>Router: Resolve components, build self URL
//!     Router-->>Caller: Ok
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use bidirouter::{QueryArgs, Request, RouteDefinition, Router};
//!
//! let mut router = Router::new();
//! router.register(RouteDefinition::new(None, r"/{word:\w}.html", "app:main:test").unwrap());
//!
//! let mut request = Request::new("localhost", "/test.html");
//! router.match_request(&mut request).unwrap();
//! assert_eq!(request.query_arg("word"), Some("test"));
//!
//! let mut args = QueryArgs::new();
//! args.insert("word".to_string(), "other".to_string());
//! assert_eq!(router.make(Some("app:main:test"), &args, false, false), "./other.html");
//! ```
//!
//! ## Concurrency
//!
//! Everything is synchronous. Build the routing table once, then clone the
//! router per worker thread: definitions are shared behind `Arc`, and a
//! `Request` belongs to exactly one match call.

pub mod cli;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod request;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use error::RouterError;
pub use request::{QueryArgs, Request};
pub use route::{RouteDefinition, RouteDefinitionBuilder};
pub use router::Router;
pub use runtime_config::RouterConfig;
