//! # CLI Module
//!
//! Command-line driver for the router, working against a generated demo
//! table of `--subdomains` buckets holding `--links` literal routes each,
//! plus one catch-all `/{word:\w}.html` route.
//!
//! ## Commands
//!
//! ### `match`
//!
//! ```bash
//! bidirouter match --domain localhost --url /test.html
//! bidirouter match --domain subdomain3.example.com --url /link7/
//! ```
//!
//! ### `make`
//!
//! ```bash
//! bidirouter make pl:app:front:MainController:test --arg word=hello
//! bidirouter make no:such:id --absolute
//! ```
//!
//! ### `routes`
//!
//! ```bash
//! bidirouter --subdomains 2 --links 3 routes
//! ```
//!
//! Router settings come from `--config <FILE>` (YAML) or the
//! `BIDIROUTER_*` environment variables, see [`crate::runtime_config`].

mod commands;


pub use commands::{demo_router, run, run_cli, Cli, Commands};
