use super::{slugify, DefaultArgs, Requirement, RouteDefinition};
use crate::request::{QueryArgs, Request};
use http::Method;

fn args(pairs: &[(&str, &str)]) -> QueryArgs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_match_extracts_argument() {
    let route = RouteDefinition::new(None, r"/link{n:\d}/", "app:main:show").unwrap();
    let mut request = Request::new("localhost", "/link7/");

    assert!(route.matches(&mut request));
    assert_eq!(request.handler_id.as_deref(), Some("app:main:show"));
    assert_eq!(request.query_arg("n"), Some("7"));
}

#[test]
fn test_match_word_placeholder() {
    let route = RouteDefinition::new(None, r"/{word:\w}.html", "app:main:test").unwrap();
    let mut request = Request::new("localhost", "/test.html");

    assert!(route.matches(&mut request));
    assert_eq!(request.query_arg("word"), Some("test"));
}

#[test]
fn test_no_match_leaves_request_untouched() {
    let route = RouteDefinition::new(None, r"/link{n:\d}/", "app:main:show").unwrap();
    let mut request = Request::new("localhost", "/linkx/");

    assert!(!route.matches(&mut request));
    assert!(request.handler_id.is_none());
    assert!(request.query_args.is_empty());
}

#[test]
fn test_placeholders_seed_defaults_and_requirements() {
    let route = RouteDefinition::builder(r"/{lang:a-z}/page/{page:\d}/", "app:page:list")
        .default_arg("page", "1")
        .build()
        .unwrap();

    assert_eq!(route.default_args().get("lang"), Some(&None));
    assert_eq!(route.default_args().get("page"), Some(&Some("1".to_string())));
    assert_eq!(route.required_args().len(), 2);
    assert!(route
        .required_args()
        .values()
        .all(|r| *r == Requirement::Any));
}

#[test]
fn test_requirements_fall_back_to_defaults() {
    let route = RouteDefinition::builder("/list/", "app:list:index")
        .default_arg("sort", "name")
        .build()
        .unwrap();

    assert_eq!(
        route.required_args().get("sort"),
        Some(&Requirement::Value(Some("name".to_string())))
    );
    assert!(route.matches_identifier("app:list:index", &args(&[("sort", "name")])));
    assert!(!route.matches_identifier("app:list:index", &args(&[("sort", "date")])));
    assert!(!route.matches_identifier("app:list:index", &args(&[])));
}

#[test]
fn test_identifier_alone_is_insufficient() {
    let route = RouteDefinition::new(None, "/about/", "app:main:about").unwrap();
    assert!(route.required_args().is_empty());
    assert!(!route.matches_identifier("app:main:about", &args(&[])));
}

#[test]
fn test_matches_identifier_requires_placeholders() {
    let route = RouteDefinition::new(None, r"/user/{id:\d}/", "app:user:show").unwrap();

    assert!(route.matches_identifier("app:user:show", &args(&[("id", "5")])));
    assert!(route.matches_identifier("app:user:show", &args(&[("id", "5"), ("tab", "x")])));
    assert!(!route.matches_identifier("app:user:show", &args(&[])));
    assert!(!route.matches_identifier("app:user:edit", &args(&[("id", "5")])));
}

#[test]
fn test_scheme_filter() {
    let route = RouteDefinition::builder("/secure/", "app:main:secure")
        .scheme("https")
        .build()
        .unwrap();

    let mut plain = Request::new("localhost", "/secure/");
    assert!(!route.matches(&mut plain));

    let mut secure = Request::new("localhost", "/secure/").with_scheme("https");
    assert!(route.matches(&mut secure));
}

#[test]
fn test_method_filter() {
    let route = RouteDefinition::builder("/submit/", "app:form:submit")
        .method(Method::POST)
        .build()
        .unwrap();

    let mut get = Request::new("localhost", "/submit/");
    assert!(!route.matches(&mut get));

    let mut post = Request::new("localhost", "/submit/").with_method(Method::POST);
    assert!(route.matches(&mut post));
}

#[test]
fn test_domain_filter() {
    let route = RouteDefinition::new(Some("shop"), "/cart/", "app:shop:cart").unwrap();

    let mut other = Request::new("example.com", "/cart/");
    assert!(!route.matches(&mut other));

    let mut shop = Request::new("shop.example.com", "/cart/");
    assert!(route.matches(&mut shop));
}

#[test]
fn test_cacheable_propagates() {
    let route = RouteDefinition::builder("/static/", "app:main:static")
        .cacheable(true)
        .build()
        .unwrap();
    let mut request = Request::new("localhost", "/static");

    assert!(route.matches(&mut request));
    assert!(request.cacheable);
}

#[test]
fn test_route_arguments_take_precedence_over_query() {
    let route = RouteDefinition::builder(r"/link{n:\d}/", "app:main:show")
        .default_arg("page", "1")
        .build()
        .unwrap();
    let mut request = Request::new("localhost", "/link7/")
        .with_query_arg("n", "9")
        .with_query_arg("page", "3")
        .with_query_arg("other", "x");

    assert!(route.matches(&mut request));
    assert_eq!(request.query_arg("n"), Some("7"));
    assert_eq!(request.query_arg("page"), Some("1"));
    assert_eq!(request.query_arg("other"), Some("x"));
}

#[test]
fn test_unset_default_clears_query_value() {
    let mut defaults = DefaultArgs::new();
    defaults.insert("sort".to_string(), None);
    let route = RouteDefinition::builder("/list/", "app:list:index")
        .default_args(defaults)
        .build()
        .unwrap();
    let mut request = Request::new("localhost", "/list/")
        .with_query_arg("sort", "name")
        .with_query_arg("page", "2");

    assert!(route.matches(&mut request));
    assert_eq!(request.query_arg("sort"), None);
    assert_eq!(request.query_arg("page"), Some("2"));
}

#[test]
fn test_force_subdomain_as_path() {
    let route = RouteDefinition::builder(r"/{id:\d}/", "app:blog:show")
        .domain("blog")
        .force_subdomain_as_path(true)
        .build()
        .unwrap();

    assert_eq!(route.domain(), None);
    assert_eq!(route.pattern(), r"/blog/{id:\d}/");

    let mut request = Request::new("example.com", "/blog/5/");
    assert!(route.matches(&mut request));
    assert_eq!(request.query_arg("id"), Some("5"));
}

#[test]
fn test_build_relative_url_with_query() {
    let route = RouteDefinition::new(None, r"/user/{id:\d}/", "app:user:show").unwrap();
    let url = route.build_url("http://example.com/", &args(&[("id", "5"), ("tab", "posts")]), false);
    assert_eq!(url, "./user/5/?tab=posts");
}

#[test]
fn test_build_url_encodes_query() {
    let route = RouteDefinition::new(None, "/search/", "app:search:index").unwrap();
    let url = route.build_url("http://example.com/", &args(&[("q", "a b&c")]), false);
    assert_eq!(url, "./search/?q=a+b%26c");
}

#[test]
fn test_build_url_skips_defaults_and_empty_values() {
    let route = RouteDefinition::builder("/list/", "app:list:index")
        .default_arg("page", "1")
        .build()
        .unwrap();

    assert_eq!(
        route.build_url("http://example.com/", &args(&[("page", "1"), ("q", "")]), false),
        "./list/"
    );
    assert_eq!(
        route.build_url("http://example.com/", &args(&[("page", "2")]), false),
        "./list/?page=2"
    );
}

#[test]
fn test_build_url_token_means_default() {
    let route = RouteDefinition::new(None, "/{a:a-z}/{b:a-z}/", "app:main:pair").unwrap();
    let url = route.build_url("http://example.com/", &args(&[("a", "x"), ("b", ":b")]), false);
    assert_eq!(url, "./x/");
}

#[test]
fn test_build_url_query_only() {
    let route = RouteDefinition::new(None, "", "app:main:index").unwrap();
    let url = route.build_url("http://example.com/", &args(&[("a", "b")]), false);
    assert_eq!(url, "?a=b");
}

#[test]
fn test_build_absolute_url() {
    let route = RouteDefinition::new(None, r"/user/{id:\d}/", "app:user:show").unwrap();
    let url = route.build_url("http://example.com/", &args(&[("id", "5")]), true);
    assert_eq!(url, "http://example.com/user/5/");
}

#[test]
fn test_build_url_splices_subdomain() {
    let route = RouteDefinition::new(Some("shop"), "/cart/", "app:shop:cart").unwrap();
    let url = route.build_url("http://example.com/", &args(&[]), false);
    assert_eq!(url, "http://shop.example.com/cart/");
}

#[test]
fn test_build_url_qualified_domain() {
    let route = RouteDefinition::new(Some("https://static.example.org"), "/logo/", "app:asset:logo").unwrap();
    let url = route.build_url("http://example.com/", &args(&[]), false);
    assert_eq!(url, "https://static.example.org/logo/");
}

#[test]
fn test_build_url_rewrites_scheme() {
    let route = RouteDefinition::builder("/login/", "app:auth:login")
        .scheme("HTTPS")
        .build()
        .unwrap();
    let url = route.build_url("http://example.com/", &args(&[]), true);
    assert_eq!(url, "https://example.com/login/");
}

#[test]
fn test_rebuilt_domain_is_memoised() {
    let route = RouteDefinition::new(Some("shop"), "/cart/", "app:shop:cart").unwrap();
    let first = route.build_url("http://a.com/", &args(&[]), false);
    let second = route.build_url("http://b.com/", &args(&[]), false);
    assert_eq!(first, "http://shop.a.com/cart/");
    assert_eq!(second, first);
}

#[test]
fn test_build_then_match_round_trip() {
    let route = RouteDefinition::new(
        None,
        r"/{lang:a-z}/article/{year:\d}-{slug:a-z0-9_}/",
        "app:article:show",
    )
    .unwrap();
    let supplied = args(&[("lang", "en"), ("year", "2024"), ("slug", "hello_world")]);

    let url = route.build_url("http://example.com/", &supplied, false);
    let path = url.trim_start_matches('.');
    let mut request = Request::new("example.com", path);

    assert!(route.matches(&mut request));
    assert_eq!(request.query_args, supplied);
}

#[test]
fn test_slug_arguments() {
    let route = RouteDefinition::builder("/tag/{name:a-z0-9-}/", "app:tag:show")
        .slug_arguments(true)
        .build()
        .unwrap();
    let url = route.build_url("http://example.com/", &args(&[("name", "Rust Lang!")]), false);
    assert_eq!(url, "./tag/rust-lang/");
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Zażółć gęślą"), "za-gl");
    assert_eq!(slugify("-.trim me.-"), "trim-me");
    assert_eq!(slugify("snake_case stays"), "snake_case-stays");
}
