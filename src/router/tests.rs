use super::{Identifier, IdentifierFormat, Router};
use crate::error::RouterError;
use crate::request::{QueryArgs, Request};
use crate::route::RouteDefinition;

fn parse(identifier: &str) -> Result<Identifier, RouterError> {
    IdentifierFormat::default().parse(Some(identifier), &Identifier::default())
}

fn parts(lang: Option<&str>, controller: &str, action: Option<&str>) -> Identifier {
    Identifier {
        lang: lang.map(str::to_string),
        controller: Some(controller.to_string()),
        action: action.map(str::to_string),
    }
}

#[test]
fn test_parse_without_lang() {
    assert_eq!(parse("app:main:show").unwrap(), parts(None, "app:main", Some("show")));
}

#[test]
fn test_parse_with_lang() {
    assert_eq!(
        parse("pl:app:front:MainController:action1").unwrap(),
        parts(Some("pl"), "app:front:MainController", Some("action1"))
    );
    assert_eq!(parse("en:main:show").unwrap(), parts(Some("en"), "main", Some("show")));
}

#[test]
fn test_parse_rejects_short_identifiers() {
    for identifier in ["onlyonepart", "two:parts"] {
        assert_eq!(
            parse(identifier).unwrap_err(),
            RouterError::InvalidIdentifier {
                identifier: identifier.to_string()
            }
        );
    }
}

#[test]
fn test_parse_empty_uses_fallback() {
    let fallback = parts(Some("de"), "shop:cart", Some("index"));
    let format = IdentifierFormat::default();
    assert_eq!(format.parse(None, &fallback).unwrap(), fallback);
    assert_eq!(format.parse(Some(""), &fallback).unwrap(), fallback);
}

#[test]
fn test_parse_inherits_missing_action() {
    let fallback = parts(None, "x", Some("index"));
    let parsed = IdentifierFormat::default()
        .parse(Some("app:main:"), &fallback)
        .unwrap();
    assert_eq!(parsed, parts(None, "app:main", Some("index")));
}

#[test]
fn test_format_and_namespace() {
    let format = IdentifierFormat::default();
    assert_eq!(format.format(&parts(Some("pl"), "app:main", Some("show"))), "pl:app:main:show");
    assert_eq!(format.format(&parts(None, "app:main", Some("show"))), "app:main:show");
    assert_eq!(format.namespace("app:front/Main"), "app::controller::front::Main");
    assert_eq!(format.namespace(":main"), "main");
    assert_eq!(format.sanitize("app:front/Main:show"), "app_front_Main_show");
}

#[test]
fn test_custom_separators() {
    let format = IdentifierFormat::new(".", "\\", "ctrl");
    let parsed = format.parse(Some("app.blog.list"), &Identifier::default()).unwrap();
    assert_eq!(parsed, parts(None, "app.blog", Some("list")));
    assert_eq!(format.namespace("app.blog"), "app\\ctrl\\blog");
}

#[test]
fn test_match_sets_components_and_self_url() {
    let mut router = Router::new();
    router.register(RouteDefinition::new(None, r"/link{n:\d}/", "app:main:show").unwrap());

    let mut request = Request::new("localhost", "/link7/");
    router.match_request(&mut request).unwrap();

    assert_eq!(request.handler_id.as_deref(), Some("app:main:show"));
    assert_eq!(request.resolved_lang, None);
    assert_eq!(request.resolved_controller.as_deref(), Some("app::controller::main"));
    assert_eq!(request.resolved_action.as_deref(), Some("show"));
    assert_eq!(request.self_url.as_deref(), Some("./link7/"));
    assert_eq!(router.context().identifier.as_deref(), Some("app:main:show"));
}

#[test]
fn test_resolve_domain_strips_registered_subdomain() {
    let mut router = Router::new();
    router.register(RouteDefinition::new(Some("shop"), r"/cart/{id:\d}/", "app:shop:cart").unwrap());
    router.register(RouteDefinition::new(Some("sho"), "/x/", "app:shop:x").unwrap());

    let mut request = Request::new("shop.example.com", "/cart/5/");
    router.match_request(&mut request).unwrap();

    assert_eq!(request.base_url, "http://example.com/");
    assert_eq!(router.context().base_url, "http://example.com/");
    assert_eq!(request.self_url.as_deref(), Some("http://shop.example.com/cart/5/"));
}

#[test]
fn test_resolve_domain_strips_one_subdomain_only() {
    let mut router = Router::new();
    router.register(RouteDefinition::new(Some("a"), "/x/", "app:a:x").unwrap());
    router.register(RouteDefinition::new(Some("b"), "/y/", "app:b:y").unwrap());

    let mut request = Request::new("a.b.example.com", "/x/");
    router.match_request(&mut request).unwrap();

    assert_eq!(request.handler_id.as_deref(), Some("app:a:x"));
    assert_eq!(request.base_url, "http://b.example.com/");
}

#[test]
fn test_resolve_domain_ignores_two_level_hosts() {
    let mut router = Router::new();
    router.register(RouteDefinition::new(None, "/", "app:main:index").unwrap());
    router.register(RouteDefinition::new(Some("example"), "/x/", "app:main:x").unwrap());

    let mut request = Request::new("example.com", "/");
    router.match_request(&mut request).unwrap();
    assert_eq!(request.base_url, "http://example.com/");
}

#[test]
fn test_make_inherits_context_components() {
    let mut router = Router::new();
    router.register(RouteDefinition::new(None, r"/{id:\d}/", "pl:app:main:show").unwrap());
    router.register(RouteDefinition::new(None, r"/list/{page:\d}/", "pl:app:main:list").unwrap());

    let mut request = Request::new("localhost", "/5/");
    router.match_request(&mut request).unwrap();

    let mut args = QueryArgs::new();
    args.insert("page".to_string(), "2".to_string());
    assert_eq!(router.make(Some("app:main:list"), &args, false, false), "./list/2/");
    assert_eq!(
        router.resolve_identifier(Some("app:main:list")).unwrap(),
        "pl:app:main:list"
    );
}

#[test]
fn test_make_invalid_identifier_falls_back() {
    let router = Router::new();
    assert_eq!(
        router.make(Some("onlyonepart"), &QueryArgs::new(), false, false),
        "?controller=onlyonepart"
    );
}

#[test]
fn test_make_controller_argument_overrides_fallback_name() {
    let router = Router::new();
    let mut args = QueryArgs::new();
    args.insert("controller".to_string(), "custom".to_string());
    args.insert("id".to_string(), "3".to_string());
    assert_eq!(
        router.make(Some("app:main:show"), &args, false, false),
        "?controller=custom&id=3"
    );
}
