use shieldscrape::url_utils::{is_reddit_host, parse_source_url};
use shieldscrape::{normalize, prefer_old_reddit};

const BASE: &str = "https://example.com/blog/post.html";

#[test]
fn normalize_resolves_common_reference_forms() {
    let cases = [
        ("/about", Some("https://example.com/about")),
        ("next.html", Some("https://example.com/blog/next.html")),
        ("../index.html", Some("https://example.com/index.html")),
        ("//static.example.net/app.css", Some("https://static.example.net/app.css")),
        ("https://other.org/page", Some("https://other.org/page")),
        ("example.com/shop", Some("https://example.com/shop")),
        ("mailto:team@example.com", Some("mailto:team@example.com")),
        ("#comments", None),
        ("javascript:void(0)", None),
        ("", None),
    ];

    for (href, expected) in cases {
        assert_eq!(normalize(href, BASE).as_deref(), expected, "href {href:?}");
    }
}

#[test]
fn normalize_is_idempotent() {
    for href in [
        "/about",
        "next.html?page=2",
        "../index.html#top",
        "//static.example.net/app.css",
        "example.com/shop",
        "www.example.com/shop",
        "https://other.org/page",
        "tel:+15550100",
    ] {
        let Some(once) = normalize(href, BASE) else {
            panic!("expected {href:?} to normalize");
        };
        assert_eq!(normalize(&once, BASE), Some(once.clone()), "href {href:?}");
    }
}

#[test]
fn normalize_never_duplicates_the_host() {
    for href in ["example.com/a", "www.example.com/a", "https://example.com/a"] {
        let Some(link) = normalize(href, BASE) else {
            panic!("expected {href:?} to normalize");
        };
        assert_eq!(link.matches("example.com").count(), 1, "{link}");
    }
}

#[test]
fn normalize_needs_an_absolute_base() {
    assert_eq!(normalize("/about", "/relative/base"), None);
    assert_eq!(normalize("/about", ""), None);
}

#[test]
fn prefer_old_reddit_rewrites_new_hosts_once() {
    for url in [
        "https://reddit.com/r/rust/comments/abc/title/",
        "https://www.reddit.com/r/rust/comments/abc/title/",
        "https://new.reddit.com/r/rust/comments/abc/title/",
    ] {
        let once = prefer_old_reddit(url);
        assert_eq!(once, "https://old.reddit.com/r/rust/comments/abc/title/");
        assert_eq!(prefer_old_reddit(&once), once);
    }
}

#[test]
fn prefer_old_reddit_leaves_other_urls_alone() {
    for url in [
        "https://old.reddit.com/r/rust/",
        "https://example.com/r/rust/",
        "https://i.redd.it/image.png",
        "not a url",
    ] {
        assert_eq!(prefer_old_reddit(url), url);
    }
}

#[test]
fn source_urls_must_be_absolute_http() {
    assert!(parse_source_url("https://example.com/").is_ok());
    assert!(parse_source_url("http://example.com/a?b=c").is_ok());
    assert!(parse_source_url("example.com").is_err());
    assert!(parse_source_url("file:///etc/hosts").is_err());
}

#[test]
fn reddit_hosts_are_recognized() {
    assert!(is_reddit_host("old.reddit.com"));
    assert!(is_reddit_host("np.reddit.com"));
    assert!(!is_reddit_host("redd.it"));
    assert!(!is_reddit_host("myreddit.com"));
}
