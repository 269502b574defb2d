use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;

/// Page engineered so the SEO rubric sums to exactly 95 when analyzed with
/// the keyword "rust": 45-char title with keyword, 140-char meta description
/// with keyword, one h1, two h2, no missing alts, 2% keyword density over
/// exactly 100 body tokens, and 6 internal to 2 external links.
const GOOD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Rust tutorials for curious systems engineers!</title>
    <meta name="description" content="Learn rust from scratch with hands-on examples, profiling tips, and production patterns that turn beginners into confident systems builders.">
</head>
<body>
    <h1>Getting started</h1>
    <img src="/img/cover.png" alt="Cover illustration">
    <p>
        Rust gives teams a dependable path to fast native services without
        giving up memory safety or developer comfort along the way. The
        guides on this site walk through ownership, borrowing, lifetimes,
        traits, and async patterns with small examples that build on each
        other. Every chapter ships with exercises so you can practice Rust
        in your editor instead of only reading about it. Start with the
        installation notes below, then move through the tooling section to
        set up formatting, linting, and tests before tackling the larger
        projects. Happy hacking
    </p>
    <h2>Install</h2>
    <h2>Tooling</h2>
    <img src="/img/setup.png" alt="Setup screenshot">
    <nav>
        <a href="/home">home</a>
        <a href="/docs">docs</a>
        <a href="/blog">blog</a>
        <a href="/about">about</a>
        <a href="/contact">contact</a>
        <a href="/forum">forum</a>
        <a href="https://github.com/example">github</a>
        <a href="https://twitter.com/example">twitter</a>
    </nav>
</body>
</html>
"#;

const BARE_PAGE: &str = "<html><head></head><body><p>hello world</p></body></html>";

/// Starts a fixture server with canned pages and a fake PageSpeed endpoint,
/// returning its base URL.
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route(
                "/good.html",
                web::get().to(|| async { HttpResponse::Ok().body(GOOD_PAGE) }),
            )
            .route(
                "/bare.html",
                web::get().to(|| async { HttpResponse::Ok().body(BARE_PAGE) }),
            )
            .route(
                "/empty",
                web::get().to(|| async { HttpResponse::Ok().body("") }),
            )
            .route(
                "/missing",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/pagespeed",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "lighthouseResult": {
                            "audits": {
                                "uses-optimized-images": {"score": 1},
                                "unminified-css": {"score": 1},
                                "unminified-javascript": {"score": 1},
                                "uses-long-cache-ttl": {"score": 1}
                            }
                        }
                    }))
                }),
            )
            .route(
                "/pagespeed-partial",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "lighthouseResult": {
                            "audits": {
                                "uses-optimized-images": {"score": 1},
                                "unminified-css": {"score": 0.5}
                            }
                        }
                    }))
                }),
            )
            .route(
                "/pagespeed-empty",
                web::get().to(|| async { HttpResponse::Ok().json(json!({})) }),
            )
            .route(
                "/pagespeed-broken",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}
