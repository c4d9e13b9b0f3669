use anyhow::Result;
use dsi_progress_logger::no_logging;
use level_crawler::prelude::*;
use std::net::TcpListener;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Canned responses of the neighbor service, keyed by percent-encoded path.
const ROUTES: &[(&str, u16, &str)] = &[
    (
        "/neighbors/Kevin%20Bacon",
        200,
        r#"{"node": "Kevin Bacon", "neighbors": ["Footloose", "Apollo 13"]}"#,
    ),
    (
        "/neighbors/Footloose",
        200,
        r#"{"node": "Footloose", "neighbors": ["Kevin Bacon", "Lori Singer"]}"#,
    ),
    (
        "/neighbors/Apollo%2013",
        200,
        r#"{"node": "Apollo 13", "neighbors": ["Kevin Bacon", "Tom Hanks"]}"#,
    ),
    ("/neighbors/Lori%20Singer", 200, "{}"),
    ("/neighbors/Tom%20Hanks", 200, "this is not json"),
    ("/neighbors/Broken", 500, "{}"),
];

/// A mock neighbor service.
///
/// The lookups of [`HttpSource`] are blocking, so they are performed on the
/// test thread; the runtime is only used to start the server and to query
/// it, and it is kept alive as long as the server.
struct Service {
    server: MockServer,
    runtime: Runtime,
}

impl Service {
    fn start() -> Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            for &(route, status, body) in ROUTES {
                Mock::given(method("GET"))
                    .and(path(route))
                    .respond_with(
                        ResponseTemplate::new(status)
                            .insert_header("Content-Type", "application/json")
                            .set_body_string(body),
                    )
                    .mount(&server)
                    .await;
            }
            server
        });
        Ok(Self { server, runtime })
    }

    fn base_url(&self) -> String {
        format!("{}/neighbors/", self.server.uri())
    }

    /// The paths requested so far.
    fn requested_paths(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.path().to_owned())
            .collect()
    }
}

#[test]
fn test_lookups() -> Result<()> {
    let service = Service::start()?;
    let source = HttpSourceConfig::default()
        .base_url(service.base_url())
        .system_proxy(false)
        .build()?;

    assert_eq!(source.neighbors("Kevin Bacon")?, ["Footloose", "Apollo 13"]);
    assert!(source.neighbors("Lori Singer")?.is_empty());
    assert!(matches!(
        source.neighbors("Tom Hanks"),
        Err(LookupError::Decode { .. })
    ));
    match source.neighbors("Broken") {
        Err(LookupError::Status { node, status }) => {
            assert_eq!(node, "Broken");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("unexpected result {other:?}"),
    }
    // Unknown nodes get a 404 from the service.
    assert!(matches!(
        source.neighbors("Nobody"),
        Err(LookupError::Status { .. })
    ));

    assert_eq!(
        service.requested_paths(),
        [
            "/neighbors/Kevin%20Bacon",
            "/neighbors/Lori%20Singer",
            "/neighbors/Tom%20Hanks",
            "/neighbors/Broken",
            "/neighbors/Nobody",
        ]
    );
    Ok(())
}

#[test]
fn test_unreachable_service() -> Result<()> {
    // Bind and drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let source = HttpSourceConfig::default()
        .base_url(format!("http://127.0.0.1:{port}/neighbors/"))
        .timeout(Some(Duration::from_secs(5)))
        .system_proxy(false)
        .build()?;

    let err = source.neighbors("A").unwrap_err();
    assert!(matches!(err, LookupError::Transport { .. }));
    assert_eq!(err.node(), "A");

    let levels = traverse(&source, "A", 2, Mode::parallel(), no_logging![]);
    assert_eq!(levels.into_inner(), [vec!["A"], vec![], vec![]]);
    Ok(())
}

#[test]
fn test_crawl() -> Result<()> {
    let service = Service::start()?;
    let source = HttpSourceConfig::default()
        .base_url(service.base_url())
        .system_proxy(false)
        .debug(true)
        .build()?;

    for mode in [Mode::Sequential, Mode::parallel()] {
        let levels = traverse(&source, "Kevin Bacon", 2, mode, no_logging![]);
        assert_eq!(levels[0], ["Kevin Bacon"]);
        let mut level = levels[1].clone();
        level.sort();
        assert_eq!(level, ["Apollo 13", "Footloose"]);
        let mut level = levels[2].clone();
        level.sort();
        assert_eq!(level, ["Lori Singer", "Tom Hanks"]);
    }

    // Nodes at the maximum depth are never looked up, and every other node
    // once per crawl.
    let mut paths = service.requested_paths();
    paths.sort();
    assert_eq!(
        paths,
        [
            "/neighbors/Apollo%2013",
            "/neighbors/Apollo%2013",
            "/neighbors/Footloose",
            "/neighbors/Footloose",
            "/neighbors/Kevin%20Bacon",
            "/neighbors/Kevin%20Bacon",
        ]
    );
    Ok(())
}
