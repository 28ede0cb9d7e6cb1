#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use greencampus_gateway::config::{self, SourceKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8000"
  refresh_intervall_ms: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8000");
    assert_eq!(cfg.gateway.refresh_interval_ms, 30000);
    assert_eq!(cfg.source.kind, SourceKind::Fixture);
    assert_eq!(cfg.dashboard.severity.len(), 3);
    assert_eq!(cfg.dashboard.drainage_palette_offset, 2);
    assert_eq!(cfg.map.zoom, 15);
}

#[test]
fn repo_config_parses() {
    let s = std::fs::read_to_string("../../greencampus.yaml").unwrap();
    config::load_from_str(&s).expect("shipped config must be valid");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn refresh_interval_out_of_range() {
    let bad = "version: 1\ngateway:\n  refresh_interval_ms: 10\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn file_source_requires_path() {
    let bad = "version: 1\nsource:\n  kind: file\n";
    assert!(config::load_from_str(bad).is_err());

    let ok = "version: 1\nsource:\n  kind: file\n  path: /tmp/snapshot.json\n";
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.source.kind, SourceKind::File);

    let bad = "version: 1\nsource:\n  path: /tmp/snapshot.json\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn severity_must_ascend_and_reach_one() {
    let descending = r#"
version: 1
dashboard:
  severity:
    - { upper: 0.75, label: Moderate }
    - { upper: 0.4, label: Low }
    - { upper: 1.0, label: High }
"#;
    assert!(config::load_from_str(descending).is_err());

    let short = r#"
version: 1
dashboard:
  severity:
    - { upper: 0.4, label: Low }
    - { upper: 0.9, label: High }
"#;
    assert!(config::load_from_str(short).is_err());

    let empty = "version: 1\ndashboard:\n  severity: []\n";
    assert!(config::load_from_str(empty).is_err());
}

#[test]
fn unknown_breakdown_field_fails_at_load() {
    let bad = r#"
version: 1
dashboard:
  tree_fields:
    - { label: Healthy, field: healthy }
    - { label: Dead, field: dead }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("dead"));
}

#[test]
fn empty_palette_rejected() {
    let bad = "version: 1\ndashboard:\n  palette: []\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn map_zoom_out_of_range() {
    let bad = "version: 1\nmap:\n  zoom: 30\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn cors_origins_default_to_any() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    assert_eq!(cfg.gateway.cors_origins, vec!["*".to_string()]);
}

#[test]
fn cors_origins_are_checked() {
    let ok = "version: 1\ngateway:\n  cors_origins: [\"http://localhost:5173\", \"https://campus.example\"]\n";
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.gateway.cors_origins.len(), 2);

    let bad = "version: 1\ngateway:\n  cors_origins: [\"localhost:5173\"]\n";
    let err = config::load_from_str(bad).expect_err("origin without scheme");
    assert!(err.to_string().contains("cors_origins"));

    let bad = "version: 1\ngateway:\n  cors_origins: [\"*\", \"http://localhost:5173\"]\n";
    assert!(config::load_from_str(bad).is_err());
}
