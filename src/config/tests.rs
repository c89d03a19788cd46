use super::*;

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(
        settings.mutations.simulated_latency,
        Duration::from_millis(750)
    );
    assert_eq!(settings.site.blog_page_size.get(), 9);
    assert!(settings.site.seed_demo_content);
    assert_eq!(settings.site.public_url.as_str(), "http://127.0.0.1:3000/");
    assert_eq!(
        settings.uploads.max_request_bytes.get(),
        DEFAULT_UPLOAD_REQUEST_LIMIT_BYTES
    );
    assert_eq!(settings.editor.kind, EditorKind::Textarea);
    assert!(settings.editor.api_key.is_none());
    assert!(settings.admin.access_token.is_none());
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.mutations.simulated_latency_ms = Some(500);

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        mutations_simulated_latency_ms: Some(0),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.mutations.simulated_latency, Duration::ZERO);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_page_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.site.blog_page_size = Some(0);

    let err = Settings::from_raw(raw).expect_err("page size must be positive");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "site.blog_page_size",
            ..
        }
    ));
}

#[test]
fn unknown_editor_kind_is_rejected() {
    let mut raw = RawSettings::default();
    raw.editor.kind = Some("wysiwyg".to_string());

    let err = Settings::from_raw(raw).expect_err("unknown editor");
    assert!(err.to_string().contains("editor.kind"));
}

#[test]
fn hosted_editor_keeps_its_key() {
    let mut raw = RawSettings::default();
    raw.editor.kind = Some("Hosted".to_string());
    raw.editor.api_key = Some("  abc123  ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.editor.kind, EditorKind::Hosted);
    assert_eq!(settings.editor.api_key.as_deref(), Some("abc123"));
}

#[test]
fn blank_admin_token_leaves_admin_open() {
    let mut raw = RawSettings::default();
    raw.admin.access_token = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.admin.access_token.is_none());
}

#[test]
fn public_url_must_be_http() {
    let mut raw = RawSettings::default();
    raw.site.public_url = Some("ftp://example.com".to_string());

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["quire"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "quire",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--site-seed-demo-content",
        "false",
        "--editor-kind",
        "hosted",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.site_seed_demo_content, Some(false));
            assert_eq!(serve.overrides.editor_kind.as_deref(), Some("hosted"));
        }
    }
}

#[test]
fn explicit_config_file_is_layered_over_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("quire.toml");
    std::fs::write(
        &path,
        "[mutations]\nsimulated_latency_ms = 0\n\n[admin]\naccess_token = \"s3cret\"\n",
    )
    .expect("write config");

    let cli = CliArgs {
        config_file: Some(path),
        command: None,
    };
    let settings = load(&cli).expect("settings load");

    assert_eq!(settings.mutations.simulated_latency, Duration::ZERO);
    assert_eq!(settings.admin.access_token.as_deref(), Some("s3cret"));
    assert_eq!(settings.site.blog_page_size.get(), 9);
}

#[test]
fn missing_explicit_config_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cli = CliArgs {
        config_file: Some(dir.path().join("absent.toml")),
        command: None,
    };
    assert!(load(&cli).is_err());
}
