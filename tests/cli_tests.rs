use clap::Parser;
use form_learner::cli::commands::{cmd_fill, cmd_learn, cmd_replay, cmd_submit, cmd_suggest};
use form_learner::cli::config::{
    AppConfig, Cli, Commands, FieldArgs, Settings, load_config, resolve_settings,
};
use form_learner::page::page_model::Page;
use form_learner::tracker::tracker::EventOutcome;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_learn() {
    let cli = Cli::parse_from([
        "form-learner",
        "learn",
        "--id",
        "Email",
        "--type",
        "email",
        "--value",
        "a@b.com",
    ]);
    match cli.command {
        Commands::Learn { value, field, tag } => {
            assert_eq!(value, "a@b.com");
            assert_eq!(field.id, "Email");
            assert_eq!(field.name, "");
            assert_eq!(field.field_type, "email");
            assert_eq!(tag, "input");
        }
        _ => panic!("Expected Learn command"),
    }
}

#[test]
fn cli_parse_fill_with_globals() {
    let cli = Cli::parse_from([
        "form-learner",
        "-vv",
        "--data-dir",
        "/tmp/kb",
        "fill",
        "--page",
        "page.json",
        "--form",
        "signup",
        "-o",
        "out.json",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.data_dir.as_deref(), Some("/tmp/kb"));
    match cli.command {
        Commands::Fill { page, form, output } => {
            assert_eq!(page, "page.json");
            assert_eq!(form, "signup");
            assert_eq!(output.as_deref(), Some("out.json"));
        }
        _ => panic!("Expected Fill command"),
    }
}

#[test]
fn cli_parse_submit_default_tag() {
    let cli = Cli::parse_from(["form-learner", "submit"]);
    match cli.command {
        Commands::Submit { tag } => assert_eq!(tag, "form"),
        _ => panic!("Expected Submit command"),
    }
}

#[test]
fn cli_learn_requires_value() {
    let result = Cli::try_parse_from(["form-learner", "learn", "--id", "email"]);
    assert!(result.is_err());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.storage.dir, ".form-learner");
    assert_eq!(config.storage.key, "formLearningData");
    assert_eq!(config.status.log_path.as_deref(), Some("form_status.jsonl"));
}

#[test]
fn config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/form-learner.yaml"));
    assert_eq!(config.storage.key, "formLearningData");
}

#[test]
fn config_partial_yaml_and_null_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form-learner.yaml");
    std::fs::write(&path, "storage:\n  dir: /var/kb\nstatus:\n  log_path: null\n").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.storage.dir, "/var/kb");
    assert_eq!(config.storage.key, "formLearningData", "Unset key keeps default");
    assert_eq!(config.status.log_path, None);
}

#[test]
fn config_malformed_yaml_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "storage: [unclosed").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.storage.dir, ".form-learner");
}

#[test]
fn settings_cli_overrides_config() {
    let cli = Cli::parse_from(["form-learner", "--data-dir", "/cli/dir", "status"]);
    let mut config = AppConfig::default();
    config.storage.dir = "/config/dir".into();
    config.status.log_path = None;

    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.data_dir, "/cli/dir");
    assert_eq!(settings.status_log, None);

    let cli = Cli::parse_from(["form-learner", "--status-log", "s.jsonl", "status"]);
    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.data_dir, "/config/dir");
    assert_eq!(settings.status_log.as_deref(), Some("s.jsonl"));
}

// ============================================================================
// Command Tests (file-backed storage in a temp dir)
// ============================================================================

fn temp_settings(dir: &tempfile::TempDir) -> Settings {
    Settings {
        data_dir: dir.path().join("kb").to_string_lossy().into_owned(),
        storage_key: "formLearningData".into(),
        status_log: None,
    }
}

fn field(id: &str, field_type: &str) -> FieldArgs {
    FieldArgs {
        id: id.into(),
        field_type: field_type.into(),
        ..FieldArgs::default()
    }
}

#[test]
fn learn_then_suggest_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);

    let key = cmd_learn(&settings, &field("Email", "email"), "input", "a@b.com").unwrap();
    assert_eq!(key.unwrap().as_str(), "email");

    assert_eq!(
        cmd_suggest(&settings, &field("Email", "email"), "input"),
        Some("a@b.com".to_string())
    );
    assert_eq!(cmd_suggest(&settings, &field("Email", "password"), "input"), None);
    assert_eq!(cmd_suggest(&settings, &field("phone", "tel"), "input"), None);
}

#[test]
fn learn_password_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);

    let key = cmd_learn(&settings, &field("pw", "password"), "input", "hunter2").unwrap();
    assert_eq!(key, None);
    assert!(!dir.path().join("kb").join("formLearningData.json").exists());
}

#[test]
fn submit_counts_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);

    assert_eq!(cmd_submit(&settings, "form").unwrap(), Some(1));
    assert_eq!(cmd_submit(&settings, "form").unwrap(), Some(2));
    assert_eq!(cmd_submit(&settings, "span").unwrap(), None);
}

#[test]
fn fill_writes_page_output() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);
    cmd_learn(&settings, &field("email", "email"), "input", "a@b.com").unwrap();

    let page_path = dir.path().join("page.json");
    std::fs::write(
        &page_path,
        r#"{"forms": [{"id": "signup", "fields": [
            {"tag": "input", "id": "email", "type": "email"},
            {"tag": "input", "id": "email", "type": "password"}
        ]}]}"#,
    )
    .unwrap();
    let out_path = dir.path().join("out.json");

    let count = cmd_fill(
        &settings,
        page_path.to_str().unwrap(),
        "signup",
        out_path.to_str(),
    )
    .unwrap();
    assert_eq!(count, 1);

    let page: Page = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let node = page.form("signup").unwrap();
    assert_eq!(node.fields[0].value, "a@b.com");
    assert_eq!(node.fields[1].value, "");
}

#[test]
fn fill_unknown_form_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);
    let page_path = dir.path().join("page.json");
    std::fs::write(&page_path, r#"{"forms": []}"#).unwrap();

    assert!(cmd_fill(&settings, page_path.to_str().unwrap(), "nope", None).is_err());
}

#[test]
fn replay_applies_events_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let settings = temp_settings(&dir);

    let page_path = dir.path().join("page.json");
    std::fs::write(
        &page_path,
        r#"{"forms": [{"id": "signup", "fields": [{"tag": "input", "name": "user_email", "placeholder": "you@example.com"}]}]}"#,
    )
    .unwrap();
    let events_path = dir.path().join("events.json");
    std::fs::write(
        &events_path,
        r#"[
            {"type": "change", "target": {"tag": "input", "name": "user_email", "placeholder": "you@example.com", "value": "a@b.com"}},
            {"type": "submit", "target": {"tag": "form", "id": "signup"}},
            {"type": "subtreeInserted", "forms": [{"id": "again", "fields": [{"tag": "input", "name": "user_email", "placeholder": "you@example.com"}]}]},
            {"type": "fillRequested", "form": "again"}
        ]"#,
    )
    .unwrap();
    let out_path = dir.path().join("final.json");

    let outcomes = cmd_replay(
        &settings,
        page_path.to_str().unwrap(),
        events_path.to_str().unwrap(),
        out_path.to_str(),
        0,
    )
    .unwrap();

    assert_eq!(outcomes.len(), 4);
    match &outcomes[0] {
        EventOutcome::Learned(key) => assert_eq!(key.as_str(), "user_email_you_example_com"),
        other => panic!("Expected Learned, got {:?}", other),
    }
    assert_eq!(outcomes[1], EventOutcome::Submitted { form_count: 1 });
    assert_eq!(
        outcomes[2],
        EventOutcome::Scanned {
            new_forms: 1,
            highlighted: 1
        }
    );
    assert_eq!(
        outcomes[3],
        EventOutcome::Filled {
            form: "again".into(),
            count: 1
        }
    );

    let page: Page = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(page.form("again").unwrap().fields[0].value, "a@b.com");
}
