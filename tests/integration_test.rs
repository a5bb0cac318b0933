use keynudge::config::{parse_duration, Config};
use keynudge::key_sender::{RecordedEvent, RecordingBackend};
use keynudge::keymap::{char_to_keycode, Modifier, KEY_RETURN};
use keynudge::{Combo, ComboTask, KeySender, NudgeError, ProcessFinder, TextTask};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

fn recording_sender() -> (KeySender, RecordingBackend) {
    let backend = RecordingBackend::new();
    let sender = KeySender::with_backend(Box::new(backend.clone()), Duration::ZERO, Duration::ZERO);
    (sender, backend)
}

// Config tests

#[test]
fn test_full_config() {
    let json = r#"
    {
        "app_name": "Cursor",
        "combo": "cmd+enter",
        "combo_interval": "11s",
        "message": "continue doing what you think is best.",
        "message_interval": "2m",
        "key_delay": "50ms",
        "max_retries": 10,
        "pause_hotkey": "ctrl+alt+p",
        "verbose": true
    }
    "#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.app_name, "Cursor");
    assert_eq!(config.combo, "cmd+enter");
    assert_eq!(config.combo_interval, Duration::from_secs(11));
    assert_eq!(config.message, "continue doing what you think is best.");
    assert_eq!(config.message_interval, Duration::from_secs(120));
    assert_eq!(config.key_delay, Duration::from_millis(50));
    assert_eq!(config.max_retries, 10);
    assert_eq!(config.pause_hotkey, "ctrl+alt+p");
    assert!(config.verbose);

    assert!(config.validate().is_ok());
}

#[test]
fn test_minimal_config_uses_defaults() {
    let json = r#"
    {
        "app_name": "TextEdit"
    }
    "#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.app_name, "TextEdit");
    assert_eq!(config.combo, "cmd+enter");
    assert_eq!(config.combo_interval, Duration::from_secs(11));
    assert_eq!(config.message_interval, Duration::from_secs(120));
    assert_eq!(config.key_delay, Duration::from_millis(50));
    assert_eq!(config.max_retries, 10);
    assert_eq!(config.pause_hotkey, "ctrl+alt+p");
    assert!(!config.verbose);

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_operations() -> anyhow::Result<()> {
    let mut temp_file = NamedTempFile::new()?;

    let json_content = r#"
    {
        "app_name": "Notes",
        "combo": "ctrl+enter",
        "combo_interval": "30s",
        "message": "still here",
        "message_interval": "5m"
    }
    "#;

    temp_file.write_all(json_content.as_bytes())?;

    let config = Config::from_file(temp_file.path().to_str().unwrap())?;

    assert_eq!(config.app_name, "Notes");
    assert_eq!(config.combo, "ctrl+enter");
    assert_eq!(config.combo_interval, Duration::from_secs(30));
    assert_eq!(config.message, "still here");
    assert_eq!(config.message_interval, Duration::from_secs(300));
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_config_save_load_roundtrip() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("knudge.json");

    let original = Config {
        app_name: "Cursor".to_string(),
        combo: "cmd+enter".to_string(),
        combo_interval: Duration::from_secs(11),
        message: "continue".to_string(),
        message_interval: Duration::from_secs(90),
        key_delay: Duration::from_millis(25),
        max_retries: 5,
        pause_hotkey: "ctrl+shift+p".to_string(),
        verbose: true,
    };

    original.save_to_file(config_path.to_str().unwrap())?;
    let loaded = Config::from_file(config_path.to_str().unwrap())?;

    assert_eq!(loaded.app_name, original.app_name);
    assert_eq!(loaded.combo, original.combo);
    assert_eq!(loaded.combo_interval, original.combo_interval);
    assert_eq!(loaded.message, original.message);
    assert_eq!(loaded.message_interval, original.message_interval);
    assert_eq!(loaded.key_delay, original.key_delay);
    assert_eq!(loaded.max_retries, original.max_retries);
    assert_eq!(loaded.pause_hotkey, original.pause_hotkey);
    assert_eq!(loaded.verbose, original.verbose);

    Ok(())
}

#[test]
fn test_config_validation_errors() {
    // empty app name
    let mut config = Config::default();
    assert!(config.validate().is_err());

    // empty message
    config.app_name = "TextEdit".to_string();
    config.message = String::new();
    assert!(config.validate().is_err());

    // zero interval
    config.message = "continue".to_string();
    config.combo_interval = Duration::ZERO;
    assert!(config.validate().is_err());

    // zero retries
    config.combo_interval = Duration::from_secs(11);
    config.max_retries = 0;
    assert!(config.validate().is_err());

    // unparseable combo
    config.max_retries = 10;
    config.combo = "hyper+enter".to_string();
    assert!(config.validate().is_err());

    config.combo = "cmd+enter".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_duration_parsing_edge_cases() {
    assert_eq!(parse_duration("0ms").unwrap(), Duration::from_millis(0));
    assert_eq!(parse_duration("1000").unwrap(), Duration::from_millis(1000));
    assert_eq!(parse_duration("5S").unwrap(), Duration::from_secs(5)); // case insensitive
    assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120)); // whitespace

    assert!(parse_duration("").is_err());
    assert!(parse_duration("abc").is_err());
    assert!(parse_duration("1000x").is_err());
    assert!(parse_duration("-1000ms").is_err());
}

// Keymap and combo tests

#[test]
fn test_message_characters_are_mapped() {
    for c in "continue doing what you think is best.".chars() {
        assert!(
            char_to_keycode(c).is_some(),
            "{c:?} should map to a key code"
        );
    }
}

#[test]
fn test_combo_parsing() {
    let combo = Combo::parse("cmd+enter").unwrap();
    assert_eq!(combo.modifier, Modifier::Command);
    assert_eq!(combo.key, KEY_RETURN);

    assert!(Combo::parse("shift+space").is_ok());
    assert!(Combo::parse("ctrl+c").is_ok());
    assert!(Combo::parse("enter").is_err());
    assert!(Combo::parse("cmd+nope").is_err());
}

// Injection sequence tests: exact event order per operation

#[test]
fn test_character_injection_is_down_then_up() {
    let (sender, backend) = recording_sender();
    sender.send_text(42, "a").unwrap();

    let events = backend.events();
    assert_eq!(
        events,
        vec![
            RecordedEvent { key_code: 0x00, down: true, flags: 0 },
            RecordedEvent { key_code: 0x00, down: false, flags: 0 },
        ]
    );
}

#[test]
fn test_combo_send_is_exactly_four_events() {
    let (sender, backend) = recording_sender();
    let combo = Combo::parse("cmd+enter").unwrap();
    sender.send_combo(42, &combo).unwrap();

    let cmd_code = Modifier::Command.key_code();
    let cmd_flags = Modifier::Command.flag_bits();
    let events = backend.events();
    assert_eq!(
        events,
        vec![
            RecordedEvent { key_code: cmd_code, down: true, flags: 0 },
            RecordedEvent { key_code: KEY_RETURN, down: true, flags: cmd_flags },
            RecordedEvent { key_code: KEY_RETURN, down: false, flags: cmd_flags },
            RecordedEvent { key_code: cmd_code, down: false, flags: 0 },
        ]
    );
}

#[test]
fn test_unmapped_character_does_not_abort_message() {
    let (sender, backend) = recording_sender();
    sender.send_text(42, "a?b").unwrap();

    let codes: Vec<u16> = backend.events().iter().map(|e| e.key_code).collect();
    assert_eq!(codes, vec![0x00, 0x00, 0x0B, 0x0B]);
}

#[test]
fn test_typing_is_case_insensitive() {
    let (sender, backend) = recording_sender();
    sender.send_text(42, "Hi").unwrap();

    let codes: Vec<u16> = backend.events().iter().map(|e| e.key_code).collect();
    assert_eq!(codes, vec![0x04, 0x04, 0x22, 0x22]);
}

// Task tests: message "hi" -> h, i, Return per cycle

#[test]
fn test_text_task_cycle() {
    let backend = RecordingBackend::new();
    let sender = Arc::new(KeySender::with_backend(
        Box::new(backend.clone()),
        Duration::ZERO,
        Duration::ZERO,
    ));
    let task = TextTask::new(42, "hi".to_string(), Duration::from_secs(60));

    task.tick(&sender).unwrap();

    let events = backend.events();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0].key_code, 0x04); // h down
    assert_eq!(events[2].key_code, 0x22); // i down
    assert_eq!(events[4].key_code, KEY_RETURN);
    assert!(events[4].down);
    assert!(!events[5].down);
}

#[test]
fn test_combo_task_cycle() {
    let backend = RecordingBackend::new();
    let sender = Arc::new(KeySender::with_backend(
        Box::new(backend.clone()),
        Duration::ZERO,
        Duration::ZERO,
    ));
    let task = ComboTask::new(42, Combo::parse("cmd+enter").unwrap(), Duration::from_secs(11));

    task.tick(&sender).unwrap();
    assert_eq!(backend.events().len(), 4);
}

// Process finder tests

#[test]
fn test_process_finder_nonexistent_app() {
    let mut finder = ProcessFinder::new();
    let result = finder.resolve("nonexistent_process_xyz_123456", 1);
    assert!(matches!(result, Err(NudgeError::ProcessNotFound { .. })));
}

#[test]
fn test_process_finder_default() {
    let _finder = ProcessFinder::default();
}

// Error type tests

#[test]
fn test_error_types() {
    let err = NudgeError::process_not_found("Cursor", 10);
    assert!(err.to_string().contains("Cursor"));
    assert!(err.to_string().contains("10"));

    let err = NudgeError::invalid_combo("xyz", "not recognized");
    assert!(err.to_string().contains("xyz"));

    let err = NudgeError::config_validation("missing field");
    assert!(err.to_string().contains("missing field"));
}
