use std::path::Path;

use figment::Jail;
use pretty_assertions::assert_eq;

use marks_config::{ConfigError, MarksConfig};

#[test]
fn local_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "marks.toml",
            r#"
            [server]
            port = 9090

            [database]
            path = "school.db"
            "#,
        )?;

        let config = MarksConfig::load(None).expect("config loads");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "school.db");
        assert_eq!(config.session.cookie_name, "session_token");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file("marks.toml", "[server]\nport = 9090\n")?;
        jail.create_file(
            "deploy.toml",
            "[server]\nport = 7070\n[session]\ncookie_secure = true\n",
        )?;

        let config = MarksConfig::load(Some(Path::new("deploy.toml"))).expect("config loads");
        assert_eq!(config.server.port, 7070);
        assert!(config.session.cookie_secure);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = MarksConfig::load(Some(Path::new("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "config"));
        Ok(())
    });
}

#[test]
fn wrong_type_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("marks.toml", "[server]\nport = \"eighty\"\n")?;
        let err = MarksConfig::load(None).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
