use super::*;
use minimax_engine::Difficulty;

#[test]
fn missing_file_yields_defaults() {
    let config = FileConfig::load(Path::new("no-such-matchplay.toml"));
    assert!(config.seed.is_none());
    let session = config.session_config();
    assert_eq!(session.cache_capacity, SessionConfig::default().cache_capacity);
}

#[test]
fn overrides_parse_from_toml() {
    let text = r#"
seed = 7
cache_capacity = 1234

[difficulty]
profiles = [
  { max_depth = 1, time_limit_ms = 10 },
  { max_depth = 2, time_limit_ms = 20 },
  { max_depth = 3, time_limit_ms = 30 },
  { max_depth = 4, time_limit_ms = 40 },
  { max_depth = 5, time_limit_ms = 50 },
]
"#;
    let config: FileConfig = toml::from_str(text).unwrap();
    let session = config.session_config();
    assert_eq!(session.seed, Some(7));
    assert_eq!(session.cache_capacity, 1234);
    assert_eq!(
        session.difficulty_table.profile(Difficulty::new(5)).time_limit_ms,
        50
    );
}

#[test]
fn partial_overrides_keep_defaults_elsewhere() {
    let config: FileConfig = toml::from_str("seed = 1").unwrap();
    let session = config.session_config();
    assert_eq!(session.seed, Some(1));
    assert_eq!(
        session.difficulty_table.profile(Difficulty::new(3)).max_depth,
        SessionConfig::default()
            .difficulty_table
            .profile(Difficulty::new(3))
            .max_depth
    );
}
