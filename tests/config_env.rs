//! Config lookup through the environment.

use serial_test::serial;
use storefront_widgets::config::{self, CONFIG_ENV, ConfigError, SourceKind};
use storefront_widgets::widgets::RawHtmlPolicy;
use tempfile::TempDir;

mod util;
use util::EnvGuard;

#[test]
#[serial]
fn env_path_is_used_when_no_flag_given() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sfw.toml");
    std::fs::write(
        &path,
        "[source]\nkind = \"http\"\nbase_url = \"https://cms.example\"\n\n[render]\nraw_html = \"escape\"\n",
    )
    .unwrap();
    let _guard = EnvGuard::set(CONFIG_ENV, &path);

    let config = config::load(None).expect("load");
    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.render.raw_html, RawHtmlPolicy::Escape);
    assert_eq!(config.loaded_from.as_deref(), Some(path.as_path()));
}

#[test]
#[serial]
fn explicit_flag_wins_over_env() {
    let tmp = TempDir::new().unwrap();
    let env_path = tmp.path().join("env.toml");
    let flag_path = tmp.path().join("flag.toml");
    std::fs::write(&env_path, "[render]\ntitle = \"From env\"\n").unwrap();
    std::fs::write(&flag_path, "[render]\ntitle = \"From flag\"\n").unwrap();
    let _guard = EnvGuard::set(CONFIG_ENV, &env_path);

    let config = config::load(Some(&flag_path)).expect("load");
    assert_eq!(config.render.title, "From flag");
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let _guard = EnvGuard::unset(CONFIG_ENV);
    let tmp = TempDir::new().unwrap();
    let err = config::load(Some(&tmp.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
