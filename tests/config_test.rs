use arena_bot::config::Config;
use serial_test::serial;

fn set_var(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

fn remove_var(key: &str) {
    unsafe { std::env::remove_var(key) };
}

fn clear_env() {
    for key in [
        "DISCORD_TOKEN",
        "OWNER_ID",
        "GUILD_ID",
        "VANITY_ROLE_ID",
        "CLAN_ROLES",
        "SITE_HOST",
        "INVITE_SLUG",
        "DATA_PATH",
        "LOGS_PATH",
        "FEATURE_VANITY",
        "FEATURE_CLAN_WELCOME",
        "FEATURE_TIME_RELAY",
    ] {
        remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_requires_token() {
    clear_env();

    let mut config = Config::new();
    assert!(config.load().is_err());
}

#[test]
#[serial]
fn test_load_minimal_with_features_disabled() {
    clear_env();
    set_var("DISCORD_TOKEN", "token");
    set_var("OWNER_ID", "123");
    set_var("GUILD_ID", "456");
    set_var("FEATURE_VANITY", "0");
    set_var("FEATURE_CLAN_WELCOME", "0");

    let mut config = Config::new();
    config.load().expect("Minimal config should load");

    assert_eq!(config.guild_id, 456);
    assert!(!config.features.vanity);
    assert!(!config.features.clan_welcome);
    assert!(config.features.time_relay);
    assert_eq!(config.site_host, "pokearena.xyz");
    assert_eq!(
        config.preferences_path(),
        std::path::Path::new("data/preferences.json")
    );
}

#[test]
#[serial]
fn test_load_full() {
    clear_env();
    set_var("DISCORD_TOKEN", "token");
    set_var("OWNER_ID", "123");
    set_var("GUILD_ID", "456");
    set_var("VANITY_ROLE_ID", "789");
    set_var("CLAN_ROLES", "111|222|<a:infinity:333>|Infinity");
    set_var("SITE_HOST", "example.org");
    set_var("INVITE_SLUG", "example");
    set_var("DATA_PATH", "/tmp/arena-data");

    let mut config = Config::new();
    config.load().expect("Full config should load");

    assert_eq!(config.vanity_role_id, 789);
    assert_eq!(config.clans.len(), 1);
    assert_eq!(config.clans[0].name, "Infinity");
    assert_eq!(config.site_host, "example.org");
    assert_eq!(config.invite_slug, "example");
    assert_eq!(
        config.preferences_path(),
        std::path::Path::new("/tmp/arena-data/preferences.json")
    );
}
