use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, run};

fn setup_config(test: &CliTest) -> Result<()> {
    test.write_file(
        "locale-grubber.config.json",
        r#"{
            "includeDirs": ["src/modules/*"],
            "fileRules": [
                {
                    "include": ["**/*.ts"],
                    "grubbers": {
                        "regexp": {
                            "patterns": ["translate\\('(?P<token>[\\w.-]+)'\\)"]
                        }
                    }
                }
            ],
            "languages": ["en", "fr"]
        }"#,
    )
}

fn locale_json(test: &CliTest, path: &str) -> Result<Value> {
    Ok(serde_json::from_str(&test.read_file(path)?)?)
}

#[test]
fn test_update_creates_locale_files() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/modules/users/page.ts",
        "const title = translate('users.title');\n",
    )?;

    let (code, stdout, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Updated 2 locale files in 1 module dir"));

    for language in ["en", "fr"] {
        let tree = locale_json(&test, &format!("src/modules/users/i18n/users.{language}.json"))?;
        assert_eq!(tree, json!({ "users": { "title": "! users.title" } }));
    }
    Ok(())
}

#[test]
fn test_update_preserves_existing_translations() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/modules/users/page.ts",
        "translate('users.title'); translate('users.subtitle');\n",
    )?;
    test.write_file(
        "src/modules/users/i18n/users.en.json",
        r#"{ "users": { "title": "Users", "stale": "Gone" } }"#,
    )?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);

    let tree = locale_json(&test, "src/modules/users/i18n/users.en.json")?;
    assert_eq!(
        tree,
        json!({ "users": { "subtitle": "! users.subtitle", "title": "Users" } })
    );
    Ok(())
}

#[test]
fn test_update_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/modules/users/page.ts",
        "translate('users.title');\n",
    )?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);
    let first = test.read_file("src/modules/users/i18n/users.en.json")?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);
    let second = test.read_file("src/modules/users/i18n/users.en.json")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_update_fails_on_rule_violations_and_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "locale-grubber.config.json",
        r#"{
            "includeDirs": ["src/modules/*"],
            "fileRules": [
                {
                    "include": ["**/*.ts"],
                    "grubbers": {
                        "regexp": {
                            "patterns": ["translate\\('(?P<token>[\\w.-]+)'\\)"],
                            "rules": ["camelCase"]
                        }
                    }
                }
            ],
            "languages": ["en"]
        }"#,
    )?;
    test.write_file(
        "src/modules/users/page.ts",
        "translate('bad_key'); translate('users.fine');\n",
    )?;

    let (code, stdout, _) = run(&mut test.update_command())?;
    assert_eq!(code, 1, "{stdout}");
    assert!(stdout.contains("Errors found in"));
    assert!(stdout.contains(
        "Rules are violated in key: bad_key [camelCase], possible fix: badKey"
    ));
    assert!(!test.exists("src/modules/users/i18n/users.en.json"));
    Ok(())
}

#[test]
fn test_update_expands_plurals_with_suppression() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "locale-grubber.config.json",
        r#"{
            "includeDirs": ["src/modules/*"],
            "fileRules": [
                {
                    "include": ["**/*.ts"],
                    "grubbers": {
                        "regexp": {
                            "patterns": ["pluralize\\('(?P<plural>[\\w.-]+)'\\)"]
                        }
                    }
                }
            ],
            "languages": ["en", "ru"],
            "i18nextPlural": "v4"
        }"#,
    )?;
    test.write_file(
        "src/modules/cart/list.ts",
        "pluralize('cart.items');\n",
    )?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);

    let en = locale_json(&test, "src/modules/cart/i18n/cart.en.json")?;
    assert_eq!(
        en,
        json!({ "cart": { "items": "! cart.items", "items_other": "! cart.items_other" } })
    );

    // ru has three categories; the v4 map yields _few and _other, and
    // _other is suppressed for ru.
    let ru = locale_json(&test, "src/modules/cart/i18n/cart.ru.json")?;
    assert_eq!(
        ru,
        json!({ "cart": { "items": "! cart.items", "items_few": "! cart.items_few" } })
    );
    Ok(())
}

#[test]
fn test_update_honors_ignore_sentinel() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/modules/users/page.ts",
        "// locale-ignore-next\ntranslate('users.dynamic');\ntranslate('users.kept');\n",
    )?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);

    let tree = locale_json(&test, "src/modules/users/i18n/users.en.json")?;
    assert_eq!(tree, json!({ "users": { "kept": "! users.kept" } }));
    Ok(())
}

#[test]
fn test_update_without_config_fails() -> Result<()> {
    let test = CliTest::new()?;
    let (code, _, stderr) = run(&mut test.update_command())?;
    assert_eq!(code, 2, "{stderr}");
    assert!(stderr.contains("Failed to read config file"));
    Ok(())
}
