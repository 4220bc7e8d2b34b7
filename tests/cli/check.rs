use anyhow::Result;

use crate::{CliTest, run};

fn setup_project(test: &CliTest) -> Result<()> {
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
            "languages": ["en"]
        }"#,
    )?;
    test.write_file(
        "src/modules/users/page.ts",
        "translate('users.title');\n",
    )
}

#[test]
fn test_check_reports_stale_folder() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let (code, stdout, _) = run(&mut test.check_command())?;
    assert_eq!(code, 1, "{stdout}");
    assert!(stdout.contains("Translations must be fixed for folder:"));
    assert!(stdout.contains("users/i18n"));

    // check never writes
    assert!(!test.exists("src/modules/users/i18n/users.en.json"));
    Ok(())
}

#[test]
fn test_check_passes_after_update() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);

    let (code, stdout, _) = run(&mut test.check_command())?;
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("locale files are up to date"));
    Ok(())
}

#[test]
fn test_check_detects_missing_key() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let (code, _, _) = run(&mut test.update_command())?;
    assert_eq!(code, 0);

    // A new key appears in the sources; the locale file is now stale.
    test.write_file(
        "src/modules/users/extra.ts",
        "translate('users.extra');\n",
    )?;
    let (code, stdout, _) = run(&mut test.check_command())?;
    assert_eq!(code, 1, "{stdout}");
    assert!(stdout.contains("Translations must be fixed for folder:"));
    Ok(())
}

#[test]
fn test_check_reports_violations() -> Result<()> {
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
        "translate('not-camel');\n",
    )?;

    let (code, stdout, _) = run(&mut test.check_command())?;
    assert_eq!(code, 1, "{stdout}");
    assert!(stdout.contains("Rules are violated in key: not-camel"));
    Ok(())
}
