use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(&mut test.init_command())?;
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Created locale-grubber.config.json"));

    let config: Value = serde_json::from_str(&test.read_file("locale-grubber.config.json")?)?;
    assert!(config.get("includeDirs").is_some());
    assert!(config.get("fileRules").is_some());
    assert!(config.get("languages").is_some());
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locale-grubber.config.json", "{}")?;

    let (code, _, stderr) = run(&mut test.init_command())?;
    assert_eq!(code, 2, "{stderr}");
    assert!(stderr.contains("already exists"));

    // The existing file is untouched.
    assert_eq!(test.read_file("locale-grubber.config.json")?, "{}");
    Ok(())
}

#[test]
fn test_initialized_config_is_usable() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, _) = run(&mut test.init_command())?;
    assert_eq!(code, 0);

    // The generated config validates and scans an empty project cleanly.
    let (code, stdout, stderr) = run(&mut test.update_command())?;
    assert_eq!(code, 0, "{stdout}{stderr}");
    assert!(stdout.contains("Updated 0 locale files"));
    Ok(())
}
