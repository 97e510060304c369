use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["includes", "messagesRoot", "sourceLocale", "scoreThreshold", "rules"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["sourceLocale"], "en");
    assert_eq!(parsed["scoreThreshold"], 70);
    assert!(
        parsed.get("catalogPath").is_none(),
        "catalogPath is only written when set"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("init"))?;
    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @"✓ Created .keysyncrc.json");

    assert!(test.root().join(".keysyncrc.json").exists());
    let content = test.read_file(".keysyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".keysyncrc.json", "{}")?;

    let output = run(test.command().arg("init"))?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(".keysyncrc.json already exists"));
    assert_eq!(test.read_file(".keysyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    run(test.command().arg("init"))?;

    test.write_file(
        "src/app.tsx",
        r#"
        import { useTranslations } from "next-intl";
        export function App() {
            const t = useTranslations();
            return <div>{t("title")}</div>;
        }
        "#,
    )?;
    test.write_file("messages/en.json", r#"{"title": "Hello"}"#)?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(
        output.code,
        Some(0),
        "sync should work with initialized config. stderr: {}",
        output.stderr
    );

    Ok(())
}
