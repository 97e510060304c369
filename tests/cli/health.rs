use anyhow::Result;

use crate::{CliTest, run};

const LOGIN_PAGE: &str = r#"
import { useTranslations } from "next-intl";

export function Login() {
    const t = useTranslations("auth");
    return <button>{t("login")}</button>;
}
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(
        "messages/en.json",
        r#"{ "auth": { "login": "Log in", "welcome": "Welcome, {name}!" } }"#,
    )?;
    Ok(test)
}

#[test]
fn test_health_below_threshold() -> Result<()> {
    let test = project()?;
    test.write_file("messages/tr.json", r#"{ "auth": { "login": "Giriş" } }"#)?;

    // 2 keys x 1 target, one error: 100 * (1 - 5/10).
    let output = run(&mut test.health_command())?;
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);
    assert!(output.stdout.contains(
        "error[missing-translations]: \"auth.welcome\" has no 'tr' translation"
    ));
    assert!(output.stdout.contains("Locales: en -> tr"));
    assert!(output.stdout.contains("Health score 50/100 (threshold 70)"));

    Ok(())
}

#[test]
fn test_health_threshold_flag() -> Result<()> {
    let test = project()?;
    test.write_file("messages/tr.json", r#"{ "auth": { "login": "Giriş" } }"#)?;

    let output = run(test.health_command().args(["--threshold", "50"]))?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("Health score 50/100 (threshold 50)"));

    Ok(())
}

#[test]
fn test_health_threshold_from_config() -> Result<()> {
    let test = project()?;
    test.write_file("messages/tr.json", r#"{ "auth": { "login": "Giriş" } }"#)?;
    test.write_file(".keysyncrc.json", r#"{ "scoreThreshold": 40 }"#)?;

    let output = run(&mut test.health_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_health_placeholder_mismatch() -> Result<()> {
    let test = project()?;
    test.write_file(
        "messages/tr.json",
        r#"{ "auth": { "login": "Giriş", "welcome": "Hoş geldin!" } }"#,
    )?;

    // One error in quality: 100 * (1 - 5/10).
    let output = run(&mut test.health_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error[placeholder-mismatch]:"));
    assert!(output.stdout.contains("{name}"));
    assert!(output.stdout.contains("  coverage     100"));
    assert!(output.stdout.contains("  quality       50"));

    Ok(())
}

#[test]
fn test_health_perfect_catalog() -> Result<()> {
    let test = project()?;
    test.write_file(
        "messages/tr.json",
        r#"{ "auth": { "login": "Giriş", "welcome": "Hoş geldin, {name}!" } }"#,
    )?;

    let output = run(&mut test.health_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("Health score 100/100 (threshold 70)"));

    Ok(())
}

#[test]
fn test_health_rejects_out_of_range_threshold() -> Result<()> {
    let test = project()?;

    let output = run(test.health_command().args(["--threshold", "101"]))?;
    assert_eq!(output.code, Some(2));

    Ok(())
}
