use anyhow::Result;

use crate::{CliTest, run};

const LOGIN_PAGE: &str = r#"
import { useTranslations } from "next-intl";

export function Login() {
    const t = useTranslations("auth");
    return (
        <form>
            <button>{t("login")}</button>
            <a>{t("signup")}</a>
        </form>
    );
}
"#;

#[test]
fn test_sync_reports_missing_and_unused() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(
        "messages/en.json",
        r#"{ "auth": { "login": "Log in" }, "legacy": "Old" }"#,
    )?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Missing in 'en' (1):\n  auth\n    auth.signup\n"));
    assert!(output.stdout.contains("Unused in 'en' (1):\n  (root)\n    legacy\n"));
    assert!(output.stdout.contains("1 missing, 1 unused"));

    Ok(())
}

#[test]
fn test_sync_in_sync() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(
        "messages/en.json",
        r#"{ "auth": { "login": "Log in", "signup": "Sign up" } }"#,
    )?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("Coverage: 100.0% of code keys defined, 100.0% of catalog keys used"));
    assert!(output.stdout.contains("catalog in sync"));

    Ok(())
}

#[test]
fn test_sync_dynamic_keys_need_review() -> Result<()> {
    let test = CliTest::with_file(
        "src/shop.tsx",
        r#"
import { useTranslations } from "next-intl";

export function Item({ id }: { id: string }) {
    const t = useTranslations();
    return <span>{t(`shop.items.${id}`)}</span>;
}
"#,
    )?;
    test.write_file(
        "messages/en.json",
        r#"{ "shop": { "items": { "apple": "Apple", "pear": "Pear" } } }"#,
    )?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("Needs review, reachable only through dynamic keys (2):"));
    assert!(output.stdout.contains("    shop.items.apple\n    shop.items.pear\n"));

    Ok(())
}

#[test]
fn test_sync_source_locale_override() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(
        "messages/de.json",
        r#"{ "auth": { "login": "Anmelden", "signup": "Registrieren" } }"#,
    )?;

    let output = run(test.sync_command().args(["--source-locale", "de"]))?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_sync_missing_source_locale_warns() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file("messages/de.json", r#"{ "auth": { "login": "Anmelden" } }"#)?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("Source locale 'en' not found"));

    Ok(())
}

#[test]
fn test_sync_missing_messages_dir_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error:"));

    Ok(())
}

#[test]
fn test_sync_prefers_catalog_snapshot() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(".keysyncrc.json", r#"{ "catalogPath": "catalog.json" }"#)?;
    test.write_file(
        "catalog.json",
        r#"{ "en": { "auth": { "login": "Log in", "signup": "Sign up" } } }"#,
    )?;
    test.write_file("messages/en.json", r#"{ "auth": {} }"#)?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("catalog.json"));

    Ok(())
}

#[test]
fn test_sync_broken_snapshot_falls_back() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", LOGIN_PAGE)?;
    test.write_file(".keysyncrc.json", r#"{ "catalogPath": "catalog.json" }"#)?;
    test.write_file("catalog.json", "{ not json")?;
    test.write_file(
        "messages/en.json",
        r#"{ "auth": { "login": "Log in", "signup": "Sign up" } }"#,
    )?;

    let output = run(&mut test.sync_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stderr.contains("warning:"));
    assert!(output.stderr.contains("catalog.json"));

    Ok(())
}
