use anyhow::Result;

use crate::{CliTest, run};

const TRANSLATED_PAGE: &str = r#"
import { useTranslations } from "next-intl";

export function Login() {
    const t = useTranslations("auth");
    return <button>{t("login")}</button>;
}
"#;

#[test]
fn test_scan_reports_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"export function App() {
    return <button>Submit</button>;
}
"#,
    )?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("warning: \"Submit\"  hardcoded-text"));
    assert!(output.stdout.contains("src/app.tsx:2:"));
    assert!(output.stdout.contains("2 |     return <button>Submit</button>;"));
    assert!(output.stdout.contains("1 hardcoded string in 1 source file"));

    Ok(())
}

#[test]
fn test_scan_clean_project() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", TRANSLATED_PAGE)?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Scanned 1 source file - no hardcoded text found"));
    assert!(output.stdout.contains("Keys: 1 (root 0, bound 1, unknown 0, unbound 0)"));
    assert!(!output.stdout.contains("info:"));

    Ok(())
}

#[test]
fn test_scan_verbose_lists_key_usages() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", TRANSLATED_PAGE)?;

    let output = run(test.scan_command().arg("-v"))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("info: key auth.login  bound"));

    Ok(())
}

#[test]
fn test_scan_respects_ignore_texts() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        "export const App = () => <button>Submit</button>;\n",
    )?;
    test.write_file(".keysyncrc.json", r#"{ "ignoreTexts": ["Submit"] }"#)?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_scan_skips_test_files() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", TRANSLATED_PAGE)?;
    test.write_file(
        "src/login.test.tsx",
        "export const Fixture = () => <p>Hardcoded fixture</p>;\n",
    )?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_scan_parse_error_fails() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", TRANSLATED_PAGE)?;
    test.write_file("src/broken.tsx", "export const = ;")?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_scan_source_root_override() -> Result<()> {
    let test = CliTest::with_file(
        "web/src/app.tsx",
        "export const App = () => <h1>Welcome</h1>;\n",
    )?;

    let output = run(test.scan_command().args(["--source-root", "web"]))?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("warning: \"Welcome\"  hardcoded-text"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/login.tsx", TRANSLATED_PAGE)?;
    test.write_file(".keysyncrc.json", r#"{ "scoreThreshold": 150 }"#)?;

    let output = run(&mut test.scan_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error:"));

    Ok(())
}
