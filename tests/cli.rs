use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn highlight_html_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "prog.gss", "x = 1;\n");

    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("highlight").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::starts_with("<div class=\"highlight\"><pre><span></span>")
            .and(predicate::str::contains("<span class=\"n\">x</span>"))
            .and(predicate::str::contains("<span class=\"mf\">1</span>")),
    );
}

#[test]
fn highlight_raw_and_json_formats() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "lib.src", "endp;\n");

    let mut raw = cargo_bin_cmd!("gaussdoc");
    raw.arg("highlight").arg(&path).arg("--format").arg("raw");
    raw.assert()
        .success()
        .stdout(predicate::str::contains("Token.Keyword\t\"endp\""));

    let mut json = cargo_bin_cmd!("gaussdoc");
    json.arg("highlight").arg(&path).arg("-f").arg("json");
    json.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Punctuation\""));
}

#[test]
fn highlight_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "prog.e", "x;\n");

    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("highlight").arg(&path).arg("--format").arg("svg");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("formatter 'svg' not found"));
}

#[test]
fn highlight_with_explicit_lexer() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "prog.gss", "x = 1;\n");

    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("highlight").arg(&path).arg("--lexer").arg("text");

    cmd.assert()
        .success()
        .stdout("<div class=\"highlight\"><pre><span></span>x = 1;\n</pre></div>\n");
}

#[test]
fn highlight_applies_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "prog.gss", "x\n");
    let config = write_source(&dir, "gaussdoc.toml", "[html]\ncss_class = \"code\"\n");

    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("--config").arg(&config).arg("highlight").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<div class=\"code\">"));
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("highlight").arg(dir.path().join("absent.gss"));

    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}

#[test]
fn detect_by_filename_and_content() {
    let dir = TempDir::new().unwrap();
    let by_name = write_source(&dir, "model.src", "");
    let by_content = write_source(&dir, "notes.txt.bak", "proc (1) = f(x);\nendp;\n");
    let plain = write_source(&dir, "readme.md", "hello\n");

    cargo_bin_cmd!("gaussdoc")
        .arg("detect")
        .arg(&by_name)
        .assert()
        .success()
        .stdout("GAUSS\n");
    cargo_bin_cmd!("gaussdoc")
        .arg("detect")
        .arg(&by_content)
        .assert()
        .success()
        .stdout("GAUSS\n");
    cargo_bin_cmd!("gaussdoc")
        .arg("detect")
        .arg(&plain)
        .assert()
        .success()
        .stdout("Text only\n");
}

#[test]
fn menusel_renders_spans() {
    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("menusel").arg("File-->&Open");

    cmd.assert().success().stdout(
        "<span class=\"menuselection\">File&gt;<span class=\"accelerator\">O</span>pen</span>\n",
    );
}

#[test]
fn menusel_unknown_role_fails() {
    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("menusel").arg("x").arg("--role").arg("kbd");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown interpreted text role 'kbd'"));
}

#[test]
fn signature_renders_html() {
    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("signature").arg("{ a, b } = f(x)");

    cmd.assert().success().stdout(
        predicate::str::contains("<span class=\"sig-curly\">{</span>")
            .and(predicate::str::contains("<code class=\"sig-name descname\">f</code>")),
    );
}

#[test]
fn signature_parse_error_fails() {
    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("signature").arg("f(a[, b)");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unbalanced '['"));
}

#[test]
fn list_commands() {
    cargo_bin_cmd!("gaussdoc")
        .arg("list-lexers")
        .assert()
        .success()
        .stdout(predicate::str::contains("GAUSS").and(predicate::str::contains("*.gss")));
    cargo_bin_cmd!("gaussdoc")
        .arg("list-formats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("html")
                .and(predicate::str::contains("json"))
                .and(predicate::str::contains("raw")),
        );
}

#[test]
fn classify_reports_word_lists() {
    let mut cmd = cargo_bin_cmd!("gaussdoc");
    cmd.arg("classify").args(["ENDP", "matrix", "cdfn", "__STDIN", "total"]);

    cmd.assert().success().stdout(
        "ENDP\tkeyword\nmatrix\tdeclaration\ncdfn\tbuiltin\n__STDIN\tliteral\ntotal\tname\n",
    );
}
