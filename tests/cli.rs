//! Command line behavior: flags, streams and exit statuses.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

const NUMBERS: &str = "num,value\n1,one\n2,two\n8,eight\n";
const TEMPLATE: &str = r#"{{ index .Index 0 }}:{{ index .Name "value" }}"#;

fn create_csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_csveach(args: &[&str], stdin_content: impl AsRef<[u8]>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_csveach"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn csveach");

    if let Some(mut stdin) = child.stdin.take() {
        // the process may exit before reading its input
        let _ = stdin.write_all(stdin_content.as_ref());
    }

    child.wait_with_output().expect("Failed to wait for csveach")
}

fn code(output: &Output) -> i32 {
    output.status.code().unwrap_or(-1)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn usage_example_from_stdin() {
    let output = run_csveach(&["--new-line", TEMPLATE], NUMBERS);

    assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1:one\n2:two\n8:eight\n");
}

#[test]
fn short_flags_combine() {
    let output = run_csveach(&["-n", "-z", "{{.N}}"], NUMBERS);

    assert_eq!(code(&output), 0);
    assert_eq!(output.stdout, b"0\n\x001\n\x002\n\x00");
}

#[test]
fn no_header_flag() {
    let output = run_csveach(&["--no-header", "-n", "{{.N}}={{index .Index 1}}"], NUMBERS);

    assert_eq!(stdout(&output), "0=value\n1=one\n2=two\n3=eight\n");
}

#[test]
fn input_and_output_files() {
    let input = create_csv_file(NUMBERS);
    let out = NamedTempFile::new().unwrap();

    let output = run_csveach(
        &[
            "-i",
            input.path().to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "-n",
            TEMPLATE,
        ],
        "",
    );

    assert_eq!(code(&output), 0, "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        std::fs::read_to_string(out.path()).unwrap(),
        "1:one\n2:two\n8:eight\n"
    );
}

#[test]
fn tab_delimiter() {
    let output = run_csveach(&["-d", "\\t", "-n", "{{.Name.b}}"], "a\tb\n1\t2,3\n");

    assert_eq!(stdout(&output), "2,3\n");
}

#[test]
fn stats_go_to_stderr_as_json() {
    let output = run_csveach(&["--stats", "{{.N}}"], NUMBERS);

    assert_eq!(code(&output), 0);
    assert_eq!(stdout(&output), "012");

    let stats: serde_json::Value = serde_json::from_str(stderr(&output).lines().last().unwrap_or_default()).unwrap();
    assert_eq!(stats["status"], "Done");
    assert_eq!(stats["read_count"], 3);
    assert_eq!(stats["render_count"], 3);
    assert_eq!(stats["skip_count"], 0);
}

#[test]
fn empty_input_succeeds() {
    let output = run_csveach(&["-n", TEMPLATE], "");

    assert_eq!(code(&output), 0);
    assert_eq!(stdout(&output), "");
}

#[test]
fn missing_template_is_a_usage_error() {
    let output = run_csveach(&[], NUMBERS);

    assert_eq!(code(&output), 1);
    assert!(stderr(&output).contains("Output template expected."));
    assert!(stderr(&output).contains("Example:"));
}

#[test]
fn empty_template_is_a_usage_error() {
    let output = run_csveach(&[""], NUMBERS);

    assert_eq!(code(&output), 1);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = run_csveach(&["--bogus", TEMPLATE], NUMBERS);

    assert_eq!(code(&output), 1);
}

#[test]
fn help_and_version_succeed() {
    let help = run_csveach(&["--help"], "");
    assert_eq!(code(&help), 0);
    assert!(stdout(&help).contains("--new-line"));

    let version = run_csveach(&["--version"], "");
    assert_eq!(code(&version), 0);
    assert!(stdout(&version).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_input_file() {
    let output = run_csveach(&["-i", "/definitely/not/here.csv", TEMPLATE], "");

    assert_eq!(code(&output), 2);
    assert!(stderr(&output).contains("Error opening input file /definitely/not/here.csv"));
}

#[test]
fn uncreatable_output_file() {
    let output = run_csveach(&["-o", "/definitely/not/here/out.txt", TEMPLATE], NUMBERS);

    assert_eq!(code(&output), 3);
    assert!(stderr(&output).contains("Error opening output file "));
}

#[test]
fn template_parse_error() {
    let output = run_csveach(&["{{ index .Index 0 "], NUMBERS);

    assert_eq!(code(&output), 4);
    assert!(stderr(&output).contains("Error parsing output template: "));
}

#[test]
fn render_error_keeps_previous_rows() {
    let output = run_csveach(&["-n", "{{index .Index 1}}"], "a,b\n1,2\n3\n4,5\n");

    assert_eq!(code(&output), 5);
    assert_eq!(stdout(&output), "2\n");
    assert!(stderr(&output).contains("Error rendering record 2"));
}

#[test]
fn skip_limit_flag() {
    let output = run_csveach(&["--skip-limit", "1", "-n", "{{index .Index 1}}"], "a,b\n1,2\n3\n4,5\n");

    assert_eq!(code(&output), 0);
    assert_eq!(stdout(&output), "2\n5\n");
}

#[test]
fn malformed_header() {
    let output = run_csveach(&["{{.N}}"], b"a\xff,b\n1,2\n");

    assert_eq!(code(&output), 6);
    assert!(stderr(&output).contains("Error reading csv header: "));
}

#[test]
fn strict_mode_rejects_ragged_records() {
    let output = run_csveach(&["--strict", "-n", "{{.N}}"], "a,b\n1,2\n3\n");

    assert_eq!(code(&output), 7);
    assert_eq!(stdout(&output), "0\n");
    assert!(stderr(&output).contains("Error reading csv: "));
}
