use std::ffi::OsStr;
use std::fs;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn linetok(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linetok"))
        .args(args)
        .output()
        .expect("spawn linetok")
}

fn linetok_mark(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linetok-mark"))
        .args(args)
        .output()
        .expect("spawn linetok-mark")
}

#[test]
fn missing_input_argument_exits_with_usage_code() {
    let output = linetok(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required argument"), "{stderr}");
}

#[test]
fn mark_without_output_argument_exits_with_usage_code() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.txt");
    fs::write(&input, "Hello world\n").unwrap();

    let output = linetok_mark(&[input.as_os_str()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OUTPUT"), "{stderr}");
}

#[test]
fn missing_input_file_prints_nothing_on_stdout() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("absent.txt");
    let marker = temp.path().join("done.txt");

    let output = linetok_mark(&[input.as_os_str(), marker.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!marker.exists());
}

#[test]
fn unknown_tokenizer_is_rejected() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.txt");
    fs::write(&input, "x\n").unwrap();

    let output = linetok(&[
        OsStr::new("--tokenizer"),
        OsStr::new("bpe"),
        input.as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn linetok_prints_tokens_then_device_count() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.txt");
    fs::write(&input, "Hello world\nIt works. Really!\n").unwrap();

    let output = linetok(&[input.as_os_str()]);

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "[\"Hello\", \"world\"]");
    assert_eq!(lines[1], "[\"It\", \"works\", \".\", \"Really\", \"!\"]");
    let count = lines[2].strip_prefix("GPU count: ").unwrap();
    assert!(count.parse::<u32>().is_ok(), "{count}");
}

#[test]
fn linetok_mark_writes_done_after_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.txt");
    fs::write(&input, "Hello world\n").unwrap();
    let marker = temp.path().join("done.txt");

    let output = linetok_mark(&[
        OsStr::new("--tokenizer"),
        OsStr::new("whitespace"),
        input.as_os_str(),
        marker.as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[\"Hello\", \"world\"]");
    assert!(lines[1].starts_with("GPU count: "), "{}", lines[1]);
    assert_eq!(fs::read_to_string(&marker).unwrap(), "Done.");
}
