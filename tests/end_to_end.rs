//! End-to-end scenarios exercising the binary's channel contract:
//! result on stdout, diagnostics on stderr, exit code per outcome.
use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn payload_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp payload");
    file.write_all(contents.as_bytes()).expect("write payload");
    file
}

fn executor() -> Command {
    Command::cargo_bin("executor").expect("binary built")
}

#[test]
fn sns_echo_prints_the_message_body() {
    let file = payload_file(r#"{"Records":[{"Sns":{"TopicArn":"arn:x","Message":"hi"}}]}"#);

    executor()
        .arg("echo-first-message")
        .arg(file.path())
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn kinesis_count_prints_the_record_count() {
    let file = payload_file(r#"{"Records":[{"Kinesis":{"data":"aGVsbG8="}}]}"#);

    executor()
        .arg("count-records")
        .arg(file.path())
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn unrecognized_shape_fails_without_stdout_output() {
    let file = payload_file(r#"{"foo":"bar"}"#);

    executor()
        .arg("echo-first-message")
        .arg(file.path())
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn missing_arguments_print_usage_and_exit_one() {
    executor()
        .assert()
        .code(1)
        .stdout("")
        .stderr("Usage: executor <handler-identifier> <payload-file-path>\n");

    executor().arg("echo-first-message").assert().code(1);
}

#[test]
fn unknown_handler_fails_without_stdout_output() {
    let file = payload_file(r#"{"Records":[{"Sns":{"Message":"hi"}}]}"#);

    executor()
        .arg("com.example.MissingHandler")
        .arg(file.path())
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn missing_payload_file_fails_without_stdout_output() {
    executor()
        .arg("echo-first-message")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stdout("");
}

// Logging stays on stderr even when enabled: stdout carries only the
// result line.
#[test]
fn enabled_logging_never_reaches_stdout() {
    let file = payload_file(r#"{"Records":[{"Sns":{"Message":"hi"}}]}"#);

    executor()
        .env("EXECUTOR_LOG", "debug")
        .arg("echo-first-message")
        .arg(file.path())
        .assert()
        .success()
        .stdout("hi\n");
}
