use asyncapi_cli::{app, run, CliError, Options, EXIT_CONVERSION, EXIT_INPUT};
use asyncapi_codec::InputFormat;
use asyncapi_test_utils::{slack_rtm, streetlights, streetlights_converted, to_json_bytes};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

fn options(args: &[&str]) -> Options {
    let mut argv = vec!["asyncapi-converter"];
    argv.extend_from_slice(args);
    let matches = app().try_get_matches_from(argv).unwrap();
    Options::from_matches(&matches).unwrap()
}

fn input_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn decode_yaml(output: &[u8]) -> Value {
    asyncapi_codec::decode(output, InputFormat::Yaml).unwrap()
}

#[tokio::test]
async fn test_converts_local_json_file() {
    let file = input_file(&to_json_bytes(&streetlights("1.1.0")));
    let path = file.path().to_str().unwrap();

    let output = run(&options(&[path])).await.unwrap();
    let converted: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(converted, streetlights_converted());
}

#[tokio::test]
async fn test_yaml_output_and_id_override() {
    let file = input_file(&to_json_bytes(&slack_rtm()));
    let path = file.path().to_str().unwrap();

    let output = run(&options(&["--to-yaml", "--id", "urn:slack", path]))
        .await
        .unwrap();
    let converted = decode_yaml(&output);

    assert_eq!(converted["id"], "urn:slack");
    assert_eq!(converted["asyncapi"], "2.0.0");
}

#[tokio::test]
async fn test_yaml_input_file() {
    let file = input_file(
        b"asyncapi: 1.0.0\ninfo:\n  title: Not Example\ntopics:\n  test:\n    publish:\n      $ref: '#/x'\n",
    );
    let path = file.path().to_str().unwrap();

    let output = run(&options(&["--from", "yaml", path])).await.unwrap();
    let converted: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(converted["id"], "urn:not.example");
    assert_eq!(converted["channels"]["test"]["publish"]["message"]["$ref"], "#/x");
}

#[tokio::test]
async fn test_missing_file_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");

    let err = run(&options(&[missing.to_str().unwrap()])).await.unwrap_err();

    assert!(matches!(err, CliError::Source(_)));
    assert!(err.to_string().contains("file does not exist"));
    assert_eq!(err.exit_code(), EXIT_INPUT);
}

#[tokio::test]
async fn test_conversion_error_exit_code() {
    let file = input_file(br#"{"asyncapi": "2.0.0", "info": {"title": "x"}}"#);
    let path = file.path().to_str().unwrap();

    let err = run(&options(&[path])).await.unwrap_err();

    assert_eq!(err.exit_code(), EXIT_CONVERSION);
}

#[tokio::test]
async fn test_undecodable_input_exit_code() {
    let file = input_file(b"{ not: [valid");
    let path = file.path().to_str().unwrap();

    let err = run(&options(&["--from", "json", path])).await.unwrap_err();

    assert_eq!(err.exit_code(), EXIT_INPUT);
}

#[tokio::test]
async fn test_empty_id_written_as_given() {
    let file = input_file(&to_json_bytes(&streetlights("1.0.0")));
    let path = file.path().to_str().unwrap();

    let output = run(&options(&["--id=", path])).await.unwrap();
    let converted: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(converted["id"], "");
}
