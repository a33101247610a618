use assert_cmd::Command;

/// Helper to get a Command for the glep63-check binary.
#[allow(deprecated)]
fn check_cmd() -> Command {
    Command::cargo_bin("glep63-check").unwrap()
}

#[test]
fn help_works() {
    check_cmd().arg("--help").assert().success();
}

#[test]
fn a_key_source_is_required() {
    check_cmd().assert().failure();
}

#[test]
fn key_sources_are_mutually_exclusive() {
    check_cmd().args(["-a", "-d"]).assert().failure();
}
