use assert_cmd::Command;
use assert_cmd::cargo_bin_cmd;

/// Directory containing the bundled Baltic data set
#[allow(dead_code)]
pub const DATA_DIR: &str = "tests/data/baltic";

/// A command for the `linergen` binary which ignores the user's settings and does not log
pub fn linergen_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("linergen");
    cmd.env("LINERGEN_USE_DEFAULT_SETTINGS", "1")
        .env("LINERGEN_LOG_LEVEL", "off");
    cmd
}

#[allow(dead_code)]
pub fn assert_linergen_runs(args: &[&str]) {
    linergen_cmd().args(args).assert().success();
}

#[allow(dead_code)]
pub fn assert_linergen_fails(args: &[&str]) {
    linergen_cmd().args(args).assert().failure().code(1);
}

#[allow(dead_code)]
pub fn get_linergen_stdout(args: &[&str]) -> String {
    let output = linergen_cmd().args(args).output().unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout).unwrap()
}
