mod common;

use common::TestContext;
use predicates::prelude::*;

#[test]
fn new_requires_existing_cdk_directory() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "missing", "MyApp", "MyStack"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing does not exist"));
}

#[test]
fn new_refuses_existing_app_file() {
    let ctx = TestContext::new();
    ctx.write("cdk/bin/my-app.ts", "// existing\n");

    ctx.cli()
        .args(["new", "cdk", "MyApp", "MyStack"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("my-app.ts already exists"));

    assert_eq!(ctx.read("cdk/bin/my-app.ts"), "// existing\n");
    assert!(!ctx.exists("cdk/lib/my-stack.ts"));
}

#[test]
fn help_lists_commands() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("new"));
}
