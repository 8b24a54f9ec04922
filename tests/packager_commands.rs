// tests/packager_commands.rs

mod common;
use crate::common::fake_runner::{FakeOutcome, FakeRunner};
use crate::common::init_tracing;

use pipexec::errors::{PipexecError, RunErrorKind};
use pipexec::packager::{prime_sudo, Packager, PackagerOptions};
use pipexec::types::PackageSystem;

fn deb(runner: FakeRunner, options: PackagerOptions) -> Packager<FakeRunner> {
    Packager::new(PackageSystem::Deb, runner, options)
}

#[tokio::test]
async fn only_the_first_install_refreshes() {
    init_tracing();
    let packager = deb(FakeRunner::new(), PackagerOptions::default());

    packager.install("curl").await.unwrap();
    packager.install("git").await.unwrap();

    assert_eq!(
        packager.runner().executed(),
        vec![
            "/usr/bin/apt-get update",
            "/usr/bin/apt-get install -y curl",
            "/usr/bin/apt-get install -y git",
        ]
    );
}

#[tokio::test]
async fn refresh_can_be_disabled() {
    init_tracing();
    let options = PackagerOptions {
        refresh_on_first_install: false,
        ..PackagerOptions::default()
    };
    let packager = deb(FakeRunner::new(), options);

    packager.install("curl").await.unwrap();

    assert_eq!(packager.runner().executed(), vec!["/usr/bin/apt-get install -y curl"]);
}

#[tokio::test]
async fn simulate_passes_dash_s_to_apt() {
    init_tracing();
    let options = PackagerOptions {
        simulate: true,
        refresh_on_first_install: false,
        ..PackagerOptions::default()
    };
    let packager = deb(FakeRunner::new(), options);

    packager.remove("vim", true).await.unwrap();

    assert_eq!(
        packager.runner().executed(),
        vec!["/usr/bin/apt-get remove -y -s vim", "/usr/bin/apt-get autoremove -y -s"]
    );
}

#[tokio::test]
async fn stops_at_the_first_failing_command() {
    init_tracing();
    let runner = FakeRunner::new().fail_on(
        "update",
        FakeOutcome::Stderr("E: Could not get lock".to_string()),
    );
    let packager = deb(runner, PackagerOptions::default());

    let err = packager.install("curl").await.unwrap_err();

    match err {
        PipexecError::Run(run_err) => match run_err.kind() {
            RunErrorKind::StageStderr(text) => assert!(text.contains("lock")),
            other => panic!("Expected StageStderr, got: {other:?}"),
        },
        other => panic!("Expected Run error, got: {other:?}"),
    }
    assert_eq!(packager.runner().executed(), vec!["/usr/bin/apt-get update"]);
}

#[tokio::test]
async fn unsuccessful_command_is_an_error() {
    init_tracing();
    let runner = FakeRunner::new().fail_on("-Rs", FakeOutcome::NotOk);
    let packager = Packager::new(PackageSystem::Pacman, runner, PackagerOptions::default());

    let err = packager.remove("base-devel", true).await.unwrap_err();

    match err {
        PipexecError::CommandUnsuccessful(command) => {
            assert_eq!(command, "/usr/bin/pacman -Rs base-devel");
        }
        other => panic!("Expected CommandUnsuccessful, got: {other:?}"),
    }
}

#[tokio::test]
async fn operations_without_commands_succeed() {
    init_tracing();
    let packager = Packager::new(PackageSystem::Ebuild, FakeRunner::new(), PackagerOptions::default());

    packager.clean().await.unwrap();

    assert!(packager.runner().executed().is_empty());
}

#[tokio::test]
async fn prime_sudo_runs_true_under_sudo() {
    init_tracing();
    let runner = FakeRunner::new();
    prime_sudo(&runner).await.unwrap();
    assert_eq!(runner.executed(), vec!["sudo /bin/true"]);

    let refused = FakeRunner::new().fail_on("sudo", FakeOutcome::NotOk);
    assert!(matches!(
        prime_sudo(&refused).await,
        Err(PipexecError::CommandUnsuccessful(_))
    ));
}

#[tokio::test]
async fn sudo_primes_credentials_and_prefixes_commands() {
    init_tracing();
    let options = PackagerOptions {
        sudo: true,
        ..PackagerOptions::default()
    };
    let packager = Packager::new(PackageSystem::Zypp, FakeRunner::new(), options);

    packager.prepare().await.unwrap();
    packager.install("htop").await.unwrap();

    assert_eq!(
        packager.runner().executed(),
        vec![
            "sudo /bin/true",
            "sudo /usr/bin/zypper refresh",
            "sudo /usr/bin/zypper install --auto-agree-with-licenses htop",
        ]
    );
}

#[tokio::test]
async fn prepare_without_sudo_runs_nothing() {
    init_tracing();
    let packager = deb(FakeRunner::new(), PackagerOptions::default());

    packager.prepare().await.unwrap();

    assert!(packager.runner().executed().is_empty());
}

#[tokio::test]
async fn refused_sudo_stops_before_any_package_command() {
    init_tracing();
    let runner = FakeRunner::new().fail_on("/bin/true", FakeOutcome::NotOk);
    let options = PackagerOptions {
        sudo: true,
        ..PackagerOptions::default()
    };
    let packager = deb(runner, options);

    let err = packager.prepare().await.unwrap_err();

    assert!(matches!(err, PipexecError::CommandUnsuccessful(ref c) if c == "sudo /bin/true"));
    assert_eq!(packager.runner().executed(), vec!["sudo /bin/true"]);
}
