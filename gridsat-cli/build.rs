use std::{env, path::Path, process::Command, str::from_utf8};

/// Output of a successful command run.
fn command_output(command: &mut Command) -> Option<String> {
    command
        .output()
        .ok()
        .filter(|result| result.status.success())
        .and_then(|result| from_utf8(&result.stdout).ok().map(|out| out.trim().to_owned()))
}

fn main() {
    let rustc = env::var("RUSTC").unwrap();
    let package_version = env::var("CARGO_PKG_VERSION").unwrap();

    let rustc_version = command_output(Command::new(rustc).arg("--version"))
        .expect("Failed to query rustc version");

    let git_version = if Path::new("../.git").exists() {
        command_output(
            Command::new("git")
                .arg("describe")
                .arg("--tags")
                .arg("--match=v[0-9]*")
                .arg("--dirty=-d"),
        )
    } else {
        None
    };

    let version = match git_version {
        Some(tag) => tag.trim_start_matches('v').to_owned(),
        None => package_version,
    };

    println!("cargo:rustc-env=GRIDSAT_VERSION={}", version);
    println!("cargo:rustc-env=GRIDSAT_RUSTC_VERSION={}", rustc_version);
    println!(
        "cargo:rustc-env=GRIDSAT_PROFILE={}",
        env::var("PROFILE").unwrap()
    );
}
