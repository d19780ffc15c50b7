//! Build subcommand
//!
//! Cross-compiles the Fibonacci demo for the STORM Core and extracts a raw binary image, ready to
//! be loaded in the SoC's memory.

use std::path::PathBuf;
use std::process::{Command, ExitCode};

use crate::config::{Config, Profiles};
use crate::path::{get_linker_script_path, get_target_dir_path, is_older};
use crate::BuildArgs;

/// Name of the demo package and binary.
const DEMO: &str = "fibonacci";

/// Extra cargo arguments.
const CARGO_ARGS: &[&str] = &[
    "-Zbuild-std=core",
    "-Zbuild-std-features=compiler-builtins-mem",
];

pub fn build(args: &BuildArgs, cfg: &Config) -> ExitCode {
    let profile = resolve_profile(args, cfg);
    let triple = cfg.target.triple();
    let start_address = cfg.target.start_address.unwrap_or(0);

    let mut build_cmd = Command::new(env!("CARGO"));
    build_cmd
        .arg("build")
        .args(CARGO_ARGS)
        .arg("--target")
        .arg(triple)
        .arg("--package")
        .arg(DEMO);

    build_cmd.arg("--profile");
    match profile {
        Profiles::Debug => build_cmd.arg("dev"),
        Profiles::Release => build_cmd.arg("release"),
    };

    // Linker arguments
    let linker_args = format!(
        "-C link-arg=-T{} -C link-arg=--defsym=_start_address={}",
        get_linker_script_path().display(),
        start_address
    );
    build_cmd.env("RUSTFLAGS", linker_args);

    log::debug!("Build command: {:?}", build_cmd);
    match build_cmd.status() {
        Ok(status) if status.success() => {}
        Ok(_) => {
            log::error!("Build failed with command: {:?}", build_cmd);
            return ExitCode::FAILURE;
        }
        Err(err) => {
            log::error!("Could not run cargo: {}", err);
            return ExitCode::FAILURE;
        }
    }

    match objcopy(triple, profile) {
        Some(image) => {
            log::info!("Built the Fibonacci demo, image available at:");
            log::info!("{}", image.display());
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

/// Build profile: `--release`, then configuration, then debug.
pub fn resolve_profile(args: &BuildArgs, cfg: &Config) -> Profiles {
    if args.release {
        Profiles::Release
    } else {
        cfg.target.profile.unwrap_or(Profiles::Debug)
    }
}

/// Extract raw binary from elf file.
///
/// Returns the path of the resulting binary.
fn objcopy(triple: &str, profile: Profiles) -> Option<PathBuf> {
    let path = get_target_dir_path(triple, profile);
    let elf_path = path.join(DEMO);
    let bin_path = path.join(format!("{}.img", DEMO));

    if is_older(&elf_path, &bin_path) {
        // No change since last objcopy, skipping
        return Some(bin_path);
    }

    let mut objcopy_cmd = Command::new("rust-objcopy");
    objcopy_cmd
        .arg("-O")
        .arg("binary")
        .arg(&elf_path)
        .arg(&bin_path);

    match objcopy_cmd.status() {
        Ok(status) if status.success() => Some(bin_path),
        Ok(_) => {
            log::error!("objcopy failed on '{}'", elf_path.display());
            None
        }
        Err(_) => {
            log::error!("objcopy failed. Is `rust-objcopy` installed?");
            None
        }
    }
}
