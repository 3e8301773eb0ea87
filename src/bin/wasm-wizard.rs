//! `wasm-wizard`: forwards every invocation to the installed native binary.

use std::ffi::OsString;
use wasm_wizard_dist::install::InstallTarget;
use wasm_wizard_dist::launcher::launch;
use wasm_wizard_dist::runtime::{RealRuntime, Runtime};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let runtime = RealRuntime;
    let target = match runtime.current_exe() {
        Ok(exe) => InstallTarget::beside(&exe),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    // The terminal delivers Ctrl-C to the child as well; the child decides
    // how to exit and we report whatever it chose.
    let interrupts = tokio::spawn(async {
        while tokio::signal::ctrl_c().await.is_ok() {}
    });

    let code = match launch(&runtime, &target, args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    interrupts.abort();
    std::process::exit(code);
}
