use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

pub fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn profilegen_binary() -> PathBuf {
    let root = crate_root();
    ensure_binary_built().expect("failed to build the profilegen binary");

    let mut candidates = Vec::new();
    if let Ok(target_dir) = env::var("CARGO_TARGET_DIR") {
        candidates.push(PathBuf::from(&target_dir).join("debug").join("profilegen"));
        candidates.push(PathBuf::from(&target_dir).join("release").join("profilegen"));
    }
    candidates.push(root.join("target").join("debug").join("profilegen"));
    candidates.push(root.join("target").join("release").join("profilegen"));

    for candidate in candidates {
        if candidate.is_file() {
            return candidate;
        }
    }
    panic!("unable to locate the profilegen binary (checked target/debug and target/release)");
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

fn ensure_binary_built() -> Result<()> {
    static BUILT: AtomicBool = AtomicBool::new(false);
    if BUILT.load(Ordering::SeqCst) {
        return Ok(());
    }

    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let mutex = LOCK.get_or_init(|| Mutex::new(()));
    let _guard = mutex.lock().unwrap_or_else(|err| err.into_inner());

    if BUILT.load(Ordering::SeqCst) {
        return Ok(());
    }

    let status = Command::new("cargo")
        .arg("build")
        .arg("--bins")
        .arg("--quiet")
        .current_dir(crate_root())
        .status()
        .context("failed to compile the profilegen binary")?;
    if status.success() {
        BUILT.store(true, Ordering::SeqCst);
        Ok(())
    } else {
        bail!("cargo build --bins exited with {}", status);
    }
}
