#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
mod platform;

fn main() -> anyhow::Result<()> {
    platform::run_app()
}
