use std::{env, env::VarError};

/// The server takes no arguments. Any argument prints the help text and the current configuration.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Secrets are never printed, so list the safe variables explicitly
    const DISPLAY_ENVS: [&str; 10] = [
        "RUST_LOG",
        "PCL_HOST",
        "PCL_PORT",
        "PCL_DATABASE_URL",
        "PCL_RAZORPAY_KEY_ID",
        "PCL_RAZORPAY_HMAC_CHECKS",
        "PCL_CASHFREE_BASE_URL",
        "PCL_STORAGE_URL",
        "PCL_OTP_REQUEST_TIMEOUT",
        "PCL_EVENT_BUFFER_SIZE",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    for name in DISPLAY_ENVS {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    }
}
