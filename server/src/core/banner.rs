//! Startup banner and URL display

use super::config::is_all_interfaces;
use super::constants::APP_NAME;
use crate::utils::terminal::terminal_link;

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, sms_enabled: bool, sms_originator: &str, data_dir: &str) {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    // Label width: "API docs:" is 9 chars, pad to 10 for alignment
    const W: usize = 10;

    let admin_url = format!("http://{}:{}/admin", display_host, port);
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Admin:",
        terminal_link(&admin_url)
    );

    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/webhook \x1b[90m(POST, form-encoded)\x1b[0m",
        "Webhook:", display_host, port
    );

    println!(
        "  \x1b[35m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/api/docs",
        "API docs:", display_host, port
    );

    if sms_enabled {
        println!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m delivering as {}",
            "SMS:", sms_originator
        );
    } else {
        println!(
            "  \x1b[90m➜  {:<W$} disabled, outbound messages are logged only\x1b[0m",
            "SMS:"
        );
    }

    // Show network info based on bind address
    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    } else if is_all_interfaces(host) {
        // Enumerate LAN IPs when binding to all interfaces
        if let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                let network_url = format!("http://{}:{}/admin", ip, port);
                println!(
                    "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
                    "Network:",
                    terminal_link(&network_url)
                );
            }
        }
    } else {
        // Binding to a specific IP — show it directly
        let network_url = format!("http://{}:{}/admin", host, port);
        println!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
            "Network:",
            terminal_link(&network_url)
        );
    }
    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Data:", data_dir);

    println!();
}

/// Print update notification after banner
pub fn print_update_available(current: &str, new_version: &str) {
    let crates_url = "https://crates.io/crates/textdesk";
    println!(
        "  \x1b[33m[Update available]\x1b[0m v{} -> v{}",
        current, new_version
    );
    println!("  Run: \x1b[36mcargo install textdesk\x1b[0m");
    println!("  {}", terminal_link(crates_url));
    println!();
}
