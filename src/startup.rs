// Startup module - displays banner and module loading status
//
// Shows version info, the config file in use, and which modules are active,
// before the TUI takes over the screen (or in headless mode).

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: &'static str,
}

/// Print the startup banner and module loading status
/// This runs before the TUI takes over the screen (or in headless mode)
pub fn print_startup(config: &Config) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}stardeck{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Terminal star and flag controls for a texts site{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Module loading
    println!("  {DIM}Loading modules...{RESET}");

    let modules = get_module_status(config);
    for module in &modules {
        print_module_status(module);
    }

    println!();

    // Binding info
    println!(
        "  {MAGENTA}▸{RESET} Site {BOLD}{}{RESET}, text {BOLD}{}{RESET}",
        config.base_url,
        if config.text_id.is_empty() {
            "(unbound)"
        } else {
            &config.text_id
        }
    );
    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(no network calls){RESET}");
    }
    println!();
}

/// Get status of all modules based on config
fn get_module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "star-client",
            enabled: !config.demo_mode,
            description: "POST /texts/{id}/star",
        },
        ModuleStatus {
            name: "handler",
            enabled: true, // Core, always on
            description: "Hover and click binding",
        },
        ModuleStatus {
            name: "tui",
            enabled: config.enable_tui,
            description: "Terminal interface",
        },
        ModuleStatus {
            name: "file-logs",
            enabled: config.logging.file_enabled,
            description: "Rotating JSON logs",
        },
    ]
}

/// Print a single module's status
fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Log startup messages to the TUI log panel
pub fn log_startup(config: &Config) {
    tracing::info!("stardeck v{}", VERSION);

    let modules = get_module_status(config);
    for module in &modules {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("▸ Site {}", config.base_url);
    if config.demo_mode {
        tracing::info!("▸ Demo mode: star requests resolve locally");
    }
}
