//! Check system dependencies handler.

use vidfetch_download::YtDlpFetcher;

use crate::error::CliError;

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Platform-specific ways to install yt-dlp.
pub const fn install_hints() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["brew install yt-dlp", "python3 -m pip install -U yt-dlp"]
    } else if cfg!(target_os = "windows") {
        &["winget install yt-dlp", "python -m pip install -U yt-dlp"]
    } else {
        &[
            "python3 -m pip install -U yt-dlp",
            "sudo apt install yt-dlp   (Debian/Ubuntu)",
        ]
    }
}

/// Execute the check-deps command.
///
/// Returns an error if yt-dlp cannot be run.
pub async fn execute(fetcher: &YtDlpFetcher) -> Result<(), CliError> {
    println!("{BOLD}{BLUE}Checking system dependencies...{RESET}\n");

    let binary = fetcher.config().binary.display().to_string();
    match fetcher.version().await {
        Ok(version) => {
            let location = fetcher
                .locate()
                .map_or_else(|| binary.clone(), |p| p.display().to_string());
            println!("{GREEN}✓{RESET} yt-dlp {version} ({location})");
            Ok(())
        }
        Err(e) => {
            println!("{RED}✗{RESET} yt-dlp: {e}\n");
            println!("{BOLD}To install yt-dlp:{RESET}");
            for hint in install_hints() {
                println!("  {hint}");
            }
            Err(CliError::Dependency(format!("{binary}: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vidfetch_download::YtDlpConfig;

    #[test]
    fn hints_mention_yt_dlp() {
        assert!(!install_hints().is_empty());
        assert!(install_hints().iter().all(|h| h.contains("yt-dlp")));
    }

    #[tokio::test]
    async fn missing_binary_is_a_dependency_error() {
        let fetcher = YtDlpFetcher::new(YtDlpConfig {
            binary: PathBuf::from("/nonexistent/yt-dlp"),
            ..YtDlpConfig::default()
        });
        let err = execute(&fetcher).await.unwrap_err();
        assert_eq!(err.exit_code(), 69);
    }
}
