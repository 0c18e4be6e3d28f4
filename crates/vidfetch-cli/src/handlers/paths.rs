//! Paths command handler.
//!
//! Prints the resolved storage directories in `key = value` format, the
//! same values the web server would use with the same arguments.

use vidfetch_core::StorageLayout;

use crate::commands::StorageArgs;
use crate::error::CliError;

/// Render the layout as `key = value` lines.
pub fn render(layout: &StorageLayout) -> String {
    format!(
        "storage_root = {}\nstaging_root = {}",
        layout.root().display(),
        layout.staging_root().display()
    )
}

pub fn execute(args: &StorageArgs) -> Result<(), CliError> {
    let layout = StorageLayout::resolve(args.storage_dir.as_deref())
        .map_err(|e| CliError::Storage(e.to_string()))?;
    println!("{}", render(&layout));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_key_value_lines() {
        let layout = StorageLayout::new("/srv/videos");
        assert_eq!(
            render(&layout),
            "storage_root = /srv/videos\nstaging_root = /srv/videos/.partial"
        );
    }
}
