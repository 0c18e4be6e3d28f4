//! Command-line construction for `yt-dlp` invocations.

use std::ffi::OsString;
use std::path::Path;

/// Arguments for resolving metadata without downloading media bytes.
///
/// The configured format is selected here too, so a video without a
/// matching stream is rejected before a job is accepted rather than
/// failing later in the background.
pub fn metadata_args(format: &str, url: &str) -> Vec<OsString> {
    [
        "--dump-json",
        "--no-playlist",
        "--skip-download",
        "--no-warnings",
        "-f",
        format,
        "--",
        url,
    ]
    .into_iter()
    .map(OsString::from)
    .collect()
}

/// Arguments for downloading `url` to `output_template`.
///
/// `--print after_move:filepath` makes `yt-dlp` report the final path of the
/// produced file on stdout once post-processing has finished.
pub fn fetch_args(format: &str, output_template: OsString, url: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "--no-playlist",
        "--no-warnings",
        "--newline",
        "-f",
        format,
        "--print",
        "after_move:filepath",
        "-o",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(output_template);
    args.push("--".into());
    args.push(url.into());
    args
}

/// Output template `{dir}/{stem}.%(ext)s`.
///
/// `%` is the template escape character, so literal percent signs in the
/// stem are doubled.
pub fn output_template(dir: &Path, stem: &str) -> OsString {
    let escaped = stem.replace('%', "%%");
    dir.join(format!("{escaped}.%(ext)s")).into_os_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn metadata_args_skip_download_and_end_with_url() {
        let args = metadata_args("best", "https://youtu.be/abc");
        assert!(args.contains(&OsString::from("--dump-json")));
        let fmt = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[fmt + 1], "best");
        assert!(args.contains(&OsString::from("--skip-download")));
        assert_eq!(args[args.len() - 2], "--");
        assert_eq!(args[args.len() - 1], "https://youtu.be/abc");
    }

    #[test]
    fn fetch_args_print_final_path() {
        let template = output_template(&PathBuf::from("/tmp/stage"), "clip");
        let args = fetch_args("bestvideo+bestaudio", template.clone(), "https://youtu.be/x");

        let print = args.iter().position(|a| a == "--print").unwrap();
        assert_eq!(args[print + 1], "after_move:filepath");

        let out = args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(args[out + 1], template);

        let fmt = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[fmt + 1], "bestvideo+bestaudio");
        assert_eq!(args.last().unwrap(), "https://youtu.be/x");
    }

    #[test]
    fn template_escapes_percent_signs() {
        let template = output_template(&PathBuf::from("/s"), "50%_off");
        assert_eq!(template, PathBuf::from("/s/50%%_off.%(ext)s").into_os_string());
    }
}
