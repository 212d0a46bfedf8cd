use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read the first line of the settings file as a counter output path.
///
/// Missing file, unreadable file or a blank first line all mean "no
/// override".
pub fn load_output_override(settings_path: &Path) -> Option<PathBuf> {
    let contents = match fs::read_to_string(settings_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(error = %e, path = ?settings_path, "Failed to read settings, using defaults");
            return None;
        }
    };

    let line = contents.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }

    tracing::debug!(output_path = line, "Settings loaded");
    Some(PathBuf::from(line))
}

/// Write the counter output path back as a single line.
pub fn save_output_override(settings_path: &Path, output_path: &Path) -> io::Result<()> {
    if let Some(parent) = settings_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(settings_path, format!("{}\n", output_path.display()))?;
    tracing::debug!(output_path = %output_path.display(), "Settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_no_override() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_output_override(&dir.path().join("settings.txt")), None);
    }

    #[test]
    fn test_crlf_line_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.txt");
        fs::write(&path, "addons/obs/kills.txt\r\nignored\n").unwrap();
        assert_eq!(
            load_output_override(&path),
            Some(PathBuf::from("addons/obs/kills.txt"))
        );
    }

    #[test]
    fn test_blank_line_means_no_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.txt");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_output_override(&path), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addons").join("streamlink").join("settings.txt");
        save_output_override(&path, Path::new("addons/obs/kills.txt")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "addons/obs/kills.txt\n");
        assert_eq!(
            load_output_override(&path),
            Some(PathBuf::from("addons/obs/kills.txt"))
        );
    }
}
