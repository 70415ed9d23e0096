use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use reqwest::blocking::Client;

#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid progress template: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error("could not determine the home directory")]
    NoHomeDir,
}

/// Default cache root: `~/.cache/ember-dataset`.
pub fn default_cache_dir() -> Result<PathBuf, UtilError> {
    let home = dirs::home_dir().ok_or(UtilError::NoHomeDir)?;
    Ok(home.join(".cache").join("ember-dataset"))
}

/// Download the file at the specified url.
/// File download progress is reported with the help of a [progress bar](indicatif).
///
/// # Arguments
///
/// * `url` - The file URL to download.
/// * `message` - The message to display on the progress bar during download.
///
/// # Returns
///
/// A vector of bytes containing the downloaded file data.
pub fn download_file_as_bytes(url: &str, message: &str) -> Result<Vec<u8>, UtilError> {
    log::debug!("downloading {}", url);
    let mut response = Client::new().get(url).send()?.error_for_status()?;

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    let msg = message.to_owned();
    pb.set_style(
        ProgressStyle::with_template("{msg}\n    {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({eta})")?
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("▬  "),
    );
    pb.set_message(msg.clone());

    let mut bytes: Vec<u8> = Vec::with_capacity(total_size as usize);

    let mut buffer = [0; 8192];
    loop {
        let read_bytes = response.read(&mut buffer)?;
        if read_bytes == 0 {
            break;
        }
        bytes.write_all(&buffer[0..read_bytes])?;
        pb.inc(read_bytes as u64);
    }

    pb.finish_with_message(msg);

    Ok(bytes)
}

/// Downloads `url` into `dest` unless the file is already there.
///
/// The bytes land in a `.part` sibling first and are renamed into place, so an
/// interrupted download never leaves a truncated `dest` behind.
pub fn download_to(url: &str, dest: &Path) -> Result<(), UtilError> {
    if dest.exists() {
        log::debug!("using cached {}", dest.display());
        return Ok(());
    }

    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());
    let bytes = download_file_as_bytes(url, &name)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let partial = partial_path(dest);
    std::fs::write(&partial, bytes)?;
    std::fs::rename(&partial, dest)?;
    log::info!("saved {} ({})", name, dest.display());

    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
