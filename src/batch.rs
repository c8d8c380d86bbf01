//! Unpacks an archive into a directory and post-processes the extracted
//! files. A file that fails is recorded in the 'Report' and the rest of the
//! batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cam::CamArchive;
use crate::plt::PltFile;
use crate::uni::UniFile;
use crate::utils::extensions::{DECODED_EXT, PLT_EXT, TEXT_EXT, UNI_EXT};
use crate::{ArchiveError, Context};

/// A file that could not be extracted or processed.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: ArchiveError,
}

/// The outcome of a batch.
#[derive(Debug, Default)]
pub struct Report {
    /// Files written by 'extract_all'.
    pub extracted: Vec<PathBuf>,
    /// Files written by 'process_tree'.
    pub processed: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: PathBuf, error: ArchiveError) {
        log::warn!("{}: {}", path.display(), error);
        self.failures.push(Failure { path, error });
    }
}

/// Write 'data' to 'path', creating the parent directories.
fn save_file(path: &Path, data: &[u8]) -> Result<(), ArchiveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
    }
    fs::write(path, data).map_err(|e| ArchiveError::io(path, e))
}

/// Write every entry of 'archive' below 'out_dir'. Only a failure to create
/// 'out_dir' itself aborts the extraction.
pub fn extract_all(
    archive: &CamArchive,
    out_dir: &Path,
    report: &mut Report,
) -> Result<(), ArchiveError> {
    fs::create_dir_all(out_dir).map_err(|e| ArchiveError::io(out_dir, e))?;

    for entry in archive.entries() {
        let res = entry.relative_path().and_then(|rel| {
            let path = out_dir.join(rel);
            save_file(&path, archive.contents(entry)?)?;
            Ok(path)
        });
        match res {
            Ok(path) => {
                log::info!("Extracted {}", entry.name);
                report.extracted.push(path);
            }
            Err(err) => report.fail(out_dir.join(&entry.name), err),
        }
    }
    Ok(())
}

/// Returns 'path' with '.ext' appended to the full file name.
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Process a single extracted file. Pilot files are rendered as text and
/// unit files are decompressed, each next to the source file. Returns the
/// path written, or None if the file is of neither kind.
pub fn process_file(
    path: &Path,
    ctx: Context,
) -> Result<Option<PathBuf>, ArchiveError> {
    let ext = path.extension().and_then(|e| e.to_str());
    let is_plt = ext.map_or(false, |e| e.eq_ignore_ascii_case(PLT_EXT));
    let is_uni = ext.map_or(false, |e| e.eq_ignore_ascii_case(UNI_EXT));
    if !is_plt && !is_uni {
        return Ok(None);
    }

    let input = fs::read(path).map_err(|e| ArchiveError::io(path, e))?;
    if is_plt {
        let plt = PltFile::parse(&input)?;
        log::info!(
            "{}: {} pilots, {} callsigns",
            path.display(),
            plt.pilots.len(),
            plt.callsigns.len()
        );
        let out = with_suffix(path, TEXT_EXT);
        save_file(&out, plt.to_string().as_bytes())?;
        return Ok(Some(out));
    }

    let uni = UniFile::decode(&input, ctx)?;
    log::info!(
        "{}: decompressed {} units into {} bytes",
        path.display(),
        uni.header.num_units,
        uni.data.len()
    );
    let out = with_suffix(path, DECODED_EXT);
    save_file(&out, &uni.data)?;
    Ok(Some(out))
}

/// Walk 'dir' in name order and process every pilot and unit file in it.
pub fn process_tree(dir: &Path, ctx: Context, report: &mut Report) {
    // Collect first so that the files written below are not visited.
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                files.push(entry.into_path())
            }
            Ok(_) => {}
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                let io = std::io::Error::from(err);
                report.fail(path.clone(), ArchiveError::io(path, io));
            }
        }
    }

    for path in files {
        match process_file(&path, ctx) {
            Ok(Some(out)) => report.processed.push(out),
            Ok(None) => {}
            Err(err) => report.fail(path, err),
        }
    }
}
