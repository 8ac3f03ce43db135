use crate::config::Config;
use crate::db::pool::require_existing;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::Connection;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the configured database to `dest_file`, optionally compressed.
    /// Returns the final path, or `None` when the user declined to overwrite.
    pub fn backup(
        cfg: &Config,
        dest_file: &Path,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);

        // 1️⃣ Check DB exists
        require_existing(src)?;

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest_file.parent() {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Existing destination → ask, unless forced
        if dest_file.exists() && !force && !confirm_overwrite(dest_file)? {
            println!("❌ Backup cancelled by user.");
            return Ok(None);
        }

        // 4️⃣ Copy database
        fs::copy(src, dest_file)?;
        success(format!("Backup created: {}", dest_file.display()));

        // 5️⃣ Optional compression
        let final_path = if compress {
            let compressed = compress_backup(dest_file)?;

            if let Err(e) = fs::remove_file(dest_file) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }

            compressed
        } else {
            dest_file.to_path_buf()
        };

        // 6️⃣ Log in DB (non blocking)
        if let Ok(conn) = Connection::open(src)
            && let Err(e) = crate::db::log::ttlog(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            )
        {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(Some(final_path))
    }

    /// Zip the database next to itself before an `init` purges it.
    ///
    /// Missing or empty database files have nothing worth keeping and are
    /// skipped (`Ok(None)`).
    pub fn snapshot_before_init(db_path: &Path) -> AppResult<Option<PathBuf>> {
        let len = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
        if len == 0 {
            return Ok(None);
        }

        let file_name = db_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::Backup(format!("not a file: {}", db_path.display())))?;

        let stem = format!("{}-{}-pre-init", Local::now().format("%Y%m%d_%H%M%S"), file_name);

        let (file, backup_path) = create_unique(db_path, &stem)?;

        write_zip(db_path, file)?;
        success(format!("📦 Backup created: {}", backup_path.display()));

        Ok(Some(backup_path))
    }
}

/// Open `<stem>.zip` next to `db_path`, or `<stem>-1.zip`, `<stem>-2.zip`, …
/// when an earlier snapshot from the same second already holds the name.
fn create_unique(db_path: &Path, stem: &str) -> AppResult<(File, PathBuf)> {
    let mut n = 0u32;
    loop {
        let name = if n == 0 {
            format!("{stem}.zip")
        } else {
            format!("{stem}-{n}.zip")
        };
        let path = db_path.with_file_name(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    println!(
        "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
        dest.display()
    );

    let mut answer = String::new();
    print!("> ");
    stdout().flush().ok();
    stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup: .zip on Windows, .tar.gz elsewhere.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let out = if cfg!(target_os = "windows") {
        let zip_path = path.with_extension("zip");
        write_zip(path, File::create(&zip_path)?)?;
        zip_path
    } else {
        let gz_path = PathBuf::from(format!("{}.tar.gz", path.display()));
        write_tar_gz(path, &gz_path)?;
        gz_path
    };

    println!("📦 Compressed: {}", out.display());
    Ok(out)
}

fn entry_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Backup(format!("not a file: {}", path.display())))
}

fn write_zip(src: &Path, file: File) -> AppResult<()> {
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name(src)?, options)
        .map_err(|e| AppError::Backup(format!("start_file: {}", e)))?;

    let mut f = File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish()
        .map_err(|e| AppError::Backup(format!("finish: {}", e)))?;

    Ok(())
}

fn write_tar_gz(src: &Path, gz_path: &Path) -> AppResult<()> {
    let file = File::create(gz_path)?;
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut archive = tar::Builder::new(encoder);

    archive.append_path_with_name(src, entry_name(src)?)?;
    archive.into_inner()?.finish()?;

    Ok(())
}
