//! 出力ファイルの書き込み

use crate::error::Result;
use dubletten_common::ExportFile;
use std::path::{Path, PathBuf};

/// 出力先パスを決める
///
/// ディレクトリ（または拡張子なし）ならモードの既定ファイル名を付ける。
pub fn output_path_for(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// ワークブックを書き出して出力先を返す
pub fn write_export(file: &ExportFile, output: &Path) -> Result<PathBuf> {
    let path = output_path_for(output, file.file_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&path, &file.bytes)?;
    log::info!(
        "Export geschrieben: {} ({} bytes, {})",
        path.display(),
        file.bytes.len(),
        file.mime_type
    );
    Ok(path)
}
