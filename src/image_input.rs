//! 画像ファイルの読み込み
//!
//! ファイル内容からMIMEタイプを判定し（判定できなければ拡張子から）、
//! Base64化して SelectedImage にする。サイズ制限はしない

use crate::error::{Result, TranslatorError};
use bisaya_common::SelectedImage;
use image::ImageFormat;
use std::path::Path;

pub fn load_image(path: &Path) -> Result<SelectedImage> {
    if !path.exists() {
        return Err(TranslatorError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime_type(path, &bytes).ok_or_else(|| {
        TranslatorError::ImageLoad(format!("画像形式を判定できません: {}", path.display()))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!("loaded {} ({}, {} bytes)", file_name, mime_type, bytes.len());
    Ok(SelectedImage::from_bytes(
        &file_name,
        mime_type,
        &bytes,
        path.display().to_string(),
    ))
}

/// MIMEタイプ判定（内容優先、拡張子フォールバック）
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()
        .map(|format| format.to_mime_type())
}
