//! Input enumeration and output naming

use std::io;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// True if the path has an image extension the readers handle.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Expand directories into their image files.
///
/// Files are kept as given; directory entries are filtered to image
/// extensions and sorted. The result keeps argument order.
pub fn collect_inputs(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = std::fs::read_dir(path)?
                .map(|e| e.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()?;
            entries.retain(|p| p.is_file() && is_image(p));
            entries.sort();
            out.extend(entries);
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

fn stem(input: &Path) -> &str {
    input.file_stem().and_then(|s| s.to_str()).unwrap_or("image")
}

/// `<out_dir>/<stem>/<file name>`
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("image.png"));
    out_dir.join(stem(input)).join(name)
}

/// `<annotations>/<stem>.xml`
pub fn annotation_path(annotations: &Path, input: &Path) -> PathBuf {
    annotations.join(format!("{}.xml", stem(input)))
}
