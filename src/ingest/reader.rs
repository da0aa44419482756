use anyhow::{Context, Result};
use std::path::Path;

/// Read a document into plain text.
///
/// PDFs go through pdf-extract on a blocking worker; everything else is
/// treated as UTF-8 text.
pub async fn read_document(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        let pdf_path = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&pdf_path))
            .await
            .context("PDF extraction task failed")?
            .with_context(|| format!("Failed to extract text from {}", path.display()))
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_plain_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text content").unwrap();

        let text = read_document(&path).await.unwrap();
        assert_eq!(text, "plain text content");
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = read_document(Path::new("/no/such/file.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }
}
