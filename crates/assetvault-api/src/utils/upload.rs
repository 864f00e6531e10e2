//! Common utilities for file upload handlers

use assetvault_core::models::RawUploadItem;
use assetvault_core::AppError;
use axum::extract::Multipart;

/// Collect every file field of a multipart form, whatever its field name.
///
/// A field counts as a file when its disposition carries a filename, even an
/// empty one; plain text fields are skipped. Refuses the request once more than
/// `max_items` files have been seen, before reading the rest of the body.
pub async fn extract_multipart_files(
    mut multipart: Multipart,
    max_items: usize,
) -> Result<Vec<RawUploadItem>, AppError> {
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::debug!(field = ?field.name(), "Skipping non-file multipart field");
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        if items.len() == max_items {
            return Err(AppError::BadRequest(format!(
                "Too many files in one request (max: {})",
                max_items
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        items.push(RawUploadItem::new(
            filename,
            data.to_vec(),
            content_type,
        ));
    }

    Ok(items)
}

/// Refuse batches above the configured item count.
pub fn ensure_batch_size(len: usize, max_items: usize) -> Result<(), AppError> {
    if len > max_items {
        return Err(AppError::BadRequest(format!(
            "Too many items in one request: {} (max: {})",
            len, max_items
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_batch_size() {
        assert!(ensure_batch_size(0, 3).is_ok());
        assert!(ensure_batch_size(3, 3).is_ok());
        assert!(matches!(
            ensure_batch_size(4, 3),
            Err(AppError::BadRequest(_))
        ));
    }
}
