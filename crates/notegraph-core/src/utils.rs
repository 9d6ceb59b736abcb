use std::borrow::Cow;

pub const ELLIPSIS: &str = "...";

/// Cuts `text` after `max_chars` Unicode scalar values and appends `...` when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}

/// Strips the last `.ext` segment of a file name (`report.v2.pdf` -> `report.v2`).
///
/// A leading dot (`.env`) is treated as an extension too, which leaves an empty stem.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) => {
            let ext = &file_name[pos + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..pos]
            }
        }
        None => file_name,
    }
}
