//! Entity label vocabulary: misc filtering, readable names and display colors.

use std::borrow::Cow;

/// Fill color used for note nodes.
pub const NOTE_COLOR: &str = "#f032e6";

/// Fill color for labels without a dedicated entry.
pub const FALLBACK_ENTITY_COLOR: &str = "#64748B";

/// Returns `true` for the catch-all labels that never get their own graph node.
pub fn is_misc_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower == "misc" || lower == "miscellaneous"
}

/// Human-facing name for an NER label (`PER` -> `Person`, `programlang` -> `Programming Language`).
///
/// Unknown labels are returned with their first character upper-cased.
pub fn readable_entity_label(label: &str) -> Cow<'_, str> {
    let known = match label {
        "PER" | "PERSON" => "Person",
        "ORG" | "ORGANIZATION" => "Organization",
        "LOC" | "LOCATION" | "GPE" => "Location",
        "DATE" => "Date",
        "TIME" => "Time",
        "MONEY" => "Money",
        "PERCENT" => "Percentage",
        "field" => "Academic Field",
        "task" => "Task",
        "product" => "Product",
        "algorithm" => "Algorithm",
        "metrics" => "Metrics",
        "programlang" => "Programming Language",
        "conference" => "Conference",
        "book" => "Book",
        "award" => "Award",
        "poem" => "Poem",
        "event" => "Event",
        "magazine" => "Magazine",
        "literarygenre" => "Literary Genre",
        "discipline" => "Discipline",
        "enzyme" => "Enzyme",
        "protein" => "Protein",
        "chemicalelement" => "Chemical Element",
        "chemicalcompound" => "Chemical Compound",
        "astronomicalobject" => "Astronomical Object",
        "academicjournal" => "Academic Journal",
        "theory" => "Theory",
        _ => return capitalize_first(label),
    };
    Cow::Borrowed(known)
}

fn capitalize_first(label: &str) -> Cow<'_, str> {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(label),
    }
}

/// Stable display color for an entity label. Label families share a hue.
pub fn entity_color(label: &str) -> &'static str {
    match label {
        "PER" | "PERSON" | "discipline" => "#3B82F6",
        "ORG" | "ORGANIZATION" | "enzyme" => "#10B981",
        "LOC" | "LOCATION" | "GPE" | "literarygenre" => "#A855F7",
        "DATE" | "chemicalcompound" => "#F59E0B",
        "TIME" | "chemicalelement" => "#F97316",
        "MONEY" | "award" => "#EAB308",
        "PERCENT" | "poem" => "#EC4899",
        "field" | "astronomicalobject" => "#6366F1",
        "task" | "academicjournal" => "#06B6D4",
        "product" | "protein" => "#14B8A6",
        "algorithm" | "theory" => "#8B5CF6",
        "metrics" => "#F43F5E",
        "programlang" => "#0EA5E9",
        "conference" => "#84CC16",
        "book" => "#D946EF",
        "event" => "#EF4444",
        "magazine" => "#22C55E",
        _ => FALLBACK_ENTITY_COLOR,
    }
}
