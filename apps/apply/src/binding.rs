use crate::answers::FieldValue;
use crate::catalog::FieldKind;

/// The raw payload of one input-change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawChange {
    /// A toggle flipped; carries the resulting checked state.
    Toggled(bool),
    /// A text or number input changed; carries the full new buffer.
    Edited(String),
}

/// Translates one change notification into the value to merge into the
/// record. Exactly one store update per notification; the only branch is
/// checkbox vs. everything else.
pub fn bind_change(kind: FieldKind, change: RawChange) -> FieldValue {
    match change {
        RawChange::Toggled(checked) => FieldValue::Bool(checked),
        RawChange::Edited(text) => match kind {
            // An empty or non-numeric buffer reads as 0, like an empty
            // native number input.
            FieldKind::Number => FieldValue::Number(text.trim().parse().unwrap_or(0)),
            _ => FieldValue::Text(text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_uses_checked_state() {
        assert_eq!(
            bind_change(FieldKind::Checkbox, RawChange::Toggled(true)),
            FieldValue::Bool(true)
        );
        assert_eq!(
            bind_change(FieldKind::Checkbox, RawChange::Toggled(false)),
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn test_number_kind_parses_digits() {
        assert_eq!(
            bind_change(FieldKind::Number, RawChange::Edited("42".to_string())),
            FieldValue::Number(42)
        );
    }

    #[test]
    fn test_empty_number_buffer_reads_as_zero() {
        assert_eq!(
            bind_change(FieldKind::Number, RawChange::Edited(String::new())),
            FieldValue::Number(0)
        );
    }

    #[test]
    fn test_text_kinds_pass_through() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Tel, FieldKind::Url] {
            assert_eq!(
                bind_change(kind, RawChange::Edited("hello".to_string())),
                FieldValue::Text("hello".to_string())
            );
        }
    }
}
