//! Scan results

use serde::{Deserialize, Serialize};

/// The outcome of resolving one broadcast
///
/// `Present("")` is a real, empty scan and distinct from `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanResult {
    Present(String),
    Absent,
}

impl ScanResult {
    pub fn is_present(&self) -> bool {
        matches!(self, ScanResult::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ScanResult::Absent)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            ScanResult::Present(text) => Some(text),
            ScanResult::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<String> {
        self.into()
    }
}

impl From<ScanResult> for Option<String> {
    fn from(result: ScanResult) -> Self {
        match result {
            ScanResult::Present(text) => Some(text),
            ScanResult::Absent => None,
        }
    }
}

impl From<Option<String>> for ScanResult {
    fn from(value: Option<String>) -> Self {
        value.map_or(ScanResult::Absent, ScanResult::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let present = ScanResult::Present("ABC".to_string());
        assert!(present.is_present());
        assert_eq!(present.as_deref(), Some("ABC"));
        assert_eq!(present.into_option(), Some("ABC".to_string()));

        assert!(ScanResult::Absent.is_absent());
        assert_eq!(ScanResult::Absent.as_deref(), None);
    }

    #[test]
    fn test_empty_present_is_not_absent() {
        let empty = ScanResult::Present(String::new());
        assert!(empty.is_present());
        assert_ne!(empty, ScanResult::Absent);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ScanResult::from(None), ScanResult::Absent);
        assert_eq!(
            ScanResult::from(Some("X".to_string())),
            ScanResult::Present("X".to_string())
        );
    }
}
