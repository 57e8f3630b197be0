//! Summary statistics for a generated report.

use nadzor_bodies::InspectionBody;
use nadzor_controls::InspectionControl;
use nadzor_core::BodyId;

/// Counts computed over an already-filtered sequence of controls.
///
/// Invariant: `safe + unsafe_count == total` for any input, including the
/// empty sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub safe: usize,
    pub unsafe_count: usize,
}

impl ReportStats {
    /// Pure, single pass over the records.
    pub fn from_controls(controls: &[InspectionControl]) -> Self {
        let total = controls.len();
        let safe = controls.iter().filter(|c| c.product_safe).count();
        Self {
            total,
            safe,
            unsafe_count: total - safe,
        }
    }
}

/// Display name for the report header.
///
/// Falls back to a literal "N/A" when no body id was selected or the id is
/// not among the loaded bodies.
pub fn body_display_name(id: Option<BodyId>, bodies: &[InspectionBody]) -> String {
    id.and_then(|id| bodies.iter().find(|b| b.id == Some(id)))
        .map(|b| b.name.clone())
        .unwrap_or_else(|| "N/A".to_string())
}
