//! Repeatable booking/guest rows

use crate::error::FormError;
use crate::model::{FieldRef, GroupKind};
use crate::surface::FormSurface;

/// What `remove_row` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRemoval {
    Removed,
    /// Only row left; its value was cleared instead
    Cleared,
    /// No row at that index
    Missing,
}

/// Append an empty row and focus it
pub fn add_row<F: FormSurface>(form: &mut F, group: GroupKind) -> Result<FieldRef, FormError> {
    let row = form.append_row(group)?;
    form.focus(&row)?;
    tracing::debug!(group = group.field_name(), row = row.index, "Added row");
    Ok(row)
}

/// Remove a row, keeping at least one in the group
pub fn remove_row<F: FormSurface>(
    form: &mut F,
    group: GroupKind,
    index: usize,
) -> Result<RowRemoval, FormError> {
    let rows = form.count(group.field_name());
    if index >= rows {
        tracing::warn!(group = group.field_name(), index, rows, "Remove for missing row");
        return Ok(RowRemoval::Missing);
    }

    if rows > 1 {
        form.remove_row(group, index)?;
        Ok(RowRemoval::Removed)
    } else {
        form.set_value(&FieldRef::new(group.field_name(), index), "")?;
        Ok(RowRemoval::Cleared)
    }
}
