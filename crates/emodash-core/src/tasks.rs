//! Task view filter.

use emodash_api::Task;

use crate::state::TaskFilter;

/// Derived task list for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    /// Open tasks that pass the filter, in cache order.
    pub active: Vec<Task>,
    /// Completed tasks. Never filtered.
    pub completed: Vec<Task>,
    /// Whether the quick-only banner is shown.
    pub banner_visible: bool,
    /// Number of open tasks before filtering.
    pub open_count: usize,
}

impl TaskView {
    /// Counts line, e.g. `Open: 3 • Completed: 1`.
    #[must_use]
    pub fn counts_label(&self) -> String {
        format!(
            "Open: {} • Completed: {}",
            self.open_count,
            self.completed.len()
        )
    }
}

/// Whether quick-only mode is in effect.
///
/// Negative mood restricts the list to quick tasks unless a priority filter
/// is selected or the user has re-selected "all" to override it. The
/// "quick" filter always restricts.
#[must_use]
pub fn quick_only_effective(
    filter: TaskFilter,
    negative_mood_active: bool,
    show_all_override: bool,
) -> bool {
    let is_priority_filter = filter.priority().is_some();
    (negative_mood_active
        && !is_priority_filter
        && !(filter == TaskFilter::All && show_all_override))
        || filter == TaskFilter::Quick
}

/// Computes the visible task set.
#[must_use]
pub fn compute_visible(
    tasks: &[Task],
    filter: TaskFilter,
    negative_mood_active: bool,
    show_all_override: bool,
) -> TaskView {
    let (open, completed): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|t| !t.done);
    let quick_only = quick_only_effective(filter, negative_mood_active, show_all_override);

    let active = open
        .iter()
        .filter(|t| {
            if quick_only {
                t.quick
            } else {
                filter.priority().is_none_or(|p| t.priority == p)
            }
        })
        .map(|t| (*t).clone())
        .collect();

    TaskView {
        active,
        completed: completed.into_iter().cloned().collect(),
        banner_visible: quick_only,
        open_count: open.len(),
    }
}

/// Moves a task by `delta` positions within the list. Out-of-range moves
/// and unknown ids leave the list unchanged. Returns true if it moved.
pub fn move_task(tasks: &mut Vec<Task>, id: emodash_api::TaskId, delta: isize) -> bool {
    let Some(idx) = tasks.iter().position(|t| t.id == id) else {
        return false;
    };
    let Some(new_idx) = idx.checked_add_signed(delta) else {
        return false;
    };
    if new_idx >= tasks.len() {
        return false;
    }
    let item = tasks.remove(idx);
    tasks.insert(new_idx, item);
    true
}
