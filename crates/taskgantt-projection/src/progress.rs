//! Task completion percentage

use taskgantt_core::TaskRecord;

/// Completion of a task in percent.
///
/// Subtasks win when present: `round(100 * done / total)`. Otherwise the
/// task's own flag decides between 0 and 100.
pub fn task_progress(task: &TaskRecord) -> u8 {
    if task.subtasks.is_empty() {
        return if task.completed { 100 } else { 0 };
    }

    let done = task.subtasks.iter().filter(|s| s.completed).count();
    (done as f64 * 100.0 / task.subtasks.len() as f64).round() as u8
}

/// Rounded arithmetic mean; 0 for no values
pub fn mean_progress(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    (f64::from(sum) / values.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgantt_core::Subtask;

    fn with_subtasks(done: usize, total: usize) -> TaskRecord {
        (0..total).fold(TaskRecord::new(1, "t"), |task, i| {
            let subtask = Subtask::new(i as i64, "s");
            task.subtask(if i < done { subtask.done() } else { subtask })
        })
    }

    #[test]
    fn flag_decides_without_subtasks() {
        assert_eq!(task_progress(&TaskRecord::new(1, "t")), 0);
        assert_eq!(task_progress(&TaskRecord::new(1, "t").completed()), 100);
    }

    #[test]
    fn subtasks_override_flag() {
        // completed flag ignored once there are subtasks
        let task = with_subtasks(0, 2).completed();
        assert_eq!(task_progress(&task), 0);
    }

    #[test]
    fn subtask_ratio_rounds() {
        assert_eq!(task_progress(&with_subtasks(1, 3)), 33);
        assert_eq!(task_progress(&with_subtasks(2, 3)), 67);
        assert_eq!(task_progress(&with_subtasks(1, 2)), 50);
        assert_eq!(task_progress(&with_subtasks(1, 8)), 13); // 12.5 rounds away from zero
        assert_eq!(task_progress(&with_subtasks(4, 4)), 100);
    }

    #[test]
    fn mean_rounds_to_nearest() {
        assert_eq!(mean_progress(&[]), 0);
        assert_eq!(mean_progress(&[0, 100]), 50);
        assert_eq!(mean_progress(&[33, 34]), 34); // 33.5
        assert_eq!(mean_progress(&[0, 0, 100]), 33);
        assert_eq!(mean_progress(&[100, 100, 100]), 100);
    }
}
