use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Background tasks owned by a connection; at most one per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSlot {
    /// Consumes the transport's event stream
    Driver,
    Heartbeat,
    Reconnect,
}

/// Manages background tasks with proper lifecycle handling
#[derive(Debug, Default)]
pub struct TaskManager {
    handles: HashMap<TaskSlot, JoinHandle<()>>,
}

impl TaskManager {
    /// Create a new empty task manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task into `slot`, aborting whatever occupied it
    pub fn spawn<F>(&mut self, slot: TaskSlot, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        if let Some(previous) = self.handles.insert(slot, handle) {
            previous.abort();
        }
    }

    /// Abort the task in `slot`, if any
    pub fn cancel(&mut self, slot: TaskSlot) {
        if let Some(handle) = self.handles.remove(&slot) {
            handle.abort();
        }
    }

    /// Whether `slot` holds a task that has not finished
    pub fn is_active(&self, slot: TaskSlot) -> bool {
        self.handles
            .get(&slot)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tracked tasks that have not finished
    pub fn active_count(&self) -> usize {
        self.handles
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Abort all tasks without waiting
    pub fn abort_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_spawn_replaces_slot() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskSlot::Reconnect, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        tasks.spawn(TaskSlot::Reconnect, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        tokio::task::yield_now().await;
        assert_eq!(tasks.active_count(), 1);
        assert!(tasks.is_active(TaskSlot::Reconnect));
        assert!(!tasks.is_active(TaskSlot::Heartbeat));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_abort_all() {
        let mut tasks = TaskManager::new();
        for slot in [TaskSlot::Driver, TaskSlot::Heartbeat, TaskSlot::Reconnect] {
            tasks.spawn(slot, async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
        assert_eq!(tasks.active_count(), 3);

        tasks.cancel(TaskSlot::Heartbeat);
        assert_eq!(tasks.active_count(), 2);

        tasks.abort_all();
        assert_eq!(tasks.active_count(), 0);
    }

    #[tokio::test]
    async fn test_finished_tasks_are_not_active() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskSlot::Driver, async {});

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!tasks.is_active(TaskSlot::Driver));
    }
}
