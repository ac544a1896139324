//! Callback-style asset tasks, answered by the host.
//!
//! Games register named tasks with success and error callbacks and call
//! [`AssetsManager::load`]. The host drains the request list, fetches the
//! files, and reports back through [`AssetsManager::complete`]. Each task
//! fires exactly one callback. Dropping a task without completing it drops
//! its callbacks unfired.

use std::collections::BTreeMap;
use serde::Serialize;
use crate::error::{AssetError, AssetResult};

/// Identifies one asset task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Mesh,
    Texture,
}

/// What the host reports for a finished load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetPayload {
    /// The first mesh of a loaded model file.
    Mesh { handle: u32, bounding_radius: f32 },
    Texture { handle: u32, width: u32, height: u32 },
}

/// A load the host should perform. Serialized to JSON for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRequest {
    pub task: TaskId,
    pub kind: AssetKind,
    pub name: String,
    pub path: String,
}

pub type SuccessCallback = Box<dyn FnOnce(&AssetRequest, AssetPayload)>;
pub type ErrorCallback = Box<dyn FnOnce(&AssetRequest, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Queued,
    Requested,
}

struct AssetTask {
    request: AssetRequest,
    state: TaskState,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

#[derive(Default)]
pub struct AssetsManager {
    tasks: BTreeMap<TaskId, AssetTask>,
    outbox: Vec<AssetRequest>,
    next_task: u32,
    finished: u32,
}

impl AssetsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh_task(&mut self, name: impl Into<String>, path: impl Into<String>) -> TaskId {
        self.add_task(AssetKind::Mesh, name.into(), path.into())
    }

    pub fn add_texture_task(&mut self, name: impl Into<String>, path: impl Into<String>) -> TaskId {
        self.add_task(AssetKind::Texture, name.into(), path.into())
    }

    fn add_task(&mut self, kind: AssetKind, name: String, path: String) -> TaskId {
        let task = TaskId(self.next_task);
        self.next_task += 1;
        self.tasks.insert(task, AssetTask {
            request: AssetRequest { task, kind, name, path },
            state: TaskState::Queued,
            on_success: None,
            on_error: None,
        });
        task
    }

    pub fn on_success(
        &mut self,
        task: TaskId,
        callback: impl FnOnce(&AssetRequest, AssetPayload) + 'static,
    ) -> AssetResult<()> {
        self.task_mut(task)?.on_success = Some(Box::new(callback));
        Ok(())
    }

    pub fn on_error(
        &mut self,
        task: TaskId,
        callback: impl FnOnce(&AssetRequest, String) + 'static,
    ) -> AssetResult<()> {
        self.task_mut(task)?.on_error = Some(Box::new(callback));
        Ok(())
    }

    fn task_mut(&mut self, task: TaskId) -> AssetResult<&mut AssetTask> {
        if task.0 >= self.next_task {
            return Err(AssetError::UnknownTask(task));
        }
        self.tasks.get_mut(&task).ok_or(AssetError::AlreadyCompleted(task))
    }

    /// Hand every queued task to the host. Returns how many were newly requested.
    pub fn load(&mut self) -> usize {
        let mut count = 0;
        for task in self.tasks.values_mut() {
            if task.state == TaskState::Queued {
                task.state = TaskState::Requested;
                self.outbox.push(task.request.clone());
                count += 1;
            }
        }
        count
    }

    /// Requests issued since the last call, for the host to fetch.
    pub fn take_requests(&mut self) -> Vec<AssetRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Report the outcome of a task. Fires the matching callback and retires the task.
    pub fn complete(&mut self, task: TaskId, result: Result<AssetPayload, String>) -> AssetResult<()> {
        if task.0 >= self.next_task {
            return Err(AssetError::UnknownTask(task));
        }
        let entry = self.tasks.remove(&task).ok_or(AssetError::AlreadyCompleted(task))?;
        self.finished += 1;

        match result {
            Ok(payload) => {
                if let Some(cb) = entry.on_success {
                    cb(&entry.request, payload);
                }
            }
            Err(message) => {
                if let Some(cb) = entry.on_error {
                    cb(&entry.request, message);
                }
            }
        }
        Ok(())
    }

    pub fn request(&self, task: TaskId) -> Option<&AssetRequest> {
        self.tasks.get(&task).map(|t| &t.request)
    }

    /// Tasks registered or requested but not yet answered.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn finished_count(&self) -> u32 {
        self.finished
    }

    /// Drop every outstanding task. Their callbacks are dropped unfired.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.outbox.clear();
    }
}

impl std::fmt::Debug for AssetsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetsManager")
            .field("pending", &self.tasks.len())
            .field("outbox", &self.outbox.len())
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn load_moves_queued_tasks_to_outbox_once() {
        let mut mgr = AssetsManager::new();
        mgr.add_mesh_task("Mars", "assets/solarsystem/mars.glb");
        mgr.add_texture_task("sky", "assets/textures/Skybox/space_skydome.jpg");

        assert_eq!(mgr.load(), 2);
        assert_eq!(mgr.load(), 0);
        let requests = mgr.take_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, AssetKind::Mesh);
        assert_eq!(requests[1].path, "assets/textures/Skybox/space_skydome.jpg");
        assert!(mgr.take_requests().is_empty());
    }

    #[test]
    fn complete_fires_exactly_one_callback() {
        let mut mgr = AssetsManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let task = mgr.add_mesh_task("Earth", "assets/solarsystem/earth.glb");

        let ok_log = Rc::clone(&log);
        mgr.on_success(task, move |req, _| ok_log.borrow_mut().push(format!("ok {}", req.name)))
            .unwrap();
        let err_log = Rc::clone(&log);
        mgr.on_error(task, move |req, msg| err_log.borrow_mut().push(format!("err {} {msg}", req.name)))
            .unwrap();

        mgr.load();
        mgr.complete(task, Ok(AssetPayload::Mesh { handle: 3, bounding_radius: 1.0 }))
            .unwrap();
        assert_eq!(*log.borrow(), vec!["ok Earth".to_string()]);

        let again = mgr.complete(task, Err("late".into()));
        assert_eq!(again, Err(AssetError::AlreadyCompleted(task)));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(mgr.finished_count(), 1);
    }

    #[test]
    fn error_result_reaches_error_callback() {
        let mut mgr = AssetsManager::new();
        let seen = Rc::new(RefCell::new(None));
        let task = mgr.add_mesh_task("Pluto", "assets/solarsystem/pluto.glb");
        let sink = Rc::clone(&seen);
        mgr.on_error(task, move |_, msg| *sink.borrow_mut() = Some(msg)).unwrap();

        mgr.complete(task, Err("404".into())).unwrap();
        assert_eq!(seen.borrow().as_deref(), Some("404"));
        assert_eq!(mgr.pending_count(), 0);
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut mgr = AssetsManager::new();
        assert_eq!(
            mgr.complete(TaskId(9), Err("x".into())),
            Err(AssetError::UnknownTask(TaskId(9)))
        );
        assert!(mgr.on_success(TaskId(0), |_, _| {}).is_err());
    }

    #[test]
    fn requests_serialize_for_the_host() {
        let mut mgr = AssetsManager::new();
        mgr.add_mesh_task("Moon", "assets/solarsystem/moon.glb");
        mgr.load();
        let json = serde_json::to_string(&mgr.take_requests()).unwrap();
        assert_eq!(
            json,
            r#"[{"task":0,"kind":"mesh","name":"Moon","path":"assets/solarsystem/moon.glb"}]"#
        );
    }
}
