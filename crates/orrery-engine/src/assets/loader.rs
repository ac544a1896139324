//! Awaitable wrappers over [`AssetsManager`] callbacks.
//!
//! Each call registers its task(s) right away and returns a `'static` future
//! that only holds the receiving end of a oneshot channel, so the manager can
//! keep being borrowed by the engine while loads are in flight.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::assets::manager::{AssetPayload, AssetsManager, TaskId};
use crate::components::mesh::ModelHandle;
use crate::error::{AssetError, AssetResult};

/// A loaded model, renamed to the name it was requested under.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    pub name: String,
    pub path: String,
    pub handle: ModelHandle,
    /// Local-space radius of the model, reported by the host.
    pub bounding_radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    pub name: String,
    pub path: String,
    pub handle: u32,
    pub width: u32,
    pub height: u32,
}

type Delivery = Result<AssetPayload, AssetError>;

/// Loads assets through an [`AssetsManager`] and yields futures.
pub struct AssetLoader<'a> {
    manager: &'a mut AssetsManager,
}

impl<'a> AssetLoader<'a> {
    pub fn new(manager: &'a mut AssetsManager) -> Self {
        Self { manager }
    }

    /// Load one model file and rename its first mesh to `name`.
    pub fn load_mesh(&mut self, path: &str, name: &str) -> LocalBoxFuture<'static, AssetResult<MeshAsset>> {
        let fut = self.queue_mesh(path, name);
        self.manager.load();
        fut
    }

    /// Load a texture and name it `name`.
    pub fn load_texture(
        &mut self,
        path: &str,
        name: &str,
    ) -> LocalBoxFuture<'static, AssetResult<TextureAsset>> {
        let fut = self.queue_texture(path, name);
        self.manager.load();
        fut
    }

    /// Load several model files at once. Resolves when all succeed, in input
    /// order, or with the first failure.
    pub fn load_meshes(
        &mut self,
        paths: &[&str],
        names: &[&str],
    ) -> LocalBoxFuture<'static, AssetResult<Vec<MeshAsset>>> {
        if paths.len() != names.len() {
            let err = AssetError::NameCountMismatch { expected: paths.len(), got: names.len() };
            return future::ready(Err(err)).boxed_local();
        }
        let loads: Vec<_> = paths
            .iter()
            .zip(names)
            .map(|(path, name)| self.queue_mesh(path, name))
            .collect();
        self.manager.load();
        future::try_join_all(loads).boxed_local()
    }

    /// Texture counterpart of [`AssetLoader::load_meshes`].
    pub fn load_textures(
        &mut self,
        paths: &[&str],
        names: &[&str],
    ) -> LocalBoxFuture<'static, AssetResult<Vec<TextureAsset>>> {
        if paths.len() != names.len() {
            let err = AssetError::NameCountMismatch { expected: paths.len(), got: names.len() };
            return future::ready(Err(err)).boxed_local();
        }
        let loads: Vec<_> = paths
            .iter()
            .zip(names)
            .map(|(path, name)| self.queue_texture(path, name))
            .collect();
        self.manager.load();
        future::try_join_all(loads).boxed_local()
    }

    fn queue_texture(&mut self, path: &str, name: &str) -> LocalBoxFuture<'static, AssetResult<TextureAsset>> {
        let task = self.manager.add_texture_task(name, path);
        let rx = self.wire(task, path);

        let (path, name) = (path.to_string(), name.to_string());
        async move {
            match deliver(rx, &path).await? {
                AssetPayload::Texture { handle, width, height } => Ok(TextureAsset {
                    name,
                    path,
                    handle,
                    width,
                    height,
                }),
                AssetPayload::Mesh { .. } => Err(AssetError::WrongKind(path)),
            }
        }
        .boxed_local()
    }

    fn queue_mesh(&mut self, path: &str, name: &str) -> LocalBoxFuture<'static, AssetResult<MeshAsset>> {
        let task = self.manager.add_mesh_task(name, path);
        let rx = self.wire(task, path);

        let (path, name) = (path.to_string(), name.to_string());
        async move {
            match deliver(rx, &path).await? {
                AssetPayload::Mesh { handle, bounding_radius } => Ok(MeshAsset {
                    name,
                    path,
                    handle: ModelHandle(handle),
                    bounding_radius,
                }),
                AssetPayload::Texture { .. } => Err(AssetError::WrongKind(path)),
            }
        }
        .boxed_local()
    }

    /// Route both callbacks of `task` into one oneshot channel.
    fn wire(&mut self, task: TaskId, path: &str) -> oneshot::Receiver<Delivery> {
        let (tx, rx) = oneshot::channel::<Delivery>();
        // Only one of the two callbacks ever runs; they share the sender.
        let slot = std::rc::Rc::new(std::cell::Cell::new(Some(tx)));
        let err_slot = std::rc::Rc::clone(&slot);

        let registered = self
            .manager
            .on_success(task, move |req, payload| {
                log::info!("loaded {} as {}", req.path, req.name);
                if let Some(tx) = slot.take() {
                    let _ = tx.send(Ok(payload));
                }
            })
            .and_then(|_| {
                self.manager.on_error(task, move |req, reason| {
                    log::warn!("failed to load {}: {}", req.path, reason);
                    if let Some(tx) = err_slot.take() {
                        let _ = tx.send(Err(AssetError::LoadFailed { path: req.path.clone(), reason }));
                    }
                })
            });
        if let Err(err) = registered {
            log::error!("could not register callbacks for {path}: {err}");
        }
        rx
    }
}

async fn deliver(rx: oneshot::Receiver<Delivery>, path: &str) -> AssetResult<AssetPayload> {
    match rx.await {
        Ok(delivery) => delivery,
        Err(oneshot::Canceled) => Err(AssetError::Cancelled(path.to_string())),
    }
}

/// Poll a future once without an executor.
/// Used by games that check loading progress from their update tick.
pub fn poll_now<F: Future + Unpin + ?Sized>(fut: &mut F) -> Poll<F::Output> {
    let mut cx = Context::from_waker(futures::task::noop_waker_ref());
    Pin::new(fut).poll(&mut cx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manager::AssetKind;

    fn mesh(handle: u32) -> Result<AssetPayload, String> {
        Ok(AssetPayload::Mesh { handle, bounding_radius: 0.5 })
    }

    #[test]
    fn load_mesh_resolves_with_requested_name() {
        let mut mgr = AssetsManager::new();
        let mut fut = AssetLoader::new(&mut mgr).load_mesh("assets/solarsystem/mars.glb", "Mars");

        assert!(poll_now(&mut fut).is_pending());
        let req = mgr.take_requests().remove(0);
        assert_eq!(req.kind, AssetKind::Mesh);
        mgr.complete(req.task, mesh(11)).unwrap();

        let asset = futures::executor::block_on(fut).unwrap();
        assert_eq!(asset.name, "Mars");
        assert_eq!(asset.handle, ModelHandle(11));
        assert_eq!(asset.path, "assets/solarsystem/mars.glb");
    }

    #[test]
    fn load_mesh_failure_carries_reason() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_mesh("missing.glb", "Missing");
        let req = mgr.take_requests().remove(0);
        mgr.complete(req.task, Err("404 Not Found".into())).unwrap();

        let err = futures::executor::block_on(fut).unwrap_err();
        assert_eq!(
            err,
            AssetError::LoadFailed { path: "missing.glb".into(), reason: "404 Not Found".into() }
        );
    }

    #[test]
    fn load_texture_resolves() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_texture("sky.jpg", "sky");
        let req = mgr.take_requests().remove(0);
        assert_eq!(req.kind, AssetKind::Texture);
        mgr.complete(req.task, Ok(AssetPayload::Texture { handle: 2, width: 64, height: 32 }))
            .unwrap();
        let tex = futures::executor::block_on(fut).unwrap();
        assert_eq!((tex.name.as_str(), tex.width, tex.height), ("sky", 64, 32));
    }

    #[test]
    fn load_textures_waits_for_all_and_keeps_order() {
        let mut mgr = AssetsManager::new();
        let mut fut = AssetLoader::new(&mut mgr).load_textures(
            &["assets/textures/planets/mercury.jpg", "assets/textures/planets/venus.jpg"],
            &["Mercury", "Venus"],
        );
        let requests = mgr.take_requests();
        assert!(requests.iter().all(|r| r.kind == AssetKind::Texture));

        mgr.complete(requests[1].task, Ok(AssetPayload::Texture { handle: 4, width: 8, height: 8 }))
            .unwrap();
        assert!(poll_now(&mut fut).is_pending());
        mgr.complete(requests[0].task, Ok(AssetPayload::Texture { handle: 3, width: 8, height: 8 }))
            .unwrap();

        let textures = futures::executor::block_on(fut).unwrap();
        let names: Vec<_> = textures.iter().map(|t| (t.name.as_str(), t.handle)).collect();
        assert_eq!(names, vec![("Mercury", 3), ("Venus", 4)]);
    }

    #[test]
    fn no_textures_resolve_at_once() {
        let mut mgr = AssetsManager::new();
        let mut fut = AssetLoader::new(&mut mgr).load_textures(&[], &[]);
        assert!(matches!(poll_now(&mut fut), Poll::Ready(Ok(ref t)) if t.is_empty()));
    }

    #[test]
    fn load_meshes_preserves_input_order() {
        let mut mgr = AssetsManager::new();
        let mut fut = AssetLoader::new(&mut mgr).load_meshes(
            &["mercury.glb", "venus.glb", "earth.glb"],
            &["Mercury", "Venus", "Earth"],
        );
        let requests = mgr.take_requests();
        assert_eq!(requests.len(), 3);

        // Host answers out of order.
        mgr.complete(requests[2].task, mesh(30)).unwrap();
        assert!(poll_now(&mut fut).is_pending());
        mgr.complete(requests[0].task, mesh(10)).unwrap();
        mgr.complete(requests[1].task, mesh(20)).unwrap();

        let names: Vec<_> = match poll_now(&mut fut) {
            Poll::Ready(Ok(assets)) => assets.into_iter().map(|a| (a.name, a.handle.0)).collect(),
            other => panic!("expected loaded meshes, got {other:?}"),
        };
        assert_eq!(
            names,
            vec![("Mercury".into(), 10), ("Venus".into(), 20), ("Earth".into(), 30)]
        );
    }

    #[test]
    fn load_meshes_fails_if_any_fails() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_meshes(&["a.glb", "b.glb"], &["A", "B"]);
        let requests = mgr.take_requests();
        mgr.complete(requests[1].task, Err("corrupt".into())).unwrap();
        assert!(futures::executor::block_on(fut).is_err());
    }

    #[test]
    fn load_meshes_rejects_mismatched_names() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_meshes(&["a.glb", "b.glb"], &["A"]);
        assert_eq!(
            futures::executor::block_on(fut),
            Err(AssetError::NameCountMismatch { expected: 2, got: 1 })
        );
        assert_eq!(mgr.pending_count(), 0);
    }

    #[test]
    fn reset_cancels_in_flight_loads() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_mesh("lab.glb", "Lab");
        mgr.reset();
        assert_eq!(
            futures::executor::block_on(fut),
            Err(AssetError::Cancelled("lab.glb".into()))
        );
    }

    #[test]
    fn wrong_payload_kind_is_rejected() {
        let mut mgr = AssetsManager::new();
        let fut = AssetLoader::new(&mut mgr).load_mesh("x.glb", "X");
        let req = mgr.take_requests().remove(0);
        mgr.complete(req.task, Ok(AssetPayload::Texture { handle: 1, width: 1, height: 1 }))
            .unwrap();
        assert_eq!(futures::executor::block_on(fut), Err(AssetError::WrongKind("x.glb".into())));
    }
}
