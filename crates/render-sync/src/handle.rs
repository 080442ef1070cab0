//! Explicit attachment state between the bridge and a renderer instance.
//!
//! The host owns the renderer (`Rc<RefCell<R>>`); the bridge only keeps a
//! weak reference to it. A renderer torn down by the host therefore reads as
//! unattached without the bridge having to observe the teardown. The camera
//! and tile layer are held strongly once resolved, but are only handed out
//! while the renderer itself is alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::port::WorldRenderer;

/// Attachment state of the bridge.
pub enum Attachment<R: WorldRenderer> {
    /// No renderer yet, or the host detached it.
    Unattached,
    /// A renderer has signalled readiness.
    Attached(AttachedRenderer<R>),
}

/// References captured when a renderer attaches.
pub struct AttachedRenderer<R: WorldRenderer> {
    renderer: Weak<RefCell<R>>,
    sub_objects: Option<SubObjects<R>>,
}

/// Camera and tile layer as resolved from the renderer.
struct SubObjects<R: WorldRenderer> {
    camera: Option<Rc<R::Camera>>,
    tile_layer: Option<Rc<R::TileLayer>>,
}

impl<R: WorldRenderer> SubObjects<R> {
    fn resolve(engine: &R) -> Self {
        Self {
            camera: engine.camera(),
            tile_layer: engine.tile_layer(),
        }
    }
}

impl<R: WorldRenderer> AttachedRenderer<R> {
    fn is_alive(&self) -> bool {
        self.renderer.strong_count() > 0
    }

    fn live_sub_objects(&self) -> Option<&SubObjects<R>> {
        if !self.is_alive() {
            return None;
        }
        self.sub_objects.as_ref()
    }
}

impl<R: WorldRenderer> Attachment<R> {
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(attached) if attached.is_alive())
    }
}

impl<R: WorldRenderer> fmt::Debug for Attachment<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unattached => f.write_str("Unattached"),
            Self::Attached(attached) => f
                .debug_struct("Attached")
                .field("alive", &attached.is_alive())
                .field("resolved", &attached.sub_objects.is_some())
                .field(
                    "camera",
                    &attached.sub_objects.as_ref().is_some_and(|s| s.camera.is_some()),
                )
                .field(
                    "tile_layer",
                    &attached.sub_objects.as_ref().is_some_and(|s| s.tile_layer.is_some()),
                )
                .finish(),
        }
    }
}

/// Nullable, non-owning reference cell for the current renderer.
pub struct RendererHandle<R: WorldRenderer> {
    attachment: Attachment<R>,
}

impl<R: WorldRenderer> RendererHandle<R> {
    pub fn new() -> Self {
        Self {
            attachment: Attachment::Unattached,
        }
    }

    /// Stores a weak reference to `renderer`, replacing any previous one.
    ///
    /// The camera and tile layer are resolved here, once, and cached. If the
    /// renderer is borrowed elsewhere at this point, resolution happens on
    /// the first successful [`with_renderer`](Self::with_renderer) instead.
    pub fn attach(&mut self, renderer: &Rc<RefCell<R>>) {
        let sub_objects = match renderer.try_borrow() {
            Ok(engine) => Some(SubObjects::<R>::resolve(&engine)),
            Err(_) => {
                tracing::warn!("renderer busy during attach; camera and tile layer deferred");
                None
            }
        };

        if let Some(resolved) = &sub_objects {
            tracing::debug!(
                camera = resolved.camera.is_some(),
                tile_layer = resolved.tile_layer.is_some(),
                "renderer attached"
            );
        }

        self.attachment = Attachment::Attached(AttachedRenderer {
            renderer: Rc::downgrade(renderer),
            sub_objects,
        });
    }

    pub fn detach(&mut self) {
        if matches!(self.attachment, Attachment::Attached(_)) {
            tracing::debug!("renderer detached");
        }
        self.attachment = Attachment::Unattached;
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    pub fn attachment(&self) -> &Attachment<R> {
        &self.attachment
    }

    /// The attached renderer, if it is still alive.
    pub fn current(&self) -> Option<Rc<RefCell<R>>> {
        match &self.attachment {
            Attachment::Attached(attached) => attached.renderer.upgrade(),
            Attachment::Unattached => None,
        }
    }

    /// Camera cached at attach time.
    pub fn camera(&self) -> Option<Rc<R::Camera>> {
        match &self.attachment {
            Attachment::Attached(attached) => attached.live_sub_objects()?.camera.clone(),
            Attachment::Unattached => None,
        }
    }

    /// Tile layer cached at attach time.
    pub fn tile_layer(&self) -> Option<Rc<R::TileLayer>> {
        match &self.attachment {
            Attachment::Attached(attached) => attached.live_sub_objects()?.tile_layer.clone(),
            Attachment::Unattached => None,
        }
    }

    /// Runs `mutate` against the renderer.
    ///
    /// Returns `None` without calling `mutate` when no live renderer is
    /// attached or when the renderer is currently borrowed by another path.
    pub fn with_renderer<T>(&mut self, mutate: impl FnOnce(&mut R) -> T) -> Option<T> {
        let Attachment::Attached(attached) = &mut self.attachment else {
            return None;
        };
        let renderer = attached.renderer.upgrade()?;
        let Ok(mut engine) = renderer.try_borrow_mut() else {
            tracing::debug!("renderer busy; mutation deferred");
            return None;
        };

        if attached.sub_objects.is_none() {
            let resolved = SubObjects::<R>::resolve(&engine);
            tracing::debug!(
                camera = resolved.camera.is_some(),
                tile_layer = resolved.tile_layer.is_some(),
                "renderer sub-objects resolved"
            );
            attached.sub_objects = Some(resolved);
        }

        Some(mutate(&mut engine))
    }
}

impl<R: WorldRenderer> Default for RendererHandle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WorldRenderer> fmt::Debug for RendererHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererHandle")
            .field("attachment", &self.attachment)
            .finish()
    }
}
