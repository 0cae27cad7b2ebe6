//! Scene objects and the host-owned registry.
//!
//! The host's scene traversal drives renderables through an explicit
//! interface: draw with the current render pass, update with the elapsed
//! time, reset on scene restart. Destruction is ordinary `Drop`, which is
//! where GPU resources are released. There is no process-global
//! registration state; the host owns a [`SceneRegistry`] and everything
//! registered in it.

use instant::Duration;

use crate::context::Context;

/// Trait for objects the host scene can draw.
///
/// # Lifecycle
///
/// 1. The object is constructed with everything it owns (meshes, textures)
/// 2. `on_draw()` is called once per frame from the host's render callback
/// 3. `on_update()` is called once per frame with the elapsed time
/// 4. `on_reset()` is called when the host restarts its scene
/// 5. Dropping the object releases its GPU resources
///
/// All hooks run on the thread that owns the graphics context; nothing here
/// suspends or blocks.
pub trait SceneObject {
    /// Record this object's draws into the host's render pass.
    ///
    /// A returned error means this frame's draw was abandoned; the host's
    /// normal redraw cycle retries naturally on the next frame.
    fn on_draw(&mut self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>)
    -> anyhow::Result<()>;

    /// Per-frame update hook with the elapsed time since the last frame.
    fn on_update(&mut self, ctx: &Context, dt: Duration);

    /// Reset transient state when the host restarts the scene.
    fn on_reset(&mut self, ctx: &Context);
}

/// Host-owned registry of scene objects.
///
/// Objects are stored in registration order under monotonically increasing
/// ids; traversal helpers visit them in that order. Removing an object
/// drops it, which releases its GPU resources.
#[derive(Default)]
pub struct SceneRegistry {
    objects: Vec<(u32, Box<dyn SceneObject>)>,
    next_id: u32,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Register an object and return its id.
    pub fn register(&mut self, object: Box<dyn SceneObject>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Remove and return an object; dropping the returned box destroys it.
    pub fn remove(&mut self, id: u32) -> Option<Box<dyn SceneObject>> {
        let idx = self.objects.iter().position(|(oid, _)| *oid == id)?;
        Some(self.objects.remove(idx).1)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut (dyn SceneObject + 'static)> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object.as_mut())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> Vec<u32> {
        self.objects.iter().map(|(id, _)| *id).collect()
    }

    /// Draw every object in registration order. The first error aborts the
    /// traversal and propagates; earlier objects stay drawn.
    pub fn draw_all(
        &mut self,
        ctx: &Context,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) -> anyhow::Result<()> {
        for (_, object) in self.objects.iter_mut() {
            object.on_draw(ctx, render_pass)?;
        }
        Ok(())
    }

    pub fn update_all(&mut self, ctx: &Context, dt: Duration) {
        for (_, object) in self.objects.iter_mut() {
            object.on_update(ctx, dt);
        }
    }

    pub fn reset_all(&mut self, ctx: &Context) {
        for (_, object) in self.objects.iter_mut() {
            object.on_reset(ctx);
        }
    }
}
