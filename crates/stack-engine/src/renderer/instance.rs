use bytemuck::{Pod, Zeroable};

/// Per-rect render data read by the host page's canvas drawer.
/// Must match the page protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Rect centre in world space.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in radians around the centre.
    pub rotation: f32,
    /// Fill color, 0–255 per channel.
    pub fill_r: f32,
    pub fill_g: f32,
    pub fill_b: f32,
    /// Stroke width; 0.0 means no outline.
    pub outline_width: f32,
    pub outline_r: f32,
    pub outline_g: f32,
    pub outline_b: f32,
}

impl RectInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Rect instances for one frame, in scene (draw) order.
pub struct RenderBuffer {
    pub instances: Vec<RectInstance>,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RectInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}
