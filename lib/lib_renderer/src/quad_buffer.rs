use lib_gpu::{Buffer, BufferDescriptor, BufferSlice, BufferUsages};

use crate::{Quad, RendererContext};

/// Instance buffer for one pass worth of quads. Grows, never shrinks.
#[derive(Debug)]
pub(crate) struct QuadBuffer {
    buf: Buffer,
    cap: usize,
}

impl QuadBuffer {
    pub fn new(cap: usize, ctx: RendererContext<'_>) -> Self {
        let cap = cap.max(1);

        Self {
            buf: ctx.device.create_buffer(&BufferDescriptor {
                label: Some("renderer quad buffer"),
                size: (cap * size_of::<Quad>()) as u64,
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            cap,
        }
    }

    pub fn write(&mut self, quads: &[Quad], ctx: RendererContext<'_>) {
        if quads.len() > self.cap {
            tracing::debug!(
                old_cap = self.cap,
                new_cap = quads.len().next_power_of_two(),
                "growing quad buffer"
            );

            *self = Self::new(quads.len().next_power_of_two(), ctx);
        }

        if !quads.is_empty() {
            ctx.queue
                .write_buffer(&self.buf, 0, bytemuck::cast_slice(quads));
        }
    }

    pub fn slice(&self, len: usize) -> BufferSlice<'_> {
        self.buf.slice(..(len * size_of::<Quad>()) as u64)
    }
}
