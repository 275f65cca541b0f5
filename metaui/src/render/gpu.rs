//! GPU renderer implementation using wgpu
//!
//! The frame's [`DrawList`] is tessellated on the CPU into a single
//! colored triangle list and drawn in one pass.

use std::sync::Arc;

use glam::Vec2;
use wgpu::*;

use crate::animation::Lerp;
use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Padding, Point, Rect};
use crate::error::{Error, Result};
use crate::render::{DrawList, Primitive};

/// Segments used to approximate each rounded corner
const CORNER_SEGMENTS: usize = 8;

/// Vertex for 2D rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,  // position
        1 => Float32x4,  // color
    ];

    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Triangle list in normalized device coordinates
#[derive(Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    width: f32,
    height: f32,
}

impl Mesh {
    /// Tessellate the shape primitives of `list` for a viewport of
    /// `size` physical pixels
    // TODO: text and image primitives need a glyph atlas and texture bind
    // group; they are skipped until that lands.
    pub fn from_draw_list(list: &DrawList, size: (u32, u32)) -> Self {
        let mut mesh = Mesh {
            width: size.0.max(1) as f32,
            height: size.1.max(1) as f32,
            ..Default::default()
        };
        for primitive in &list.primitives {
            match primitive {
                Primitive::Rect { rect, color } => {
                    mesh.quad(*rect, [*color; 4]);
                }
                Primitive::RoundedRect { rect, radius, color } => {
                    if radius.is_zero() {
                        mesh.quad(*rect, [*color; 4]);
                    } else {
                        let outline = rounded_outline(*rect, *radius);
                        mesh.fan(rect.center(), &outline, *color);
                    }
                }
                Primitive::Border { rect, radius, color, width } => {
                    let inner_rect = rect.inset(Padding::all(*width));
                    let inner_radius = CornerRadius::new(
                        (radius.top_left - width).max(0.0),
                        (radius.top_right - width).max(0.0),
                        (radius.bottom_right - width).max(0.0),
                        (radius.bottom_left - width).max(0.0),
                    );
                    let outer = rounded_outline(*rect, *radius);
                    let inner = rounded_outline(inner_rect, inner_radius);
                    mesh.strip(&outer, &inner, *color);
                }
                Primitive::Gradient { rect, start, end, angle } => {
                    let colors = gradient_corners(*rect, *start, *end, *angle);
                    mesh.quad(*rect, colors);
                }
                Primitive::Text { .. } | Primitive::Image { .. } => {}
            }
        }
        mesh
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn vertex(&self, p: Point, color: Color) -> Vertex {
        Vertex {
            position: [(p.x / self.width) * 2.0 - 1.0, 1.0 - (p.y / self.height) * 2.0],
            color: color.to_array(),
        }
    }

    /// Corner colors in order top-left, top-right, bottom-right, bottom-left
    fn quad(&mut self, rect: Rect, colors: [Color; 4]) {
        let base = self.vertices.len() as u32;
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
            Point::new(rect.x, rect.y + rect.height),
        ];
        for (p, c) in corners.into_iter().zip(colors) {
            let v = self.vertex(p, c);
            self.vertices.push(v);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn fan(&mut self, center: Point, outline: &[Point], color: Color) {
        let base = self.vertices.len() as u32;
        let v = self.vertex(center, color);
        self.vertices.push(v);
        for p in outline {
            let v = self.vertex(*p, color);
            self.vertices.push(v);
        }
        let n = outline.len() as u32;
        for i in 0..n {
            self.indices.extend_from_slice(&[base, base + 1 + i, base + 1 + (i + 1) % n]);
        }
    }

    /// Ring between two outlines with the same point count
    fn strip(&mut self, outer: &[Point], inner: &[Point], color: Color) {
        let base = self.vertices.len() as u32;
        for (o, i) in outer.iter().zip(inner) {
            let vo = self.vertex(*o, color);
            let vi = self.vertex(*i, color);
            self.vertices.push(vo);
            self.vertices.push(vi);
        }
        let n = outer.len().min(inner.len()) as u32;
        for k in 0..n {
            let o0 = base + 2 * k;
            let i0 = o0 + 1;
            let o1 = base + 2 * ((k + 1) % n);
            let i1 = o1 + 1;
            self.indices.extend_from_slice(&[o0, o1, i1, o0, i1, i0]);
        }
    }
}

/// Clockwise outline starting at the left end of the top-left corner.
/// Every corner contributes `CORNER_SEGMENTS + 1` points, radius zero
/// included, so two outlines can be stitched point by point.
fn rounded_outline(rect: Rect, radius: CornerRadius) -> Vec<Point> {
    let max = rect.width.min(rect.height) / 2.0;
    let clamp = |r: f32| r.clamp(0.0, max.max(0.0));
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    let corners = [
        (clamp(radius.top_left), Point::new(rect.x, rect.y), 180.0f32),
        (clamp(radius.top_right), Point::new(right, rect.y), 270.0),
        (clamp(radius.bottom_right), Point::new(right, bottom), 0.0),
        (clamp(radius.bottom_left), Point::new(rect.x, bottom), 90.0),
    ];

    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (r, corner, start) in corners {
        // Arc center sits `r` inside the corner on both axes
        let cx = if corner.x > rect.x { corner.x - r } else { corner.x + r };
        let cy = if corner.y > rect.y { corner.y - r } else { corner.y + r };
        for s in 0..=CORNER_SEGMENTS {
            let a = (start + 90.0 * s as f32 / CORNER_SEGMENTS as f32).to_radians();
            points.push(Point::new(cx + r * a.cos(), cy + r * a.sin()));
        }
    }
    points
}

/// Corner colors for a linear gradient. `angle` is in degrees, 0 runs left
/// to right and 90 top to bottom.
fn gradient_corners(rect: Rect, start: Color, end: Color, angle: f32) -> [Color; 4] {
    let (sin, cos) = angle.to_radians().sin_cos();
    let dir = Vec2::new(cos, sin);
    let half = (rect.width * cos.abs() + rect.height * sin.abs()) / 2.0;
    let center = Vec2::from(rect.center());
    let at = |x: f32, y: f32| {
        let t = if half > 0.0 {
            (Vec2::new(x, y) - center).dot(dir) / half
        } else {
            0.0
        };
        start.lerp(end, ((t + 1.0) / 2.0).clamp(0.0, 1.0))
    };
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    [at(rect.x, rect.y), at(right, rect.y), at(right, bottom), at(rect.x, bottom)]
}

/// GPU state and resources
pub struct GpuRenderer {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub pipeline: RenderPipeline,
    pub vertex_buffer: Buffer,
    pub index_buffer: Buffer,
    pub size: (u32, u32),
    pub clear_color: Color,
}

impl GpuRenderer {
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = Instance::new(InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(Error::NoAdapter)?;
        tracing::info!(adapter = ?adapter.get_info().name, "using GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    label: Some("MetaUI Device"),
                    required_features: Features::empty(),
                    required_limits: Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Colors are already in display space, so prefer a linear format
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(Error::NoAdapter)?;

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("MetaUI Shader"),
            source: ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("MetaUI Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("MetaUI Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: config.format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = create_buffer(&device, "Vertex Buffer", 1024 * 1024, BufferUsages::VERTEX);
        let index_buffer = create_buffer(&device, "Index Buffer", 256 * 1024, BufferUsages::INDEX);

        tracing::info!(width = config.width, height = config.height, format = ?config.format, "GPU renderer ready");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            index_buffer,
            size: (size.width, size.height),
            clear_color: Color::rgb(18, 18, 18),
        })
    }

    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 > 0 && new_size.1 > 0 {
            self.size = new_size;
            self.config.width = new_size.0;
            self.config.height = new_size.1;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, list: &DrawList) -> std::result::Result<(), SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&TextureViewDescriptor::default());

        let mesh = Mesh::from_draw_list(list, self.size);
        if !mesh.is_empty() {
            let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
            let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);
            self.reserve(vertex_bytes.len() as u64, index_bytes.len() as u64);
            self.queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
            self.queue.write_buffer(&self.index_buffer, 0, index_bytes);
        }

        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color {
                            r: self.clear_color.r as f64,
                            g: self.clear_color.g as f64,
                            b: self.clear_color.b as f64,
                            a: self.clear_color.a as f64,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !mesh.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Grow the vertex and index buffers to hold at least the given sizes
    fn reserve(&mut self, vertex_bytes: u64, index_bytes: u64) {
        if vertex_bytes > self.vertex_buffer.size() {
            let size = vertex_bytes.next_power_of_two();
            tracing::debug!(size, "growing vertex buffer");
            self.vertex_buffer = create_buffer(&self.device, "Vertex Buffer", size, BufferUsages::VERTEX);
        }
        if index_bytes > self.index_buffer.size() {
            let size = index_bytes.next_power_of_two();
            tracing::debug!(size, "growing index buffer");
            self.index_buffer = create_buffer(&self.device, "Index Buffer", size, BufferUsages::INDEX);
        }
    }
}

fn create_buffer(device: &Device, label: &str, size: u64, usage: BufferUsages) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(primitives: Vec<Primitive>) -> DrawList {
        DrawList { primitives }
    }

    #[test]
    fn test_rect_maps_to_ndc_quad() {
        let mesh = Mesh::from_draw_list(
            &list(vec![Primitive::Rect {
                rect: Rect::new(0.0, 0.0, 50.0, 100.0),
                color: Color::WHITE,
            }]),
            (100, 100),
        );
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[0].position, [-1.0, 1.0]);
        assert_eq!(mesh.vertices[2].position, [0.0, -1.0]);
    }

    #[test]
    fn test_rounded_rect_is_a_fan() {
        let mesh = Mesh::from_draw_list(
            &list(vec![Primitive::RoundedRect {
                rect: Rect::new(10.0, 10.0, 40.0, 20.0),
                radius: CornerRadius::all(4.0),
                color: Color::BLACK,
            }]),
            (100, 100),
        );
        let ring = 4 * (CORNER_SEGMENTS + 1);
        assert_eq!(mesh.vertices.len(), 1 + ring);
        assert_eq!(mesh.indices.len(), 3 * ring);
    }

    #[test]
    fn test_outline_stays_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 30.0, 10.0);
        // Radius larger than half the height is clamped
        for p in rounded_outline(rect, CornerRadius::all(50.0)) {
            assert!(p.x >= -1e-4 && p.x <= 30.0 + 1e-4, "{p:?}");
            assert!(p.y >= -1e-4 && p.y <= 10.0 + 1e-4, "{p:?}");
        }
    }

    #[test]
    fn test_border_is_a_ring() {
        let mesh = Mesh::from_draw_list(
            &list(vec![Primitive::Border {
                rect: Rect::new(0.0, 0.0, 40.0, 40.0),
                radius: CornerRadius::all(6.0),
                color: Color::WHITE,
                width: 2.0,
            }]),
            (100, 100),
        );
        let ring = 4 * (CORNER_SEGMENTS + 1);
        assert_eq!(mesh.vertices.len(), 2 * ring);
        assert_eq!(mesh.indices.len(), 6 * ring);
    }

    #[test]
    fn test_vertical_gradient_corners() {
        let colors = gradient_corners(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK, Color::WHITE, 90.0);
        assert!(colors[0].r < 1e-4 && colors[1].r < 1e-4);
        assert!((colors[2].r - 1.0).abs() < 1e-4 && (colors[3].r - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_text_and_images_are_skipped() {
        let mesh = Mesh::from_draw_list(
            &list(vec![Primitive::Text {
                position: Point::ZERO,
                text: "hi".into(),
                font: crate::render::FontHandle(0),
                size: 14.0,
                color: Color::WHITE,
            }]),
            (100, 100),
        );
        assert!(mesh.is_empty());
    }
}
