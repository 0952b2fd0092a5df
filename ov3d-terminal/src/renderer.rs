/// ASCII rasterizer over indexed mesh buffers
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use ov3d_core::{Camera, IndexedMesh, Mat4};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light direction in view space, pointing at the viewer
const LIGHT_DIR: [f32; 3] = [0.0, 0.0, 1.0];

/// Renders an [`IndexedMesh`] into a character grid with a depth buffer.
///
/// Walks the index buffer in triples, projects each referenced vertex once
/// per triangle, and Gouraud-shades the interior from the welded per-vertex
/// normals.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

/// One projected vertex: screen x/y, NDC depth, shading brightness.
#[derive(Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    brightness: f32,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_mesh(&mut self, mesh: &IndexedMesh, model_matrix: &Mat4, camera: &Camera) {
        // Normals transform by the inverse-transpose so shading stays correct
        // under non-uniform scale. Rotation-only models are always
        // invertible; a degenerate scale falls back to the model matrix.
        let normal_matrix = model_matrix.inverse_transpose().unwrap_or(*model_matrix);

        for triangle in 0..mesh.triangle_count() {
            let corners = mesh.triangle(triangle);
            self.render_triangle(mesh, corners, model_matrix, &normal_matrix, camera);
        }
    }

    fn render_triangle(
        &mut self,
        mesh: &IndexedMesh,
        corners: [u32; 3],
        model_matrix: &Mat4,
        normal_matrix: &Mat4,
        camera: &Camera,
    ) {
        let mut projected = [ScreenVertex {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            brightness: 0.0,
        }; 3];

        for (slot, &index) in projected.iter_mut().zip(corners.iter()) {
            let vertex = index as usize;
            let Some((x, y, depth)) = camera.project_to_screen(
                mesh.position(vertex),
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) else {
                return; // Triangle is clipped
            };

            *slot = ScreenVertex {
                x,
                y,
                depth,
                brightness: vertex_brightness(mesh.normal(vertex), normal_matrix),
            };
        }

        self.rasterize_triangle(&projected);
    }

    /// Scanline rasterization over the triangle's screen bounding box.
    fn rasterize_triangle(&mut self, v: &[ScreenVertex; 3]) {
        let min_x = (v[0].x.min(v[1].x).min(v[2].x).floor() as i32).max(0);
        let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v[0].y.min(v[1].y).min(v[2].y).floor() as i32).max(0);
        let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) = barycentric(v, (px, py)) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v[0].depth + w1 * v[1].depth + w2 * v[2].depth;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    let brightness =
                        w0 * v[0].brightness + w1 * v[1].brightness + w2 * v[2].brightness;
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = shade(brightness);
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn lit_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }
}

/// Diffuse brightness of one vertex normal under the fixed light.
fn vertex_brightness(normal: [f32; 3], normal_matrix: &Mat4) -> f32 {
    let n = normal_matrix.transform_direction(normal);
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len < 1e-6 {
        return 0.0;
    }
    let dot = (n[0] * LIGHT_DIR[0] + n[1] * LIGHT_DIR[1] + n[2] * LIGHT_DIR[2]) / len;
    dot.max(0.0)
}

fn shade(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32) as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Barycentric coordinates of a point within a screen triangle
fn barycentric(v: &[ScreenVertex; 3], p: (f32, f32)) -> Option<(f32, f32, f32)> {
    let (x0, y0) = (v[0].x, v[0].y);
    let (x1, y1) = (v[1].x, v[1].y);
    let (x2, y2) = (v[2].x, v[2].y);

    let denom = (y1 - y2) * (x0 - x2) + (x2 - x1) * (y0 - y2);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((y1 - y2) * (p.0 - x2) + (x2 - x1) * (p.1 - y2)) / denom;
    let w1 = ((y2 - y0) * (p.0 - x2) + (x0 - x2) * (p.1 - y2)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_rasterizes_some_cells() {
        let mut renderer = AsciiRenderer::new(80, 40);
        let camera = Camera::new(80, 40);
        renderer.render_mesh(&IndexedMesh::cube(2.0), &Mat4::IDENTITY, &camera);
        assert!(renderer.lit_cells() > 0);
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = Camera::new(40, 20);
        renderer.render_mesh(&IndexedMesh::cube(2.0), &Mat4::IDENTITY, &camera);
        renderer.clear();
        assert_eq!(renderer.lit_cells(), 0);
        assert!(renderer.depth_buffer.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_depth_test_keeps_nearer_surface() {
        // Two front-facing triangles covering the same screen area, the
        // second one closer to the camera and brighter-lit than the first.
        let mut mesh = IndexedMesh::new();
        for z in [0.0f32, 1.0] {
            let base = mesh.vertex_count() as u32;
            for (x, y) in [(-1.0f32, -1.0f32), (1.0, -1.0), (0.0, 1.0)] {
                mesh.positions.extend_from_slice(&[x, y, z]);
                // Far triangle lit at grazing angle, near one head-on
                let normal = if z == 0.0 {
                    [0.0, 0.96, 0.28]
                } else {
                    [0.0, 0.0, 1.0]
                };
                mesh.normals.extend_from_slice(&normal);
                mesh.tex_coords.extend_from_slice(&[0.0, 0.0]);
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        let mut renderer = AsciiRenderer::new(60, 30);
        let camera = Camera::new(60, 30);
        renderer.render_mesh(&mesh, &Mat4::IDENTITY, &camera);

        // The centroid pixel must come from the near, fully-lit triangle
        let (x, y, _) = camera
            .project_to_screen([0.0, -0.25, 1.0], &Mat4::IDENTITY, 60, 30)
            .unwrap();
        let idx = y as usize * 60 + x as usize;
        assert_eq!(renderer.char_buffer[idx], shade(1.0));
    }

    #[test]
    fn test_shade_covers_ramp_ends() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(2.0), '@');
    }
}
