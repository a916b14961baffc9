//! Polygon rasterization for curator-drawn subregion outlines.
//!
//! Outlines arrive as ordered integer pixel vertices. Rasterization uses
//! an even-odd scanline fill sampled at pixel centers, clipped to the
//! image bounds. Degenerate input (fewer than three vertices, zero area,
//! self-intersection) produces an empty or partial pixel set; it is never
//! an error here, since downstream feature extraction must tolerate it.

/// A polygon vertex in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of the vertices, clipped to `width` x `height`.
///
/// Returns `None` when the polygon lies entirely outside the image or the
/// vertex list is empty.
fn clipped_bounds(vertices: &[Vertex], width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
    let min_x = vertices.iter().map(|v| v.x).min()?.max(0);
    let max_x = vertices.iter().map(|v| v.x).max()?.min(width as i32 - 1);
    let min_y = vertices.iter().map(|v| v.y).min()?.max(0);
    let max_y = vertices.iter().map(|v| v.y).max()?.min(height as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x, max_x, min_y, max_y))
}

/// Compute the set of pixels enclosed by `vertices` within a
/// `width` x `height` image.
///
/// Pixels are tested at their centers with the even-odd rule, matching
/// the fill behaviour curators see in the annotation UI.
pub fn rasterize(vertices: &[Vertex], width: u32, height: u32) -> Vec<(u32, u32)> {
    if vertices.len() < 3 {
        return Vec::new();
    }
    let Some((min_x, max_x, min_y, max_y)) = clipped_bounds(vertices, width, height) else {
        return Vec::new();
    };

    let mut pixels = Vec::new();
    let mut crossings: Vec<f64> = Vec::with_capacity(vertices.len());

    for y in min_y..=max_y {
        let sample_y = y as f64 + 0.5;
        crossings.clear();

        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            // Half-open interval so a scanline through a shared vertex is
            // counted exactly once.
            if (ay <= sample_y && sample_y < by) || (by <= sample_y && sample_y < ay) {
                let t = (sample_y - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
            }
        }

        crossings.sort_by(|p, q| p.partial_cmp(q).expect("finite crossing"));

        for pair in crossings.chunks_exact(2) {
            let (start, end) = (pair[0], pair[1]);
            let from = (start - 0.5).ceil() as i32;
            let to = (end - 0.5).floor() as i32;
            for x in from.max(min_x)..=to.min(max_x) {
                pixels.push((x as u32, y as u32));
            }
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verts(points: &[(i32, i32)]) -> Vec<Vertex> {
        points.iter().map(|&(x, y)| Vertex::new(x, y)).collect()
    }

    #[test]
    fn axis_aligned_square_fills_interior() {
        let square = verts(&[(2, 2), (6, 2), (6, 6), (2, 6)]);
        let pixels = rasterize(&square, 10, 10);
        // 4x4 interior sampled at pixel centers.
        assert_eq!(pixels.len(), 16);
        assert!(pixels.contains(&(2, 2)));
        assert!(pixels.contains(&(5, 5)));
        assert!(!pixels.contains(&(6, 6)));
    }

    #[test]
    fn triangle_contains_centroid_only_inside() {
        let tri = verts(&[(0, 0), (8, 0), (0, 8)]);
        let pixels = rasterize(&tri, 10, 10);
        assert!(pixels.contains(&(1, 1)));
        assert!(!pixels.contains(&(7, 7)));
    }

    #[test]
    fn fewer_than_three_vertices_is_empty() {
        assert!(rasterize(&verts(&[(1, 1), (5, 5)]), 10, 10).is_empty());
        assert!(rasterize(&[], 10, 10).is_empty());
    }

    #[test]
    fn zero_area_polygon_is_empty() {
        // All vertices on a single horizontal line.
        let flat = verts(&[(1, 3), (5, 3), (8, 3)]);
        assert!(rasterize(&flat, 10, 10).is_empty());
    }

    #[test]
    fn polygon_outside_image_is_empty() {
        let square = verts(&[(20, 20), (30, 20), (30, 30), (20, 30)]);
        assert!(rasterize(&square, 10, 10).is_empty());
    }

    #[test]
    fn polygon_is_clipped_to_image_bounds() {
        let square = verts(&[(-5, -5), (4, -5), (4, 4), (-5, 4)]);
        let pixels = rasterize(&square, 10, 10);
        assert!(pixels.iter().all(|&(x, y)| x < 10 && y < 10));
        assert!(pixels.contains(&(0, 0)));
    }

    #[test]
    fn self_intersecting_polygon_does_not_panic() {
        // Bowtie: even-odd rule fills the two lobes.
        let bowtie = verts(&[(0, 0), (8, 8), (8, 0), (0, 8)]);
        let pixels = rasterize(&bowtie, 10, 10);
        assert!(!pixels.is_empty());
    }
}
