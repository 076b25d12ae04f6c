use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape};

use crate::theme::{GradientStop, SelectionStyle, TimelinePalette};

/// Render context handed into the layer paint routines: the painter, the
/// resolved palette and selection style, and the frame metrics. Passing
/// this in keeps painting free of global reads.
pub struct PaintContext<'a> {
    pub painter: &'a Painter,
    pub palette: &'a TimelinePalette,
    pub selection: SelectionStyle,
    /// Width of one frame cell in points.
    pub frame_width: f32,
}

/// Three-level display mode for the visibility indicators in the label
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityMode {
    /// Only the selected layer gets a solid dot; the rest stay hollow.
    CurrentOnly,
    /// Every visible layer shows a dimmed dot.
    #[default]
    DimAll,
    /// Every visible layer shows a solid dot.
    SolidAll,
}

impl VisibilityMode {
    pub fn cycle(self) -> Self {
        match self {
            VisibilityMode::CurrentOnly => VisibilityMode::DimAll,
            VisibilityMode::DimAll => VisibilityMode::SolidAll,
            VisibilityMode::SolidAll => VisibilityMode::CurrentOnly,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            VisibilityMode::CurrentOnly => "○",
            VisibilityMode::DimAll => "◐",
            VisibilityMode::SolidAll => "●",
        }
    }
}

/// Fill of a layer's visibility dot. Hidden layers never get a fill; the
/// selected layer is always solid; otherwise the display mode decides.
pub fn indicator_fill(
    palette: &TimelinePalette,
    visible: bool,
    mode: VisibilityMode,
    selected: bool,
) -> Option<Color32> {
    if !visible {
        return None;
    }
    if selected {
        return Some(palette.indicator_solid);
    }
    match mode {
        VisibilityMode::CurrentOnly => None,
        VisibilityMode::DimAll => Some(palette.indicator_dim),
        VisibilityMode::SolidAll => Some(palette.indicator_solid),
    }
}

/// Rect of a 1-based frame's cell inside a row. Keyframe marks, the ruler
/// highlight and the playhead all derive their geometry from this mapping.
pub fn frame_cell(row: Rect, frame: i32, frame_width: f32) -> Rect {
    let left = row.left() + (frame - 1) as f32 * frame_width;
    Rect::from_min_max(
        Pos2::new(left, row.top()),
        Pos2::new(left + frame_width, row.bottom()),
    )
}

/// Builds a vertical gradient as a stack of quads, one per adjacent stop
/// pair. Vertex colors interpolate on the GPU.
fn gradient_mesh(rect: Rect, stops: &[GradientStop]) -> Mesh {
    let mut mesh = Mesh::default();
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t1 <= t0 {
            continue;
        }
        let y0 = rect.top() + rect.height() * t0;
        let y1 = rect.top() + rect.height() * t1;
        let i = mesh.vertices.len() as u32;
        mesh.colored_vertex(Pos2::new(rect.left(), y0), c0);
        mesh.colored_vertex(Pos2::new(rect.right(), y0), c0);
        mesh.colored_vertex(Pos2::new(rect.left(), y1), c1);
        mesh.colored_vertex(Pos2::new(rect.right(), y1), c1);
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    mesh
}

pub fn vertical_gradient(painter: &Painter, rect: Rect, stops: &[GradientStop]) {
    if stops.len() < 2 {
        return;
    }
    painter.add(Shape::mesh(gradient_mesh(rect, stops)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_visibility_mode_cycles_through_all_levels() {
        let start = VisibilityMode::CurrentOnly;
        assert_eq!(start.cycle(), VisibilityMode::DimAll);
        assert_eq!(start.cycle().cycle(), VisibilityMode::SolidAll);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn test_indicator_fill_table() {
        let p = TimelinePalette::light();
        use VisibilityMode::*;

        // Hidden layers never get a fill, whatever the mode or selection.
        for mode in [CurrentOnly, DimAll, SolidAll] {
            for selected in [false, true] {
                assert_eq!(indicator_fill(&p, false, mode, selected), None);
            }
        }

        // The selected layer is always solid.
        for mode in [CurrentOnly, DimAll, SolidAll] {
            assert_eq!(
                indicator_fill(&p, true, mode, true),
                Some(p.indicator_solid)
            );
        }

        assert_eq!(indicator_fill(&p, true, CurrentOnly, false), None);
        assert_eq!(
            indicator_fill(&p, true, DimAll, false),
            Some(p.indicator_dim)
        );
        assert_eq!(
            indicator_fill(&p, true, SolidAll, false),
            Some(p.indicator_solid)
        );
    }

    #[test]
    fn test_indicator_fill_is_pure() {
        let p = TimelinePalette::dark();
        let a = indicator_fill(&p, true, VisibilityMode::DimAll, false);
        let b = indicator_fill(&p, true, VisibilityMode::DimAll, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_frame_cell_mapping() {
        let row = Rect::from_min_max(pos2(10.0, 0.0), pos2(130.0, 22.0));

        let first = frame_cell(row, 1, 12.0);
        assert_eq!(first.left(), 10.0);
        assert_eq!(first.right(), 22.0);
        assert_eq!(first.top(), 0.0);
        assert_eq!(first.bottom(), 22.0);

        let fifth = frame_cell(row, 5, 12.0);
        assert_eq!(fifth.left(), 10.0 + 4.0 * 12.0);
        assert_eq!(fifth.width(), 12.0);
        assert_eq!(frame_cell(row, 5, 12.0), fifth);
    }

    #[test]
    fn test_gradient_mesh_geometry() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 50.0));
        let stops = [
            (0.0, Color32::WHITE),
            (0.4, Color32::GRAY),
            (1.0, Color32::BLACK),
        ];
        let mesh = gradient_mesh(rect, &stops);

        // One quad per stop pair: 4 vertices and 2 triangles each.
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);

        assert_eq!(mesh.vertices[0].pos, pos2(0.0, 0.0));
        assert_eq!(mesh.vertices[1].pos, pos2(100.0, 0.0));
        assert_eq!(mesh.vertices[2].pos, pos2(0.0, 20.0));
        assert_eq!(mesh.vertices[4].pos, pos2(0.0, 20.0));
        assert_eq!(mesh.vertices[7].pos, pos2(100.0, 50.0));

        assert_eq!(mesh.vertices[0].color, Color32::WHITE);
        assert_eq!(mesh.vertices[2].color, Color32::GRAY);
        assert_eq!(mesh.vertices[7].color, Color32::BLACK);
    }

    #[test]
    fn test_gradient_mesh_identical_for_identical_input() {
        let rect = Rect::from_min_max(pos2(3.0, 7.0), pos2(40.0, 27.0));
        let stops = crate::theme::aqua_selection_stops();
        let a = gradient_mesh(rect, &stops);
        let b = gradient_mesh(rect, &stops);
        assert_eq!(a.vertices.len(), b.vertices.len());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.pos, vb.pos);
            assert_eq!(va.color, vb.color);
        }
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_degenerate_stop_lists() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(gradient_mesh(rect, &[]).vertices.is_empty());
        assert!(gradient_mesh(rect, &[(0.0, Color32::RED)]).vertices.is_empty());
        // Non-ascending pairs are skipped rather than inverted.
        let mesh = gradient_mesh(rect, &[(0.5, Color32::RED), (0.5, Color32::BLUE)]);
        assert!(mesh.vertices.is_empty());
    }
}
