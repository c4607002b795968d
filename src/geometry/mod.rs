use egui::{Pos2, Rect};

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box of a segment, grown by `padding` on every side
pub fn segment_bounds(from: Pos2, to: Pos2, padding: f32) -> Rect {
    Rect::from_two_pos(from, to).expand(padding)
}
