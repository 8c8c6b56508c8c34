use eframe::egui::{Color32, Pos2, Rect, pos2};
use glam::{Mat4, Vec3, vec3};

use super::scene::EdgeGradient;

/// World-space point to viewport pixels; `None` when behind the camera.
pub(in crate::app) fn project_to_screen(view_proj: Mat4, rect: Rect, world: Vec3) -> Option<Pos2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }

    let ndc = clip.truncate() / clip.w;
    Some(pos2(
        rect.center().x + (ndc.x * rect.width() * 0.5),
        rect.center().y - (ndc.y * rect.height() * 0.5),
    ))
}

/// Screen radius of a world-space sphere, measured by projecting a point one
/// radius toward the camera's right. Works for both projection kinds.
pub(in crate::app) fn projected_radius(
    view_proj: Mat4,
    rect: Rect,
    camera_right: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let center_px = project_to_screen(view_proj, rect, center)?;
    let rim_px = project_to_screen(view_proj, rect, center + (camera_right * radius))?;
    Some(center_px.distance(rim_px))
}

/// Camera-space right axis extracted from a view matrix.
pub(in crate::app) fn camera_right(view: Mat4) -> Vec3 {
    vec3(view.x_axis.x, view.y_axis.x, view.z_axis.x)
}

/// Pointer position in normalized device coordinates relative to a viewport.
pub(in crate::app) fn pointer_ndc(rect: Rect, pointer: Pos2) -> (f32, f32) {
    (
        (((pointer.x - rect.left()) / rect.width()) * 2.0) - 1.0,
        -((((pointer.y - rect.top()) / rect.height()) * 2.0) - 1.0),
    )
}

/// Samples an edge ramp with smooth Hermite interpolation; `t = 1` lands on
/// the strong end.
pub(in crate::app) fn gradient_color(gradient: EdgeGradient, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let smooth = t * t * (3.0 - (2.0 * t));
    let channel =
        |a: u8, b: u8| -> u8 { ((a as f32 * (1.0 - smooth)) + (b as f32 * smooth)) as u8 };

    Color32::from_rgb(
        channel(gradient.color1.r(), gradient.color2.r()),
        channel(gradient.color1.g(), gradient.color2.g()),
        channel(gradient.color1.b(), gradient.color2.b()),
    )
}

pub(in crate::app) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}
