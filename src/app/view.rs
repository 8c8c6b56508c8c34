use eframe::egui::{
    self, Align2, Color32, FontId, Painter, PointerButton, Rect, Sense, Stroke, Ui, pos2, vec2,
};
use glam::{Mat4, Vec3, vec3};

use super::camera::{MoveState, perspective_matrix, picking_ray};
use super::collision::check_collision;
use super::render_utils::{
    camera_right, circle_visible, gradient_color, pointer_ndc, project_to_screen, projected_radius,
};
use super::scene::{EDGE_RADIUS, NODE_RADIUS};
use super::{ViewKind, ViewModel};

const BACKGROUND: Color32 = Color32::from_rgb(10, 13, 20);
const MINIMAP_BACKGROUND: Color32 = Color32::from_rgb(6, 8, 12);
const EDGE_SEGMENTS: usize = 12;
const MINIMAP_HALF_EXTENT: f32 = 5.0;

struct SceneCamera {
    view: Mat4,
    view_proj: Mat4,
}

impl ViewModel {
    pub(in crate::app) fn draw_scene(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        let delta = ui
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);

        // The viewer keeps flying even while the top view is active; the
        // collision undo runs right after the step it may need to cancel.
        // Movement keys stay inert while a text field owns the keyboard.
        let typing = ui.ctx().memory(|memory| memory.focused().is_some());
        self.first_person.moves = if typing {
            MoveState::default()
        } else {
            ui.input(|input| self.bindings.sample_moves(input))
        };
        self.first_person.update(delta);
        self.collision = check_collision(self.first_person.position, &self.index);
        if self.collision.any() {
            self.first_person.revert_step();
        }

        if self.active_view == ViewKind::TopView {
            if response.dragged_by(PointerButton::Primary) {
                let drag = response.drag_delta();
                self.orbit.rotate(drag.x, drag.y);
            }
            if response.hovered() {
                let scroll = ui.input(|input| input.raw_scroll_delta.y);
                if scroll.abs() > f32::EPSILON {
                    self.orbit.zoom(scroll);
                }
            }
        }

        let aspect = rect.width() / rect.height().max(1.0);
        let view = match self.active_view {
            ViewKind::TopView => self.orbit.view_matrix(),
            ViewKind::FirstPerson => self.first_person.view_matrix(),
        };
        let camera = SceneCamera {
            view,
            view_proj: perspective_matrix(aspect) * view,
        };

        // Picking stays off while flying first-person.
        if self.active_view == ViewKind::TopView {
            let ray = ui
                .input(|input| input.pointer.hover_pos())
                .filter(|pointer| rect.contains(*pointer))
                .map(|pointer| {
                    let (ndc_x, ndc_y) = pointer_ndc(rect, pointer);
                    picking_ray(self.orbit.position(), camera.view_proj, ndc_x, ndc_y)
                });
            self.picker.update(ray.as_ref(), &mut self.scene);
        } else {
            self.picker.update(None, &mut self.scene);
        }

        if self.picker.hovered().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        self.draw_world(&painter, rect, &camera, true);
        self.draw_overlay(&painter, rect);

        if self.show_mini_map {
            self.draw_mini_map(ui, rect);
        }

        // Free flight and hover both animate continuously.
        ui.ctx().request_repaint();
    }

    fn draw_world(&self, painter: &Painter, rect: Rect, camera: &SceneCamera, decorated: bool) {
        let right = camera_right(camera.view);

        for edge in &self.scene.edges {
            let Some(start) = project_to_screen(camera.view_proj, rect, edge.start) else {
                continue;
            };
            let Some(end) = project_to_screen(camera.view_proj, rect, edge.end) else {
                continue;
            };

            let width = projected_radius(camera.view_proj, rect, right, edge.midpoint, EDGE_RADIUS)
                .map(|radius| (radius * 2.0).clamp(1.0, 6.0))
                .unwrap_or(1.0);

            // Strong gradient end sits at `start`.
            for segment in 0..EDGE_SEGMENTS {
                let t0 = segment as f32 / EDGE_SEGMENTS as f32;
                let t1 = (segment + 1) as f32 / EDGE_SEGMENTS as f32;
                let a = end + ((start - end) * t0);
                let b = end + ((start - end) * t1);
                let color = gradient_color(edge.gradient, (t0 + t1) * 0.5);
                painter.line_segment([a, b], Stroke::new(width, color));
            }
        }

        // Far-to-near so close nodes overdraw distant ones.
        let mut order = (0..self.scene.nodes.len()).collect::<Vec<_>>();
        order.sort_by(|a, b| {
            let za = (camera.view * self.scene.nodes[*a].position.extend(1.0)).z;
            let zb = (camera.view * self.scene.nodes[*b].position.extend(1.0)).z;
            za.total_cmp(&zb)
        });

        for index in order {
            let node = &self.scene.nodes[index];
            let Some(center) = project_to_screen(camera.view_proj, rect, node.position) else {
                continue;
            };
            let Some(radius) =
                projected_radius(camera.view_proj, rect, right, node.position, NODE_RADIUS)
            else {
                continue;
            };
            if !circle_visible(rect, center, radius) {
                continue;
            }

            painter.circle_filled(center, radius, node.material.lit());
            painter.circle_stroke(
                center,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(10, 10, 10, 190)),
            );

            if decorated && self.selected == Some(node.person) {
                painter.circle_stroke(
                    center,
                    radius + 4.0,
                    Stroke::new(1.6, Color32::from_rgb(245, 206, 93)),
                );
            }
        }

        if !decorated {
            return;
        }

        let hovered_person = self
            .picker
            .hovered()
            .map(|index| self.scene.nodes[index].person);

        for emoji in &self.scene.emojis {
            let Some(center) = project_to_screen(camera.view_proj, rect, emoji.position) else {
                continue;
            };
            // The hovered person's emoji doubles as the tooltip avatar.
            let scale = if hovered_person == Some(emoji.person) {
                2.0
            } else {
                1.4
            };
            let size = projected_radius(camera.view_proj, rect, right, emoji.position, NODE_RADIUS)
                .map(|radius| (radius * scale).clamp(8.0, 56.0))
                .unwrap_or(12.0);
            painter.text(
                center,
                Align2::CENTER_CENTER,
                emoji.mood.glyph(),
                FontId::proportional(size),
                Color32::WHITE,
            );
        }

        // Labels stay hidden until their person is hovered or selected.
        for label in &self.scene.labels {
            let shown =
                hovered_person == Some(label.person) || self.selected == Some(label.person);
            if !shown {
                continue;
            }
            let Some(anchor) = project_to_screen(camera.view_proj, rect, label.position) else {
                continue;
            };
            painter.text(
                anchor,
                Align2::CENTER_BOTTOM,
                &label.text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }

    fn draw_overlay(&self, painter: &Painter, rect: Rect) {
        if let Some(hovered) = self.picker.hovered() {
            let node = &self.scene.nodes[hovered];
            let person = &self.graph.persons[node.person];
            let text = format!(
                "{}  |  [{}]  |  marker {}",
                person.name,
                person.tags.join(", "),
                node.marker_id
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if self.collision.any() {
            let mut parts = Vec::new();
            if self.collision.node {
                parts.push("node");
            }
            if self.collision.edge {
                parts.push("edge");
            }
            painter.text(
                rect.left_bottom() + vec2(10.0, -10.0),
                Align2::LEFT_BOTTOM,
                format!("viewer contact: {}", parts.join(" + ")),
                FontId::proportional(12.0),
                Color32::from_rgb(240, 160, 100),
            );
        }
    }

    /// Secondary viewport: a fixed top-down orthographic camera over the
    /// network with the decorative elements hidden.
    fn draw_mini_map(&self, ui: &Ui, rect: Rect) {
        let size = 220.0_f32.min(rect.width() * 0.3).min(rect.height() * 0.3);
        if size < 40.0 {
            return;
        }

        let map_rect = Rect::from_min_size(
            pos2(rect.right() - size - 12.0, rect.bottom() - size - 12.0),
            vec2(size, size),
        );
        let painter = ui.painter_at(map_rect);
        painter.rect_filled(map_rect, 0.0, MINIMAP_BACKGROUND);

        let proj = Mat4::orthographic_rh(
            -MINIMAP_HALF_EXTENT,
            MINIMAP_HALF_EXTENT,
            -MINIMAP_HALF_EXTENT,
            MINIMAP_HALF_EXTENT,
            1.0,
            120.0,
        );
        let view = Mat4::look_at_rh(vec3(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
        let camera = SceneCamera {
            view,
            view_proj: proj * view,
        };
        self.draw_world(&painter, map_rect, &camera, false);

        let corners = [
            map_rect.left_top(),
            map_rect.right_top(),
            map_rect.right_bottom(),
            map_rect.left_bottom(),
        ];
        for segment in 0..corners.len() {
            painter.line_segment(
                [corners[segment], corners[(segment + 1) % corners.len()]],
                Stroke::new(1.0, Color32::WHITE),
            );
        }
    }
}
