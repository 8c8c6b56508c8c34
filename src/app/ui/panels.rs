use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout};

use crate::social::SocialGraph;

use super::super::camera::{FirstPersonCamera, OrbitCamera};
use super::super::collision::CollisionReport;
use super::super::keys::KeyBindings;
use super::super::picking::Picker;
use super::super::scene::{SpatialIndex, build_scene};
use super::super::{ViewKind, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(graph: SocialGraph) -> Self {
        let scene = build_scene(&graph);
        let index = SpatialIndex::build(&scene);

        Self {
            graph,
            scene,
            index,
            picker: Picker::default(),
            bindings: KeyBindings::default(),
            first_person: FirstPersonCamera::new(),
            orbit: OrbitCamera::new(),
            active_view: ViewKind::TopView,
            collision: CollisionReport::default(),
            show_user_interface: true,
            show_mini_map: true,
            show_help: false,
            show_fps_bar: false,
            search: String::new(),
            selected: None,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, network_path: &str) {
        self.update_fps_counter(ctx);
        self.handle_view_toggles(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("socnet-3d");
                    ui.separator();
                    ui.label(format!("viewer: {}", self.graph.root().name));
                    ui.label(format!("people: {}", self.graph.person_count()));
                    ui.label(format!("connections: {}", self.graph.relation_count()));
                    ui.label(format!("players: {}", self.graph.total_players));
                    ui.label(format!("network: {network_path}"));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        ui.label(self.active_view.label());
                    });
                });
            });

        if self.show_user_interface {
            egui::SidePanel::left("controls")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| self.draw_controls(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_scene(ui));

        let mut show_help = self.show_help;
        egui::Window::new("Key bindings")
            .open(&mut show_help)
            .resizable(false)
            .show(ctx, |ui| self.draw_help_table(ui));
        self.show_help = show_help;
    }

    fn handle_view_toggles(&mut self, ctx: &Context) {
        // Toggles stay inert while a text field owns the keyboard.
        if ctx.memory(|memory| memory.focused().is_some()) {
            return;
        }

        let bindings = self.bindings;
        ctx.input(|input| {
            if input.key_pressed(bindings.first_person_view) {
                self.active_view = ViewKind::FirstPerson;
            }
            if input.key_pressed(bindings.top_view) {
                self.active_view = ViewKind::TopView;
            }
            if input.key_pressed(bindings.user_interface) {
                self.show_user_interface = !self.show_user_interface;
            }
            if input.key_pressed(bindings.mini_map) {
                self.show_mini_map = !self.show_mini_map;
            }
            if input.key_pressed(bindings.help) {
                self.show_help = !self.show_help;
            }
            if input.key_pressed(bindings.statistics) {
                self.show_fps_bar = !self.show_fps_bar;
            }
        });
    }

    fn draw_help_table(&self, ui: &mut egui::Ui) {
        egui::Grid::new("help_table").striped(true).show(ui, |ui| {
            for (action, keys) in self.bindings.help_rows() {
                ui.label(action);
                ui.label(keys);
                ui.end_row();
            }
        });
    }
}
