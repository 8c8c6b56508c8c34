use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};

use crate::social::{SocialGraph, collect_social_graph};

mod camera;
mod collision;
mod keys;
mod picking;
mod render_utils;
mod scene;
mod spatial;
mod ui;
mod view;

use self::camera::{FirstPersonCamera, OrbitCamera};
use self::collision::CollisionReport;
use self::keys::KeyBindings;
use self::picking::Picker;
use self::scene::{SceneGraph, SpatialIndex};

pub struct SocnetApp {
    network_path: String,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<SocialGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum ViewKind {
    TopView,
    FirstPerson,
}

impl ViewKind {
    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::TopView => "Top view",
            Self::FirstPerson => "First person",
        }
    }
}

pub(in crate::app) struct ViewModel {
    graph: SocialGraph,
    scene: SceneGraph,
    index: SpatialIndex,
    picker: Picker,
    bindings: KeyBindings,
    first_person: FirstPersonCamera,
    orbit: OrbitCamera,
    active_view: ViewKind,
    collision: CollisionReport,
    show_user_interface: bool,
    show_mini_map: bool,
    show_help: bool,
    show_fps_bar: bool,
    search: String,
    selected: Option<usize>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl SocnetApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, network_path: String) -> Self {
        let state = Self::start_load(network_path.clone());
        Self {
            network_path,
            state,
        }
    }

    fn spawn_load(network_path: String) -> Receiver<Result<SocialGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = collect_social_graph(&network_path).map_err(|error| {
                log::error!("network load failed: {error:#}");
                error.to_string()
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(network_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(network_path),
        }
    }
}

impl eframe::App for SocnetApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading social network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the social network");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.network_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.network_path);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
